use thiserror::Error;

use crate::mutate::{image_markup, insert_at, update_image_dimensions};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("field is not in editing mode")]
    NotEditing,
}

/// The two states of the field-editing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Viewing,
    Editing,
}

/// A claim on inserting an upload result, issued before the upload starts.
///
/// Carries the session generation at issue time plus the caret offset the
/// insertion should target. Completion against a newer generation is
/// silently discarded, which is how an upload still in flight when the
/// user leaves edit mode gets dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    generation: u64,
    offset: usize,
}

/// Editing session for one markup field.
///
/// Owns the field's current text and gates the write path: mutations are
/// reachable only in the Editing state. Save commits the working text and
/// bumps the version counter; cancel reverts to the last saved text. There
/// is no dirty-but-unparsed intermediate state — the working text is
/// always the value the renderer parses.
#[derive(Debug, Clone)]
pub struct FieldSession {
    saved: String,
    working: String,
    state: FieldState,
    version: u64,
    generation: u64,
}

impl FieldSession {
    pub fn new(text: impl Into<String>) -> Self {
        let saved: String = text.into();
        Self {
            working: saved.clone(),
            saved,
            state: FieldState::Viewing,
            version: 0,
            generation: 0,
        }
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    /// The current text value: the working copy while editing, the saved
    /// text otherwise.
    pub fn text(&self) -> &str {
        match self.state {
            FieldState::Editing => &self.working,
            FieldState::Viewing => &self.saved,
        }
    }

    /// Version counter, incremented on every save.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Viewing → Editing, triggered externally by the user's edit action.
    pub fn begin_edit(&mut self) {
        if self.state == FieldState::Viewing {
            self.working = self.saved.clone();
            self.state = FieldState::Editing;
        }
    }

    /// Commits the working text and returns to Viewing.
    pub fn save(&mut self) -> Result<(), SessionError> {
        self.require_editing()?;
        self.saved = self.working.clone();
        self.version += 1;
        self.generation += 1;
        self.state = FieldState::Viewing;
        Ok(())
    }

    /// Discards in-memory edits and returns to Viewing. Pending upload
    /// tickets are invalidated.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.require_editing()?;
        self.working = self.saved.clone();
        self.generation += 1;
        self.state = FieldState::Viewing;
        Ok(())
    }

    /// Replaces the working text wholesale (keystroke passthrough).
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.require_editing()?;
        self.working = text.into();
        Ok(())
    }

    /// Applies a drag-release resize to the working text.
    pub fn resize_image(
        &mut self,
        occurrence_index: usize,
        width: u32,
        height: u32,
    ) -> Result<(), SessionError> {
        self.require_editing()?;
        self.working = update_image_dimensions(&self.working, occurrence_index, width, height);
        Ok(())
    }

    /// Splices markup at a caret offset, returning the caret position after
    /// the insertion.
    pub fn insert_markup(&mut self, offset: usize, markup: &str) -> Result<usize, SessionError> {
        self.require_editing()?;
        let splice = insert_at(&self.working, offset, markup);
        self.working = splice.text;
        Ok(splice.caret)
    }

    /// Issues a ticket for an upload about to start, targeting the given
    /// caret offset.
    pub fn begin_upload(&self, offset: usize) -> UploadTicket {
        UploadTicket {
            generation: self.generation,
            offset,
        }
    }

    /// Splices the canonical image markup for a completed upload.
    ///
    /// The splice always runs against the session's *current* working text,
    /// never a snapshot from before the upload, so serialized completions
    /// of concurrent uploads cannot drop each other's insertions. A stale
    /// ticket (the session was cancelled or saved since) is silently
    /// discarded and `None` is returned.
    pub fn complete_upload(&mut self, ticket: UploadTicket, url: &str, alt: &str) -> Option<usize> {
        if self.state != FieldState::Editing || ticket.generation != self.generation {
            return None;
        }
        let splice = insert_at(&self.working, ticket.offset, &image_markup(url, alt));
        self.working = splice.text;
        Some(splice.caret)
    }

    fn require_editing(&self) -> Result<(), SessionError> {
        match self.state {
            FieldState::Editing => Ok(()),
            FieldState::Viewing => Err(SessionError::NotEditing),
        }
    }
}
