//! Field-level editing lifecycle.
//!
//! A field is either **Viewing** (parse + render only) or **Editing**
//! (mutations reachable). Every keystroke passes straight through the
//! current text value; re-parsing per keystroke is fine because the
//! grammar is near-regular and fields are short reference-entry prose,
//! not manuscripts.

pub mod session;
pub mod upload;

pub use session::{FieldSession, FieldState, SessionError, UploadTicket};
pub use upload::{MediaFile, MediaUploader, UploadError, UploadedMedia};
