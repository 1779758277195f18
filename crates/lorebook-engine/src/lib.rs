pub mod editing;
pub mod io;
pub mod models;
pub mod mutate;
pub mod parsing;
pub mod render;
pub mod resolve;

// Re-export key types for easier usage
pub use editing::{FieldSession, FieldState};
pub use io::{IoError, VaultIndex};
pub use models::{Category, ElementRef, Entry, LinkToken, Segment};
pub use mutate::{insert_at, update_image_dimensions, Splice};
pub use parsing::{parse, serialize};
pub use render::{render, render_resolved, RenderOptions, ViewNode};
pub use resolve::{detect_cross_references, resolve_link, ElementIndex, ResolvedLink};
