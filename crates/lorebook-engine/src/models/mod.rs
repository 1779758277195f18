pub mod element;
pub mod entry;
pub mod segment;

pub use element::{Category, ElementRef};
pub use entry::{DataTable, Entry, GalleryImage, StatBlock, MARKUP_ATTRIBUTES};
pub use segment::{LinkToken, Segment};
