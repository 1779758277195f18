//! Markup-specific types that own their syntax delimiters.
//!
//! All delimiter constants live here, not scattered in parser code. The
//! matchers call these constants; they never hardcode `![`, `@{` or `|`.

pub mod image;
pub mod link;
pub mod table;

pub use image::ImageMark;
pub use link::LinkMark;
pub use table::TableMark;
