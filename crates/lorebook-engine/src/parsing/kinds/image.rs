/// Inline image markup: `![alt](url width=W height=H "caption")`.
///
/// Width, height and caption are optional, any order after the URL,
/// space-delimited. Images are single-line constructs.
pub struct ImageMark;

impl ImageMark {
    pub const OPEN: &'static [u8; 2] = b"![";
    pub const ALT_CLOSE: u8 = b']';
    pub const URL_OPEN: u8 = b'(';
    pub const CLOSE: u8 = b')';
    pub const QUOTE: u8 = b'"';
    pub const WIDTH_KEY: &'static str = "width=";
    pub const HEIGHT_KEY: &'static str = "height=";
}
