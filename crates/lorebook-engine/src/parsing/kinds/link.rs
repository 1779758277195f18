/// Cross-reference token markup: `@{Name|Category|Id}`.
///
/// Atomic and single-line; both separators and the closing brace are
/// required for the token to qualify.
pub struct LinkMark;

impl LinkMark {
    pub const OPEN: &'static [u8; 2] = b"@{";
    pub const CLOSE: u8 = b'}';
    pub const SEP: u8 = b'|';
}
