/// Inline table markup: an optional `**Title**` line and a blank line,
/// then `| cell | cell |` rows where the second row is a dash separator.
///
/// At least a header row and the separator are required; anything shorter
/// stays literal text.
pub struct TableMark;

impl TableMark {
    pub const PIPE: u8 = b'|';
    pub const DASH: u8 = b'-';
    pub const TITLE_DELIM: &'static str = "**";
}
