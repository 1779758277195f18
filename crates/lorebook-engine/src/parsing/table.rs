use super::kinds::TableMark;

/// Result of splitting a text chunk on table blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TablePiece<'a> {
    Text(&'a str),
    Table {
        title: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Splits a chunk of text (already free of image spans) into literal text
/// and table blocks.
///
/// A table is an optional `**Title**` line followed by a blank line, then a
/// header pipe row and a dash separator row, then any number of data pipe
/// rows. Anything shorter than header + separator stays literal text.
pub(crate) fn split_tables(text: &str) -> Vec<TablePiece<'_>> {
    let lines = line_spans(text);
    let mut out = Vec::new();
    let mut cut = 0;
    let mut i = 0;

    while i < lines.len() {
        let Some(m) = try_match_table(text, &lines, i) else {
            i += 1;
            continue;
        };

        if m.start_byte > cut {
            out.push(TablePiece::Text(&text[cut..m.start_byte]));
        }
        out.push(TablePiece::Table {
            title: m.title,
            headers: m.headers,
            rows: m.rows,
        });
        cut = m.end_byte;
        i = m.end_line;
    }

    if cut < text.len() {
        out.push(TablePiece::Text(&text[cut..]));
    }
    out
}

struct TableBlock {
    title: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    start_byte: usize,
    /// End of the last row line, excluding its terminating newline.
    end_byte: usize,
    /// Index of the first line after the table.
    end_line: usize,
}

fn try_match_table(
    text: &str,
    lines: &[std::ops::Range<usize>],
    at: usize,
) -> Option<TableBlock> {
    let line = |idx: usize| -> Option<&str> { lines.get(idx).map(|r| &text[r.clone()]) };

    // Optional title line, then exactly one blank line before the header.
    let (title, header_idx) = match parse_title(line(at)?) {
        Some(title) if line(at + 1).is_some_and(|l| l.trim().is_empty()) => {
            (Some(title), at + 2)
        }
        _ => (None, at),
    };

    let headers = parse_pipe_row(line(header_idx)?)?;
    if !is_separator_row(line(header_idx + 1)?) {
        return None;
    }

    let mut rows = Vec::new();
    let mut end_line = header_idx + 2;
    while let Some(l) = line(end_line) {
        let Some(cells) = parse_pipe_row(l) else { break };
        rows.push(cells);
        end_line += 1;
    }

    Some(TableBlock {
        title,
        headers,
        rows,
        start_byte: lines[at].start,
        end_byte: lines[end_line - 1].end,
        end_line,
    })
}

fn parse_title(line: &str) -> Option<String> {
    let t = line.trim();
    let delim = TableMark::TITLE_DELIM;
    if t.len() > 2 * delim.len() && t.starts_with(delim) && t.ends_with(delim) {
        Some(t[delim.len()..t.len() - delim.len()].to_string())
    } else {
        None
    }
}

/// Parses `| a | b |` into trimmed cells; `None` if the line is not a pipe
/// row.
fn parse_pipe_row(line: &str) -> Option<Vec<String>> {
    let t = line.trim();
    if t.len() < 2
        || !t.starts_with(TableMark::PIPE as char)
        || !t.ends_with(TableMark::PIPE as char)
    {
        return None;
    }
    Some(
        t[1..t.len() - 1]
            .split(TableMark::PIPE as char)
            .map(|cell| cell.trim().to_string())
            .collect(),
    )
}

/// A separator row has only dash-filled cells, at least one dash each.
fn is_separator_row(line: &str) -> bool {
    match parse_pipe_row(line) {
        Some(cells) => cells
            .iter()
            .all(|c| !c.is_empty() && c.bytes().all(|b| b == TableMark::DASH)),
        None => false,
    }
}

/// Byte spans of each line, excluding the terminating newline.
fn line_spans(text: &str) -> Vec<std::ops::Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            spans.push(start..i);
            start = i + 1;
        }
    }
    if start <= text.len() && (start < text.len() || text.is_empty() || !text.ends_with('\n')) {
        spans.push(start..text.len());
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_table(text: &str) -> (Option<String>, Vec<String>, Vec<Vec<String>>) {
        let pieces = split_tables(text);
        let tables: Vec<_> = pieces
            .iter()
            .filter_map(|p| match p {
                TablePiece::Table {
                    title,
                    headers,
                    rows,
                } => Some((title.clone(), headers.clone(), rows.clone())),
                TablePiece::Text(_) => None,
            })
            .collect();
        assert_eq!(tables.len(), 1, "expected one table in {text:?}");
        tables.into_iter().next().unwrap()
    }

    #[test]
    fn header_and_separator_qualify() {
        let (title, headers, rows) = only_table("| Name | Age |\n| --- | --- |");
        assert_eq!(title, None);
        assert_eq!(headers, vec!["Name", "Age"]);
        assert!(rows.is_empty());
    }

    #[test]
    fn data_rows_collected() {
        let (_, headers, rows) =
            only_table("| Name | Age |\n| --- | --- |\n| Bob | 41 |\n| Mira | 19 |");
        assert_eq!(headers, vec!["Name", "Age"]);
        assert_eq!(rows, vec![vec!["Bob", "41"], vec!["Mira", "19"]]);
    }

    #[test]
    fn titled_table() {
        let (title, headers, _) = only_table("**Census**\n\n| Name |\n| --- |\n| Bob |");
        assert_eq!(title.as_deref(), Some("Census"));
        assert_eq!(headers, vec!["Name"]);
    }

    #[test]
    fn title_without_blank_line_is_not_attached() {
        let pieces = split_tables("**Census**\n| Name |\n| --- |");
        // Table still matches headerless; the bold line stays text.
        assert!(matches!(&pieces[0], TablePiece::Text(t) if t.contains("**Census**")));
        assert!(matches!(&pieces[1], TablePiece::Table { title: None, .. }));
    }

    #[test]
    fn lone_pipe_row_stays_text() {
        let pieces = split_tables("| just one row |");
        assert_eq!(pieces, vec![TablePiece::Text("| just one row |")]);
    }

    #[test]
    fn surrounding_text_preserved_exactly() {
        let text = "before\n| A |\n| --- |\n| 1 |\nafter";
        let pieces = split_tables(text);
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0], TablePiece::Text("before\n"));
        assert_eq!(pieces[2], TablePiece::Text("\nafter"));
    }

    #[test]
    fn ragged_rows_kept_as_parsed() {
        let (_, headers, rows) = only_table("| A | B | C |\n| --- | --- | --- |\n| 1 |");
        assert_eq!(headers.len(), 3);
        assert_eq!(rows, vec![vec!["1"]]);
    }

    #[test]
    fn separator_needs_dash_cells() {
        let pieces = split_tables("| A |\n| x |");
        assert!(matches!(pieces.as_slice(), [TablePiece::Text(_)]));
    }

    #[test]
    fn line_spans_handle_trailing_newline() {
        assert_eq!(line_spans("a\nb"), vec![0..1, 2..3]);
        assert_eq!(line_spans("a\n"), vec![0..1]);
        assert_eq!(line_spans(""), vec![0..0]);
    }
}
