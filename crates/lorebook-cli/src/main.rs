use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lorebook_config::Config;
use lorebook_engine::{
    detect_cross_references, io, parse, render_resolved, Entry, RenderOptions, VaultIndex,
    ViewNode,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::{
    env,
    io::{stdout, Stdout},
    path::PathBuf,
    process,
};

struct App {
    entries: Vec<Entry>,
    index: VaultIndex,
    entry_list_state: ListState,
    current_content: Vec<String>,
}

impl App {
    fn new(vault_path: PathBuf) -> Result<Self> {
        let mut entries = io::load_vault(&vault_path)?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let index = VaultIndex::from_entries(&entries);

        let mut app = Self {
            entries,
            index,
            entry_list_state: ListState::default(),
            current_content: Vec::new(),
        };

        if !app.entries.is_empty() {
            app.entry_list_state.select(Some(0));
            app.update_content_for_selection();
        }

        Ok(app)
    }

    fn next_entry(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.entry_list_state.selected() {
            Some(i) => (i + 1) % self.entries.len(),
            None => 0,
        };
        self.entry_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_entry(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.entry_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.entries.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.entry_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        let Some(entry) = self
            .entry_list_state
            .selected()
            .and_then(|i| self.entries.get(i))
        else {
            self.current_content = Vec::new();
            return;
        };

        let mut lines = Vec::new();
        lines.push(format!(
            "{} {} ({})",
            entry.category.icon(),
            entry.name,
            entry.category
        ));
        lines.push(String::new());

        self.render_field(&mut lines, "description", &entry.description);
        for (key, value) in entry.markup_attributes() {
            lines.push(String::new());
            self.render_field(&mut lines, key, value);
        }

        let current_id = entry.id.to_string();
        let refs = detect_cross_references(&entry.full_text(), Some(&current_id), &self.index);
        if !refs.is_empty() {
            lines.push(String::new());
            lines.push("Cross references:".to_string());
            for element in refs {
                lines.push(format!(
                    "  {} {} ({})",
                    element.category.icon(),
                    element.name,
                    element.category
                ));
            }
        }

        self.current_content = lines;
    }

    fn render_field(&self, lines: &mut Vec<String>, label: &str, text: &str) {
        lines.push(format!("── {label} ──"));
        if text.is_empty() {
            lines.push("(empty)".to_string());
            return;
        }
        let nodes = render_resolved(&parse(text), &self.index, &RenderOptions::default());
        lines.extend(view_lines(&nodes));
    }
}

/// Flattens inline view nodes into terminal lines. Images and tables are
/// block-level; text and link chips flow inline.
fn view_lines(nodes: &[ViewNode]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    let flush = |lines: &mut Vec<String>, current: &mut String| {
        if !current.is_empty() {
            lines.push(std::mem::take(current));
        }
    };

    for node in nodes {
        match node {
            ViewNode::Text(text) => {
                for (i, part) in text.split('\n').enumerate() {
                    if i > 0 {
                        lines.push(std::mem::take(&mut current));
                    }
                    current.push_str(part);
                }
            }
            ViewNode::LinkChip(link) => {
                let marker = if link.exists { "" } else { "?" };
                current.push_str(&format!(
                    "[{} {}{}]",
                    link.category.icon(),
                    link.display_name,
                    marker
                ));
            }
            ViewNode::Image {
                url,
                alt,
                caption,
                width,
                height,
                ..
            } => {
                flush(&mut lines, &mut current);
                let dims = match (width, height) {
                    (Some(w), Some(h)) => format!(" {w}x{h}"),
                    (Some(w), None) => format!(" w{w}"),
                    (None, Some(h)) => format!(" h{h}"),
                    (None, None) => String::new(),
                };
                lines.push(format!("🖼  {alt}{dims} <{url}>"));
                if let Some(c) = caption {
                    lines.push(format!("   \"{c}\""));
                }
            }
            ViewNode::Table {
                title,
                headers,
                rows,
            } => {
                flush(&mut lines, &mut current);
                if let Some(t) = title {
                    lines.push(format!("▤ {t}"));
                }
                lines.push(headers.join(" │ "));
                lines.push("─".repeat(headers.join(" │ ").len().max(3)));
                for row in rows {
                    lines.push(row.join(" │ "));
                }
            }
        }
    }
    flush(&mut lines, &mut current);
    lines
}

fn main() -> Result<()> {
    // Determine vault path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let vault_path;
    let from_config;

    if args.len() == 2 {
        vault_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(config)) => {
                vault_path = config.vault_path;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No vault path provided and no config file found");
                eprintln!("Usage: {} <vault-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <vault-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [vault-folder-path]", args[0]);
        process::exit(1);
    };

    if let Err(e) = io::validate_vault_dir(&vault_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Vault path '{}'{} is invalid: {e}",
            vault_path.display(),
            source
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(vault_path)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_entry(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_entry(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // Entry list panel
    let entry_items: Vec<ListItem> = app
        .entries
        .iter()
        .map(|entry| {
            let display_text = format!("{} {}", entry.category.icon(), entry.name);
            ListItem::new(vec![Line::from(vec![Span::raw(display_text)])])
        })
        .collect();

    let entry_list = List::new(entry_items)
        .block(Block::default().borders(Borders::ALL).title("Entries"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(entry_list, chunks[0], &mut app.entry_list_state);

    // Content panel
    let content_text = if app.current_content.is_empty() {
        vec![Line::from("Select an entry to view its content")]
    } else {
        app.current_content
            .iter()
            .map(|line| Line::from(vec![Span::raw(line.clone())]))
            .collect()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Entry"))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(content, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorebook_engine::{parse, render, RenderOptions};
    use pretty_assertions::assert_eq;

    #[test]
    fn chips_flow_inline_with_text() {
        let nodes = render(
            &parse("Ask @{Bob|characters|123} about it."),
            &RenderOptions::default(),
        );
        let lines = view_lines(&nodes);
        // Cached-field rendering treats the chip as existing, so no marker.
        assert_eq!(lines, vec!["Ask [👤 Bob] about it.".to_string()]);
    }

    #[test]
    fn images_and_tables_break_onto_their_own_lines() {
        let text = "intro ![m](http://x/m.png width=200 height=100)\n| A | B |\n| --- | --- |\n| 1 | 2 |";
        let lines = view_lines(&render(&parse(text), &RenderOptions::default()));
        assert_eq!(lines[0], "intro ");
        assert_eq!(lines[1], "🖼  m 200x100 <http://x/m.png>");
        // The newline separating image and table survives as a blank line.
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "A │ B");
        assert_eq!(lines[5], "1 │ 2");
    }
}
