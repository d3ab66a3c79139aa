//! Terminal front end for `woe-core`
//!
//! Puts the terminal into raw mode on the alternate screen, turns crossterm key events into
//! [`woe_core::Key`]s, feeds them to the editor and draws each [`woe_core::Frame`] with ratatui.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p woe-tui -- [--config woe.toml] [--log-file /tmp/woe.log] <file_path>
//! ```
//!
//! # Keys
//!
//! - Normal mode: `h j k l` move, `H L` page top/bottom, `K J` page up/down, `^ $` line
//!   start/end, `i a A o O` insert, `x X` delete, `<n>g` go to line, `n p` next/previous match
//! - `<space>` then `q` quit, `Q` force quit, `s` save, `f` search, `h` help
//! - Insert mode: type text, Enter splits the line, Esc / Ctrl+L / Ctrl+C back to Normal

mod logging;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use tracing::info;
use woe_core::{Editor, EditorConfig, Frame as EditorFrame, Key, Outcome};

/// How often the screen is redrawn while idle, so status messages expire.
const IDLE_REDRAW: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "woe")]
#[command(version)]
#[command(about = "A small modal terminal text editor")]
struct Args {
    /// File to edit (created on first save if it does not exist)
    file: Option<PathBuf>,

    /// TOML config file (tab_width, message_timeout_secs, max_search_results)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        logging::init(log_file)?;
    }

    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    info!(?config, file = ?args.file, "starting woe");

    let mut editor = Editor::new(config);
    if let Some(file) = &args.file {
        editor.open(file);
    }
    if editor.status().is_none() {
        editor.show_help();
    }

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut editor);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    info!("bye");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, editor: &mut Editor) -> io::Result<()> {
    let size = terminal.size()?;
    editor.resize(usize::from(size.height), usize::from(size.width));

    loop {
        let frame = editor.render_frame();
        terminal.draw(|f| draw(f, &frame))?;

        if !event::poll(IDLE_REDRAW)? {
            continue;
        }
        match event::read()? {
            Event::Key(key_event) => {
                let Some(key) = map_key(key_event) else {
                    continue;
                };
                if editor.process_key(key) == Outcome::Quit {
                    return Ok(());
                }
            }
            Event::Resize(cols, rows) => editor.resize(usize::from(rows), usize::from(cols)),
            _ => {}
        }
    }
}

fn draw(f: &mut ratatui::Frame, frame: &EditorFrame) {
    let area = f.area();

    let mut lines: Vec<Line> = frame
        .lines
        .iter()
        .map(|line| Line::raw(line.as_str()))
        .collect();
    lines.push(Line::styled(
        frame.status_bar.as_str(),
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    lines.push(Line::raw(frame.message.as_str()));
    f.render_widget(Paragraph::new(lines), area);

    let (row, col) = frame.cursor;
    let x = u16::try_from(col)
        .unwrap_or(u16::MAX)
        .min(area.width.saturating_sub(1));
    let y = u16::try_from(row)
        .unwrap_or(u16::MAX)
        .min(area.height.saturating_sub(1));
    f.set_cursor_position((area.x + x, area.y + y));
}

/// Translate a crossterm key event into an editor key. Non-press events and keys the editor has
/// no use for map to `None`.
fn map_key(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Ctrl('i')),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => c
            .is_ascii_alphabetic()
            .then(|| Key::Ctrl(c.to_ascii_lowercase())),
        KeyCode::Char(c) => u8::try_from(c).ok().and_then(Key::from_byte),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_key_basic() {
        assert_eq!(map_key(press(KeyCode::Char('x'))), Some(Key::Char('x')));
        assert_eq!(map_key(press(KeyCode::Char('X'))), Some(Key::Char('X')));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Key::Escape));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(map_key(press(KeyCode::Tab)), Some(Key::Ctrl('i')));
        assert_eq!(map_key(press(KeyCode::PageDown)), Some(Key::PageDown));
    }

    #[test]
    fn test_map_key_ctrl() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Some(Key::Ctrl('c')));
        let ctrl_digit = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_digit), None);
    }

    #[test]
    fn test_map_key_ignores_non_ascii_and_releases() {
        assert_eq!(map_key(press(KeyCode::Char('é'))), None);
        assert_eq!(map_key(press(KeyCode::F(1))), None);

        let mut release = press(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["woe", "--config", "woe.toml", "notes.txt"]);
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.config, Some(PathBuf::from("woe.toml")));
        assert_eq!(args.log_file, None);
    }
}
