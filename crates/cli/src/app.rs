//! Viewer state and key handling for the terminal UI.

use crate::ui;
use deck_core::{Deck, Navigator};
use deck_pptx::{DeckExporter, FileSink};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use std::io;
use std::path::PathBuf;

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Previous,
    First,
    Last,
    GoTo(i64),
    Export,
    Quit,
    Ignore,
}

/// Map a key press to an action.
pub fn action_for(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Char(' ') => {
            Action::Next
        }
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('p') => Action::Previous,
        KeyCode::Home => Action::First,
        KeyCode::End => Action::Last,
        KeyCode::Char('0') => Action::GoTo(9),
        KeyCode::Char(c) if c.is_ascii_digit() => Action::GoTo(i64::from(c as u8 - b'1')),
        KeyCode::Char('e') => Action::Export,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::Ignore,
    }
}

/// Outcome of the last export, shown under the export control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Saved(PathBuf),
    Failed(String),
}

/// The interactive viewer.
pub struct App<'a> {
    deck: &'a Deck,
    nav: Navigator,
    exporter: DeckExporter,
    sink: FileSink,
    status: Option<Status>,
    should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(deck: &'a Deck, sink: FileSink) -> Self {
        Self {
            deck,
            nav: Navigator::new(deck),
            exporter: DeckExporter::new(),
            sink,
            status: None,
            should_quit: false,
        }
    }

    pub fn deck(&self) -> &Deck {
        self.deck
    }

    pub fn nav(&self) -> &Navigator {
        &self.nav
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Next => {
                self.nav.next();
            }
            Action::Previous => {
                self.nav.previous();
            }
            Action::First => {
                self.nav.first();
            }
            Action::Last => {
                self.nav.last();
            }
            Action::GoTo(index) => {
                self.nav.go_to(index);
            }
            Action::Export => self.export(),
            Action::Quit => self.should_quit = true,
            Action::Ignore => {}
        }
    }

    /// Export the whole deck through the file sink and record the outcome.
    fn export(&mut self) {
        self.status = Some(match self.exporter.export(self.deck, &mut self.sink) {
            Ok(()) => match self.sink.last_saved() {
                Some(path) => Status::Saved(path.to_path_buf()),
                None => Status::Saved(self.sink.dir().to_path_buf()),
            },
            Err(e) => {
                log::error!("Export failed: {}", e);
                Status::Failed(e.to_string())
            }
        });
    }

    /// Draw and handle key presses until the user quits.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.apply(action_for(key));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::catalog;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for(key(KeyCode::Right)), Action::Next);
        assert_eq!(action_for(key(KeyCode::Char(' '))), Action::Next);
        assert_eq!(action_for(key(KeyCode::Left)), Action::Previous);
        assert_eq!(action_for(key(KeyCode::Char('1'))), Action::GoTo(0));
        assert_eq!(action_for(key(KeyCode::Char('9'))), Action::GoTo(8));
        assert_eq!(action_for(key(KeyCode::Char('0'))), Action::GoTo(9));
        assert_eq!(action_for(key(KeyCode::Char('e'))), Action::Export);
        assert_eq!(action_for(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(action_for(key(KeyCode::Char('z'))), Action::Ignore);
    }

    #[test]
    fn test_navigation_actions_stay_in_range() {
        let deck = catalog::department_overview().unwrap();
        let mut app = App::new(&deck, FileSink::new("."));

        app.apply(Action::Previous);
        assert_eq!(app.nav().current(), 0);

        for _ in 0..20 {
            app.apply(Action::Next);
        }
        assert_eq!(app.nav().current(), 9);

        app.apply(Action::GoTo(4));
        assert_eq!(app.nav().current(), 4);
        app.apply(Action::First);
        assert_eq!(app.nav().current(), 0);
        app.apply(Action::Last);
        assert_eq!(app.nav().current(), 9);
    }

    #[test]
    fn test_export_records_saved_path() {
        let dir = tempfile::tempdir().unwrap();
        let deck = catalog::department_overview().unwrap();
        let mut app = App::new(&deck, FileSink::new(dir.path()));

        app.apply(Action::Export);

        let expected = dir.path().join("F-STSC-Department-Overview.pptx");
        assert_eq!(app.status(), Some(&Status::Saved(expected.clone())));
        assert!(expected.exists());
        // Exporting never moves the viewer.
        assert_eq!(app.nav().current(), 0);
    }

    #[test]
    fn test_export_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let deck = catalog::department_overview().unwrap();
        let mut app = App::new(&deck, FileSink::new(&blocker));
        app.apply(Action::Export);

        assert!(matches!(app.status(), Some(Status::Failed(_))));
        assert!(!app.should_quit());
    }

    #[test]
    fn test_quit() {
        let deck = catalog::department_overview().unwrap();
        let mut app = App::new(&deck, FileSink::new("."));
        app.apply(Action::Quit);
        assert!(app.should_quit());
    }
}
