use std::time::Duration;
use tracing::trace;

use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::domain::{DvConfig, DvError, Message};
use crate::model::Model;
use crate::toolbar::Facet;

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &DvConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, DvError> {
        if event::poll(Duration::from_millis(self.event_poll_time))? {
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    if model.raw_keyevents() {
                        return Ok(Some(Message::RawKey(key)));
                    }
                    return Ok(self.handle_key(key));
                }
                Event::Resize(width, height) => {
                    return Ok(Some(Message::Resize(width as usize, height as usize)));
                }
                _ => {}
            }
        }
        Ok(None)
    }

    fn handle_key(&self, key: event::KeyEvent) -> Option<Message> {
        let message = match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::MoveDown),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::MoveRight),
            KeyCode::PageUp => Some(Message::MovePageUp),
            KeyCode::PageDown => Some(Message::MovePageDown),
            KeyCode::Home => Some(Message::MoveBeginning),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::Enter => Some(Message::Enter),
            KeyCode::Esc => Some(Message::Exit),
            KeyCode::Tab => Some(Message::MoveRight),
            KeyCode::Char('/') => Some(Message::Search),
            KeyCode::Char('s') => Some(Message::OpenFacet(Facet::Status)),
            KeyCode::Char('t') => Some(Message::OpenFacet(Facet::Type)),
            KeyCode::Char('c') => Some(Message::OpenFacet(Facet::Classification)),
            KeyCode::Char('r') => Some(Message::ResetFilters),
            KeyCode::Char('e') => Some(Message::Export),
            KeyCode::Char('a') => Some(Message::AddDocument),
            KeyCode::Char('v') => Some(Message::ViewOptions),
            KeyCode::Char('p') => Some(Message::Appearance),
            KeyCode::Char('o') => Some(Message::SortAscending),
            KeyCode::Char('O') => Some(Message::SortDescending),
            KeyCode::Char('?') => Some(Message::Help),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}
