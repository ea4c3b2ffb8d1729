use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::browser::{Browser, Effect, Input, ListingMessage, ListingRequest, Phase, SessionOptions};
use crate::event::Event;
use crate::fs::listing::EntryLister;
use crate::theme::ThemeColors;
use crate::ui::CHROME_ROWS;

/// How the picker ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(PathBuf),
    Cancelled,
}

/// A transient message shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

/// Main application state.
pub struct App {
    pub browser: Browser,
    lister: Arc<dyn EntryLister>,
    event_tx: mpsc::UnboundedSender<Event>,
    pub should_quit: bool,
    pub status_message: Option<StatusMessage>,
    pub theme: ThemeColors,
    /// Marker drawn in front of the highlighted row.
    pub cursor: String,
    /// Follow the terminal height instead of a fixed row count.
    auto_height: bool,
}

impl App {
    pub fn new(
        options: SessionOptions,
        lister: Arc<dyn EntryLister>,
        event_tx: mpsc::UnboundedSender<Event>,
        theme: ThemeColors,
        cursor: String,
        auto_height: bool,
    ) -> Self {
        Self {
            browser: Browser::new(options),
            lister,
            event_tx,
            should_quit: false,
            status_message: None,
            theme,
            cursor,
            auto_height,
        }
    }

    /// Kick off the read of the starting directory.
    pub fn start(&mut self) {
        let request = self.browser.initial_request();
        self.dispatch(Effect::Load(request));
    }

    pub fn handle_input(&mut self, input: Input) {
        let effect = self.browser.handle_input(input);
        if input == Input::ToggleHidden {
            let msg = if self.browser.state().show_hidden {
                "Showing hidden files"
            } else {
                "Hiding hidden files"
            };
            self.set_status_message(msg.to_string(), false);
        }
        self.dispatch(effect);
    }

    pub fn handle_listing(&mut self, message: ListingMessage) {
        let effect = self.browser.handle_listing(message);
        self.dispatch(effect);
    }

    /// Terminal resized to `rows` lines.
    pub fn handle_resize(&mut self, rows: u16) {
        if !self.auto_height {
            return;
        }
        let height = rows.saturating_sub(CHROME_ROWS).max(1) as usize;
        self.handle_input(Input::Resize(height));
    }

    /// Carry out what the browser asked for.
    fn dispatch(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Load(request) => self.spawn_listing(request),
            Effect::Selected(_) | Effect::Cancelled => self.quit(),
            Effect::DisabledSelection(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_status_message(format!("{} cannot be selected", name), true);
            }
            Effect::ListingFailed(err) => self.set_status_message(err.to_string(), true),
        }
    }

    /// Read the directory on the blocking pool and post the result back.
    fn spawn_listing(&self, request: ListingRequest) {
        let lister = Arc::clone(&self.lister);
        let tx = self.event_tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = lister.list(&request.directory, request.show_hidden);
            let message = ListingMessage {
                directory: request.directory,
                show_hidden: request.show_hidden,
                result,
            };
            // The receiver is gone once the picker has exited.
            let _ = tx.send(Event::Listing(message));
        });
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.browser.phase() {
            Phase::Selected(path) => Some(Outcome::Selected(path.clone())),
            Phase::Cancelled => Some(Outcome::Cancelled),
            Phase::Loading | Phase::Browsing => None,
        }
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, text: String, is_error: bool) {
        self.status_message = Some(StatusMessage {
            text,
            is_error,
            created: Instant::now(),
        });
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some(ref msg) = self.status_message {
            if msg.created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
