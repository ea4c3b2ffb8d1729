//! Navigation state machine.
//!
//! [`Browser`] owns every piece of session state and is driven by two kinds of
//! events: decoded user [`Input`] and [`ListingMessage`]s coming back from a
//! background [`EntryLister`](crate::fs::listing::EntryLister). It never
//! performs directory reads itself; a directory change yields an
//! [`Effect::Load`] that the caller fulfils asynchronously.

use std::path::{Path, PathBuf};

use crate::browser::policy::{EffectiveType, SelectionPolicy};
use crate::browser::stack::NavigationStack;
use crate::browser::viewport::ViewportState;
use crate::error::ListingError;
use crate::fs::listing::{DirectoryEntry, Listing};

/// Lifecycle phase of a browsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the listing of the current directory.
    Loading,
    Browsing,
    Selected(PathBuf),
    Cancelled,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Selected(_) | Phase::Cancelled)
    }
}

/// Decoded user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToLast,
    Ascend,
    /// Open the highlighted entry. With `confirm`, also try to select it.
    Activate { confirm: bool },
    /// New viewport height in rows.
    Resize(usize),
    ToggleHidden,
    Quit,
}

/// A directory read the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub directory: PathBuf,
    pub show_hidden: bool,
}

/// Outcome of a directory read, tagged with the request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingMessage {
    pub directory: PathBuf,
    pub show_hidden: bool,
    pub result: Result<Listing, ListingError>,
}

/// What the caller should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Load(ListingRequest),
    Selected(PathBuf),
    /// A confirm landed on an entry the policy rejects.
    DisabledSelection(PathBuf),
    ListingFailed(ListingError),
    Cancelled,
}

/// Parameters fixed at session start.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub initial_directory: PathBuf,
    pub height: usize,
    pub show_hidden: bool,
    pub policy: SelectionPolicy,
}

/// Mutable session state.
#[derive(Debug, Clone)]
pub struct BrowserState {
    pub current_directory: PathBuf,
    /// Directory, or highlighted selectable file, shown in the header.
    pub display_path: PathBuf,
    pub listing: Listing,
    pub viewport: ViewportState,
    pub height: usize,
    pub navigation_stack: NavigationStack,
    pub show_hidden: bool,
    pub confirmed_selection: Option<PathBuf>,
    pub last_error: Option<ListingError>,
    /// Viewport to apply once the pending listing arrives.
    pending_viewport: ViewportState,
}

/// One rendered row of the visible window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub index: usize,
    pub name: String,
    pub is_cursor: bool,
    /// A confirm on this row would select it.
    pub is_selectable: bool,
    /// A file the policy rejects.
    pub is_disabled: bool,
    pub effective: EffectiveType,
    pub is_symlink: bool,
    pub symlink_target: Option<PathBuf>,
    pub permissions: String,
    pub size: String,
}

/// Everything the UI needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub current_directory: PathBuf,
    pub display_path: PathBuf,
    pub loading: bool,
    pub error: Option<String>,
    pub total: usize,
    pub cursor: Option<usize>,
    pub rows: Vec<EntryView>,
}

/// One browsing session, from the first listing to a selection or cancel.
pub struct Browser {
    state: BrowserState,
    policy: SelectionPolicy,
    phase: Phase,
}

impl Browser {
    /// Start a session in `Loading(initial_directory)`.
    ///
    /// The first read is obtained from [`Browser::initial_request`].
    pub fn new(options: SessionOptions) -> Self {
        let state = BrowserState {
            display_path: options.initial_directory.clone(),
            current_directory: options.initial_directory,
            listing: Listing::empty(),
            viewport: ViewportState::default(),
            height: options.height.max(1),
            navigation_stack: NavigationStack::new(),
            show_hidden: options.show_hidden,
            confirmed_selection: None,
            last_error: None,
            pending_viewport: ViewportState::default(),
        };
        Self {
            state,
            policy: options.policy,
            phase: Phase::Loading,
        }
    }

    pub fn initial_request(&self) -> ListingRequest {
        self.request()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn handle_input(&mut self, input: Input) -> Effect {
        if self.phase.is_terminal() {
            return Effect::None;
        }

        match input {
            Input::Quit => {
                tracing::info!("browsing cancelled");
                self.phase = Phase::Cancelled;
                Effect::Cancelled
            }
            Input::Resize(height) => {
                self.resize(height);
                Effect::None
            }
            Input::Ascend => self.ascend(),
            Input::ToggleHidden => self.toggle_hidden(),
            _ if self.phase != Phase::Browsing || self.state.listing.is_empty() => Effect::None,
            Input::MoveDown => self.navigate(|vp, len, h| vp.move_by(1, len, h)),
            Input::MoveUp => self.navigate(|vp, len, h| vp.move_by(-1, len, h)),
            Input::PageDown => self.navigate(|vp, len, h| vp.page_by(1, len, h)),
            Input::PageUp => self.navigate(|vp, len, h| vp.page_by(-1, len, h)),
            Input::GoToTop => self.navigate(|vp, len, h| vp.move_to_start(len, h)),
            Input::GoToLast => self.navigate(|vp, len, h| vp.move_to_end(len, h)),
            Input::Activate { confirm } => self.activate(confirm),
        }
    }

    /// Apply a finished directory read.
    ///
    /// Only a result matching the outstanding request (directory and hidden
    /// flag) is honored; anything else is stale and dropped.
    pub fn handle_listing(&mut self, message: ListingMessage) -> Effect {
        if self.phase != Phase::Loading
            || message.directory != self.state.current_directory
            || message.show_hidden != self.state.show_hidden
        {
            tracing::debug!(
                directory = %message.directory.display(),
                show_hidden = message.show_hidden,
                current = %self.state.current_directory.display(),
                "discarding stale listing"
            );
            return Effect::None;
        }

        self.phase = Phase::Browsing;
        match message.result {
            Ok(listing) => {
                let len = listing.len();
                self.state.listing = listing;
                self.state.viewport = self.state.pending_viewport.clamp_to(len, self.state.height);
                self.state.last_error = None;
                Effect::None
            }
            Err(err) => {
                tracing::warn!(error = %err, "directory listing failed");
                self.state.listing = Listing::empty();
                self.state.viewport = ViewportState::default();
                self.state.last_error = Some(err.clone());
                Effect::ListingFailed(err)
            }
        }
    }

    fn request(&self) -> ListingRequest {
        ListingRequest {
            directory: self.state.current_directory.clone(),
            show_hidden: self.state.show_hidden,
        }
    }

    /// Switch to `directory` and ask for its listing, restoring `viewport`
    /// once it arrives.
    fn load(&mut self, directory: PathBuf, viewport: ViewportState) -> Effect {
        tracing::debug!(directory = %directory.display(), "requesting listing");
        self.state.display_path = directory.clone();
        self.state.current_directory = directory;
        self.state.pending_viewport = viewport;
        self.phase = Phase::Loading;
        Effect::Load(self.request())
    }

    fn navigate(&mut self, step: impl Fn(ViewportState, usize, usize) -> ViewportState) -> Effect {
        let len = self.state.listing.len();
        self.state.viewport = step(self.state.viewport, len, self.state.height);
        self.sync_display_path();
        Effect::None
    }

    fn resize(&mut self, height: usize) {
        self.state.height = height.max(1);
        if self.phase == Phase::Browsing {
            let len = self.state.listing.len();
            self.state.viewport = self.state.viewport.resize(len, self.state.height);
        }
    }

    fn ascend(&mut self) -> Effect {
        let depth = self.state.navigation_stack.len();
        let restored = !self.state.navigation_stack.is_empty();
        let viewport = self.state.navigation_stack.pop();
        let parent = self
            .state
            .current_directory
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.state.current_directory.clone());
        tracing::debug!(depth, restored, parent = %parent.display(), "ascending");
        self.load(parent, viewport)
    }

    fn toggle_hidden(&mut self) -> Effect {
        self.state.show_hidden = !self.state.show_hidden;
        let viewport = match self.phase {
            Phase::Browsing => self.state.viewport,
            _ => self.state.pending_viewport,
        };
        let directory = self.state.current_directory.clone();
        self.load(directory, viewport)
    }

    fn activate(&mut self, confirm: bool) -> Effect {
        let Some(entry) = self.state.listing.get(self.state.viewport.cursor).cloned() else {
            return Effect::None;
        };
        let classification = self.policy.classify(&entry, &self.state.current_directory);
        let path = entry.path_in(&self.state.current_directory);

        match classification.effective {
            EffectiveType::Directory => {
                if confirm && self.policy.is_chooseable(EffectiveType::Directory) {
                    return self.select(path);
                }
                self.state.navigation_stack.push(self.state.viewport);
                tracing::debug!(depth = self.state.navigation_stack.len(), "descending");
                self.load(path, ViewportState::default())
            }
            EffectiveType::File if !confirm => Effect::None,
            EffectiveType::File => {
                if self.policy.permits(&entry, &classification) {
                    self.select(path)
                } else {
                    tracing::debug!(path = %path.display(), "selection rejected by policy");
                    Effect::DisabledSelection(path)
                }
            }
        }
    }

    fn select(&mut self, path: PathBuf) -> Effect {
        tracing::info!(path = %path.display(), "selection confirmed");
        self.state.confirmed_selection = Some(path.clone());
        self.phase = Phase::Selected(path.clone());
        Effect::Selected(path)
    }

    fn sync_display_path(&mut self) {
        let Some(entry) = self.state.listing.get(self.state.viewport.cursor) else {
            return;
        };
        let classification = self.policy.classify(entry, &self.state.current_directory);
        match classification.effective {
            EffectiveType::Directory => {
                self.state.display_path = self.state.current_directory.clone();
            }
            EffectiveType::File if self.policy.permits(entry, &classification) => {
                self.state.display_path = entry.path_in(&self.state.current_directory);
            }
            EffectiveType::File => {}
        }
    }

    /// Renderable view of the current state.
    ///
    /// While a listing is in flight the old entries belong to another
    /// directory, so no rows are produced.
    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        let loading = self.phase == Phase::Loading;
        let browsing_rows = !loading && !state.listing.is_empty();
        let rows = if browsing_rows {
            let vp = state.viewport;
            state
                .listing
                .iter()
                .enumerate()
                .skip(vp.min)
                .take(vp.max + 1 - vp.min)
                .map(|(index, entry)| self.entry_view(index, entry))
                .collect()
        } else {
            Vec::new()
        };

        Snapshot {
            current_directory: state.current_directory.clone(),
            display_path: state.display_path.clone(),
            loading,
            error: state.last_error.as_ref().map(ToString::to_string),
            total: if loading { 0 } else { state.listing.len() },
            cursor: browsing_rows.then_some(state.viewport.cursor),
            rows,
        }
    }

    fn entry_view(&self, index: usize, entry: &DirectoryEntry) -> EntryView {
        let classification = self.policy.classify(entry, &self.state.current_directory);
        let is_selectable = self.policy.permits(entry, &classification);
        let effective = classification.effective;
        EntryView {
            index,
            name: entry.name.clone(),
            is_cursor: index == self.state.viewport.cursor,
            is_selectable,
            is_disabled: effective == EffectiveType::File && !is_selectable,
            effective,
            is_symlink: entry.is_symlink,
            symlink_target: classification.resolved,
            permissions: entry.permissions(),
            size: entry.human_size(),
        }
    }
}
