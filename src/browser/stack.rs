use crate::browser::viewport::ViewportState;

/// Viewport snapshots, one per directory level descended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStack {
    frames: Vec<ViewportState>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: ViewportState) {
        self.frames.push(state);
    }

    /// Pop the most recent snapshot. An empty stack yields the initial
    /// (top-of-listing) viewport instead of failing.
    pub fn pop(&mut self) -> ViewportState {
        self.frames.pop().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
