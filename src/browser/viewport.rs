//! Scrollable window over a listing.
//!
//! All operations are pure: they take the listing length and viewport height
//! and return the next state. With a non-empty listing every returned state
//! satisfies `min <= cursor <= max < len` and
//! `max - min + 1 == min(height, len)`. With an empty listing they return the
//! state unchanged.

/// Cursor position and visible slice `[min, max]` of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub cursor: usize,
    pub min: usize,
    pub max: usize,
}

/// Number of rows actually shown for a listing of `len` entries.
fn window(len: usize, height: usize) -> usize {
    height.max(1).min(len)
}

impl ViewportState {
    /// Cursor on the first entry, window anchored at the top.
    pub fn reset(len: usize, height: usize) -> Self {
        if len == 0 {
            return Self::default();
        }
        Self {
            cursor: 0,
            min: 0,
            max: window(len, height) - 1,
        }
    }

    /// Re-establish the invariants against a (possibly different) listing.
    ///
    /// Keeps `min` where it can and only moves the window as far as needed
    /// to fit the listing and contain the cursor.
    pub fn clamp_to(self, len: usize, height: usize) -> Self {
        if len == 0 {
            return Self::default();
        }
        let w = window(len, height);
        let cursor = self.cursor.min(len - 1);
        let min = self.min.min(len - w);
        Self {
            cursor,
            min,
            max: min + w - 1,
        }
        .contain(len, height)
    }

    /// Shift the window by the minimal amount that brings the cursor back in.
    fn contain(mut self, len: usize, height: usize) -> Self {
        let w = window(len, height);
        if self.cursor > self.max {
            self.max = self.cursor;
            self.min = self.max + 1 - w;
        } else if self.cursor < self.min {
            self.min = self.cursor;
            self.max = self.min + w - 1;
        }
        self
    }

    pub fn move_by(self, delta: isize, len: usize, height: usize) -> Self {
        if len == 0 {
            return self;
        }
        let mut next = self.clamp_to(len, height);
        next.cursor = offset(next.cursor, delta).min(len - 1);
        next.contain(len, height)
    }

    pub fn move_to_start(self, len: usize, height: usize) -> Self {
        if len == 0 {
            return self;
        }
        Self::reset(len, height)
    }

    pub fn move_to_end(self, len: usize, height: usize) -> Self {
        if len == 0 {
            return self;
        }
        let w = window(len, height);
        Self {
            cursor: len - 1,
            min: len - w,
            max: len - 1,
        }
    }

    /// Shift cursor and window together by `pages` full viewport heights.
    pub fn page_by(self, pages: isize, len: usize, height: usize) -> Self {
        if len == 0 {
            return self;
        }
        let current = self.clamp_to(len, height);
        let w = window(len, height) as isize;
        let last = len as isize - 1;
        let delta = pages.saturating_mul(height.max(1) as isize);

        let cursor = (current.cursor as isize).saturating_add(delta).clamp(0, last);
        let mut min = (current.min as isize).saturating_add(delta);
        let mut max = (current.max as isize).saturating_add(delta);
        if max > last {
            max = last;
            min = max - w + 1;
        }
        if min < 0 {
            min = 0;
            max = w - 1;
        }

        Self {
            cursor: cursor as usize,
            min: min as usize,
            max: max as usize,
        }
        .contain(len, height)
    }

    /// Apply a new viewport height without moving the cursor.
    pub fn resize(self, len: usize, height: usize) -> Self {
        if len == 0 {
            return self;
        }
        self.clamp_to(len, height)
    }

    #[cfg(test)]
    pub fn contains(&self, index: usize) -> bool {
        (self.min..=self.max).contains(&index)
    }
}

fn offset(index: usize, delta: isize) -> usize {
    if delta < 0 {
        index.saturating_sub(delta.unsigned_abs())
    } else {
        index.saturating_add(delta as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp(cursor: usize, min: usize, max: usize) -> ViewportState {
        ViewportState { cursor, min, max }
    }

    fn assert_invariants(state: ViewportState, len: usize, height: usize) {
        if len == 0 {
            return;
        }
        assert!(state.min <= state.cursor, "{state:?}");
        assert!(state.cursor <= state.max, "{state:?}");
        assert!(state.max < len, "{state:?} len={len}");
        if len >= height {
            assert_eq!(state.max - state.min + 1, height, "{state:?}");
        } else {
            assert_eq!(state.min, 0, "{state:?}");
            assert_eq!(state.max, len - 1, "{state:?}");
        }
    }

    #[test]
    fn reset_fills_window() {
        assert_eq!(ViewportState::reset(20, 5), vp(0, 0, 4));
    }

    #[test]
    fn reset_clamps_to_short_listing() {
        assert_eq!(ViewportState::reset(3, 10), vp(0, 0, 2));
    }

    #[test]
    fn reset_on_empty_listing() {
        assert_eq!(ViewportState::reset(0, 10), ViewportState::default());
    }

    #[test]
    fn move_within_window_does_not_scroll() {
        let s = ViewportState::reset(20, 5).move_by(1, 20, 5);
        assert_eq!(s, vp(1, 0, 4));
    }

    #[test]
    fn move_past_bottom_shifts_by_one() {
        let s = vp(4, 0, 4).move_by(1, 20, 5);
        assert_eq!(s, vp(5, 1, 5));
    }

    #[test]
    fn move_past_top_shifts_by_one() {
        let s = vp(5, 5, 9).move_by(-1, 20, 5);
        assert_eq!(s, vp(4, 4, 8));
    }

    #[test]
    fn large_move_shifts_minimally() {
        // Jumping 7 rows from the middle of the window only scrolls enough
        // to put the cursor on the last visible row.
        let s = vp(2, 0, 4).move_by(7, 20, 5);
        assert_eq!(s, vp(9, 5, 9));
    }

    #[test]
    fn move_clamps_at_ends() {
        assert_eq!(vp(0, 0, 4).move_by(-1, 20, 5), vp(0, 0, 4));
        assert_eq!(vp(19, 15, 19).move_by(1, 20, 5), vp(19, 15, 19));
    }

    #[test]
    fn move_on_empty_listing_is_noop() {
        let s = ViewportState::default();
        assert_eq!(s.move_by(1, 0, 5), s);
        assert_eq!(s.page_by(1, 0, 5), s);
        assert_eq!(s.move_to_end(0, 5), s);
    }

    #[test]
    fn move_to_end_and_start() {
        let s = vp(3, 0, 4).move_to_end(20, 5);
        assert_eq!(s, vp(19, 15, 19));
        assert_eq!(s.move_to_start(20, 5), vp(0, 0, 4));
    }

    #[test]
    fn move_to_end_short_listing() {
        assert_eq!(vp(0, 0, 2).move_to_end(3, 10), vp(2, 0, 2));
    }

    #[test]
    fn page_down_shifts_whole_window() {
        assert_eq!(vp(1, 0, 4).page_by(1, 20, 5), vp(6, 5, 9));
    }

    #[test]
    fn page_down_clamps_at_bottom() {
        assert_eq!(vp(12, 10, 14).page_by(1, 17, 5), vp(16, 12, 16));
        assert_eq!(vp(16, 12, 16).page_by(1, 17, 5), vp(16, 12, 16));
    }

    #[test]
    fn page_up_clamps_at_top() {
        assert_eq!(vp(7, 3, 7).page_by(-1, 20, 5), vp(2, 0, 4));
        assert_eq!(vp(0, 0, 4).page_by(-1, 20, 5), vp(0, 0, 4));
    }

    #[test]
    fn resize_keeps_cursor() {
        let s = vp(6, 5, 9).resize(20, 8);
        assert_eq!(s, vp(6, 5, 12));
    }

    #[test]
    fn resize_shrink_scrolls_to_cursor() {
        let s = vp(9, 5, 9).resize(20, 3);
        assert_eq!(s, vp(9, 7, 9));
    }

    #[test]
    fn resize_grow_near_bottom_pulls_window_up() {
        let s = vp(18, 15, 19).resize(20, 8);
        assert_eq!(s, vp(18, 12, 19));
    }

    #[test]
    fn clamp_to_shorter_listing() {
        let s = vp(30, 28, 32).clamp_to(10, 5);
        assert_eq!(s, vp(9, 5, 9));
    }

    #[test]
    fn containment_holds_over_mixed_sequences() {
        // Deterministic pseudo-random walk over every operation.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for len in [1usize, 2, 3, 7, 10, 31] {
            let mut height = 5usize;
            let mut s = ViewportState::reset(len, height);
            for _ in 0..500 {
                s = match next() % 8 {
                    0 => s.move_by(1, len, height),
                    1 => s.move_by(-1, len, height),
                    2 => s.page_by(1, len, height),
                    3 => s.page_by(-1, len, height),
                    4 => s.move_to_start(len, height),
                    5 => s.move_to_end(len, height),
                    6 => {
                        height = (next() % 12 + 1) as usize;
                        s.resize(len, height)
                    }
                    _ => s.move_by((next() % 9) as isize - 4, len, height),
                };
                assert_invariants(s, len, height);
            }
        }
    }
}
