//! Pane focus and its cycling rules.

/// The pane currently receiving keyboard input.
///
/// Exactly one pane is focused. Cycling order is Groups → Streams → Events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneFocus {
    /// Group list (top left).
    Groups,
    /// Stream list (bottom left).
    Streams,
    /// Event session (right).
    Events,
}

impl PaneFocus {
    /// All panes in cycling order.
    pub const ALL: [PaneFocus; 3] = [PaneFocus::Groups, PaneFocus::Streams, PaneFocus::Events];

    /// Position in [`PaneFocus::ALL`].
    pub fn index(self) -> usize {
        match self {
            PaneFocus::Groups => 0,
            PaneFocus::Streams => 1,
            PaneFocus::Events => 2,
        }
    }

    /// Pane at `index`, wrapping modulo the pane count.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Next pane, wrapping from the last to the first.
    pub fn next(self) -> Self {
        Self::from_index(next_index(self.index(), Self::ALL.len()))
    }

    /// Previous pane, wrapping from the first to the last.
    pub fn previous(self) -> Self {
        Self::from_index(previous_index(self.index(), Self::ALL.len()))
    }
}

/// `(focus + 1) % n`.
pub fn next_index(focus: usize, n: usize) -> usize {
    debug_assert!(n > 0 && focus < n);
    (focus + 1) % n
}

/// `(focus - 1 + n) % n`, written to stay in unsigned arithmetic.
pub fn previous_index(focus: usize, n: usize) -> usize {
    debug_assert!(n > 0 && focus < n);
    (focus + n - 1) % n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_from_zero_wraps_to_last_pane() {
        assert_eq!(previous_index(0, 3), 2);
        assert_eq!(PaneFocus::Groups.previous(), PaneFocus::Events);
    }

    #[test]
    fn previous_wraps_for_any_pane_count() {
        for n in 1..8 {
            assert_eq!(previous_index(0, n), n - 1);
            for focus in 1..n {
                assert_eq!(previous_index(focus, n), focus - 1);
            }
        }
    }

    #[test]
    fn next_cycles_through_all_panes() {
        assert_eq!(PaneFocus::Groups.next(), PaneFocus::Streams);
        assert_eq!(PaneFocus::Streams.next(), PaneFocus::Events);
        assert_eq!(PaneFocus::Events.next(), PaneFocus::Groups);
    }

    #[test]
    fn next_then_previous_is_identity() {
        for pane in PaneFocus::ALL {
            assert_eq!(pane.next().previous(), pane);
        }
    }

    #[test]
    fn index_round_trips() {
        for pane in PaneFocus::ALL {
            assert_eq!(PaneFocus::from_index(pane.index()), pane);
        }
    }
}
