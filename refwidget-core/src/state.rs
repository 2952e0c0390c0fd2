/// What the screen is currently showing.
///
/// Starts at `Loading` and moves exactly once to `Error` or `Ready`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Loading,
    Error(String),
    Ready(String),
}

impl ViewState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Move to `next` if still loading. Returns whether the state changed;
    /// terminal states are never replaced.
    pub fn resolve(&mut self, next: ViewState) -> bool {
        if self.is_terminal() || !next.is_terminal() {
            return false;
        }
        *self = next;
        true
    }
}
