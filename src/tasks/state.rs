/// Progress of the completion collector.
///
/// Starts at `Pending(n)` for `n` launched builders and moves down by one
/// for every consumed readiness signal until it reaches `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    Pending(usize),
    Done,
}

impl CollectorState {
    pub fn new(launched: usize) -> Self {
        if launched == 0 {
            CollectorState::Done
        } else {
            CollectorState::Pending(launched)
        }
    }

    /// Consumes one signal. Advancing `Done` stays `Done`.
    pub fn advance(self) -> Self {
        match self {
            CollectorState::Pending(remaining) if remaining > 1 => {
                CollectorState::Pending(remaining - 1)
            }
            _ => CollectorState::Done,
        }
    }

    pub fn remaining(&self) -> usize {
        match self {
            CollectorState::Pending(remaining) => *remaining,
            CollectorState::Done => 0,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, CollectorState::Done)
    }
}
