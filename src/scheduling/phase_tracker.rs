use crate::types::market_phase::MarketStatus;

/// Remembers the last rendered market status so the refresh loop can tell a
/// phase transition from a routine tick.
#[derive(Debug, Default)]
pub struct PhaseTracker {
    last: Option<MarketStatus>,
}

impl PhaseTracker {
    pub fn seeded(status: MarketStatus) -> Self {
        Self { last: Some(status) }
    }

    /// Records `status` and reports whether it differs from the previous one.
    pub fn observe(&mut self, status: MarketStatus) -> bool {
        let changed = self.last != Some(status);
        self.last = Some(status);
        changed
    }
}
