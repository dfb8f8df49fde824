/// Index of a card inside the dealt deck.
pub type Position = u8;

/// Count type used for pair counts and matched-pair counts.
pub type PairCount = u8;

/// Fixed delay before a mismatched pair is hidden again.
pub const MISMATCH_HIDE_DELAY_MS: u32 = 700;

/// Period of the elapsed-time tick.
pub const TICK_INTERVAL_MS: u32 = 1000;

/// Generation counter of a dealt game.
///
/// Deferred callbacks carry the session they were scheduled under, a callback
/// from a superseded session is ignored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SessionId(u32);

impl SessionId {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Deferred request to hide a mismatched pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HideTask {
    pub session: SessionId,
    pub move_number: u32,
    pub delay_ms: u32,
}
