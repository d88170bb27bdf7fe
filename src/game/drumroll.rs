/// Score for each input landed while a drumroll window is open.
pub const ROLL_HIT_SCORE: u32 = 10;

/// Close-out bonus per accumulated hit.
pub const ROLL_BONUS_PER_HIT: u32 = 5;

/// Window length used when a drumroll head has no paired end marker in the
/// chart. Observed chart-repair behavior; well-formed charts never take it.
pub const FALLBACK_DURATION_SECS: f64 = 1.0;

/// Sustained-input scoring mode, opened by a hit drumroll head and closed by
/// its end marker or the window timing out. Re-entrant across a song; only
/// one window is ever open at a time.
///
/// While open, any drum input counts a hit with no per-hit timing tier.
#[derive(Debug, Clone, Default)]
pub struct DrumrollState {
    active: bool,
    head_event: usize,
    end_time: f64,
    end_event: Option<usize>,
    hits: u32,
}

impl DrumrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn head_event(&self) -> usize {
        self.head_event
    }

    pub fn end_event(&self) -> Option<usize> {
        self.end_event
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Open the window for a hit drumroll head. The caller resolves
    /// `end_time`/`end_event` by scanning forward from the judge cursor, and
    /// closes any still-open window first.
    pub fn open(&mut self, head_event: usize, end_time: f64, end_event: Option<usize>) {
        debug_assert!(!self.active, "drumroll window opened twice");
        self.active = true;
        self.head_event = head_event;
        self.end_time = end_time;
        self.end_event = end_event;
        self.hits = 0;
    }

    /// Count one input landed inside the window; returns its score value.
    pub fn record_hit(&mut self) -> u32 {
        self.hits += 1;
        ROLL_HIT_SCORE
    }

    /// Close the window and reset. Returns `(hits, bonus)` where the bonus is
    /// proportional to the accumulated hit count.
    pub fn close(&mut self) -> (u32, u32) {
        let hits = self.hits;
        let bonus = hits * ROLL_BONUS_PER_HIT;
        *self = Self::default();
        (hits, bonus)
    }
}
