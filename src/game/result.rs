use super::score::ScoreState;

/// Immutable summary of a play session, taken when the host leaves gameplay.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayResult {
    pub score: u32,
    pub max_combo: u32,
    pub good_count: u32,
    pub okay_count: u32,
    pub miss_count: u32,
    pub accuracy: f64,
    pub gauge: f64,
    pub total_notes: u32,
}

impl PlayResult {
    pub fn from_score(score: &ScoreState, total_notes: u32) -> Self {
        Self {
            score: score.score,
            max_combo: score.max_combo,
            good_count: score.good_count,
            okay_count: score.okay_count,
            miss_count: score.miss_count,
            accuracy: score.accuracy(),
            gauge: score.gauge,
            total_notes,
        }
    }

    /// Every judgeable note was hit (no misses).
    pub fn is_full_combo(&self) -> bool {
        self.miss_count == 0
    }
}
