use super::judge::Judgement;

/// Upper bound of the performance gauge.
pub const GAUGE_MAX: f64 = 100.0;

/// Score, combo, accuracy and gauge for one play session.
#[derive(Debug, Clone)]
pub struct ScoreState {
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub good_count: u32,
    pub okay_count: u32,
    pub miss_count: u32,
    /// Bounded accumulator in [0, GAUGE_MAX].
    pub gauge: f64,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            max_combo: 0,
            good_count: 0,
            okay_count: 0,
            miss_count: 0,
            gauge: 0.0,
        }
    }
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, judgement: Judgement) {
        match judgement {
            Judgement::Good => self.good_count += 1,
            Judgement::Okay => self.okay_count += 1,
            Judgement::Miss => self.miss_count += 1,
        }

        self.score += judgement.score();

        if judgement.breaks_combo() {
            self.combo = 0;
        } else {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
        }

        self.gauge = (self.gauge + judgement.gauge_delta()).clamp(0.0, GAUGE_MAX);
    }

    /// Flat score addition outside the tier table (drumroll hits and bonuses).
    pub fn add_bonus(&mut self, points: u32) {
        self.score += points;
    }

    /// Accuracy percentage: `(good + 0.5 * okay) / judged * 100`.
    /// Defined as 0.0 before anything has been judged.
    pub fn accuracy(&self) -> f64 {
        let total = self.good_count + self.okay_count + self.miss_count;
        if total == 0 {
            return 0.0;
        }
        (self.good_count as f64 + 0.5 * self.okay_count as f64) / total as f64 * 100.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_and_okay_build_score_and_combo() {
        let mut s = ScoreState::new();
        s.apply(Judgement::Good);
        assert_eq!(s.score, 100);
        assert_eq!(s.combo, 1);
        s.apply(Judgement::Okay);
        assert_eq!(s.score, 150);
        assert_eq!(s.combo, 2);
        assert_eq!(s.max_combo, 2);
    }

    #[test]
    fn miss_resets_combo_and_is_idempotent() {
        let mut s = ScoreState::new();
        s.apply(Judgement::Good);
        s.apply(Judgement::Miss);
        assert_eq!(s.combo, 0);
        s.apply(Judgement::Miss);
        assert_eq!(s.combo, 0);
        assert_eq!(s.max_combo, 1);
    }

    #[test]
    fn gauge_stays_in_bounds() {
        let mut s = ScoreState::new();
        s.apply(Judgement::Miss);
        assert_eq!(s.gauge, 0.0);
        for _ in 0..800 {
            s.apply(Judgement::Good);
        }
        assert_eq!(s.gauge, GAUGE_MAX);
    }

    #[test]
    fn accuracy_matches_formula() {
        let mut s = ScoreState::new();
        for _ in 0..8 {
            s.apply(Judgement::Good);
        }
        for _ in 0..2 {
            s.apply(Judgement::Okay);
        }
        assert!((s.accuracy() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn accuracy_is_zero_with_no_data() {
        let s = ScoreState::new();
        assert_eq!(s.accuracy(), 0.0);
        assert!(s.accuracy().is_finite());
    }

    #[test]
    fn bonus_points_do_not_touch_combo_or_counts() {
        let mut s = ScoreState::new();
        s.add_bonus(10);
        assert_eq!(s.score, 10);
        assert_eq!(s.combo, 0);
        assert_eq!(s.accuracy(), 0.0);
    }
}
