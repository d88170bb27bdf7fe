use serde::{Deserialize, Serialize};

/// Judgement tier for a single note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Judgement {
    Good,
    Okay,
    Miss,
}

impl Judgement {
    pub fn score(self) -> u32 {
        match self {
            Judgement::Good => 100,
            Judgement::Okay => 50,
            Judgement::Miss => 0,
        }
    }

    pub fn breaks_combo(self) -> bool {
        matches!(self, Judgement::Miss)
    }

    /// Gauge change in absolute units on the 0-100 scale.
    pub fn gauge_delta(self) -> f64 {
        match self {
            Judgement::Good => 0.25,
            Judgement::Okay => 0.125,
            Judgement::Miss => -0.25,
        }
    }
}

/// Timing windows in seconds, nested `good < okay < miss`.
/// All boundaries are inclusive.
///
/// The miss window bounds the sweep and input consumption only; it is not a
/// hit tier. A correctly-typed input anywhere inside it lands a hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeWindows {
    #[serde(default = "default_good")]
    pub good_secs: f64,
    #[serde(default = "default_okay")]
    pub okay_secs: f64,
    #[serde(default = "default_miss")]
    pub miss_secs: f64,
}

fn default_good() -> f64 {
    0.042
}

fn default_okay() -> f64 {
    0.108
}

fn default_miss() -> f64 {
    0.125
}

impl Default for JudgeWindows {
    fn default() -> Self {
        Self {
            good_secs: default_good(),
            okay_secs: default_okay(),
            miss_secs: default_miss(),
        }
    }
}

impl JudgeWindows {
    /// Classify a matched hit by its timing error.
    /// `time_diff_secs` = note_time - song_time (positive = early press).
    ///
    /// Returns `None` outside the miss window. Inside it, anything beyond the
    /// good window is Okay, including the sliver between the okay and miss
    /// boundaries.
    pub fn classify(&self, time_diff_secs: f64) -> Option<Judgement> {
        let abs = time_diff_secs.abs();
        if abs <= self.good_secs {
            Some(Judgement::Good)
        } else if abs <= self.miss_secs {
            Some(Judgement::Okay)
        } else {
            None
        }
    }

    /// Too early to consume against the note at the cursor.
    pub fn is_too_early(&self, time_diff_secs: f64) -> bool {
        time_diff_secs > self.miss_secs
    }

    /// The note's whole window has elapsed without a hit.
    pub fn is_elapsed(&self, time_diff_secs: f64) -> bool {
        time_diff_secs < -self.miss_secs
    }
}
