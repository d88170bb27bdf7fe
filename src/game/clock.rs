use log::debug;

use crate::traits::time::TimeProvider;

/// Playback phase of the song clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Uninitialized,
    /// Audio resource not ready yet. Time does not advance; this is a
    /// legitimate hold state, not an error.
    Loading,
    /// Pre-roll countdown before the audio becomes audible.
    Delay,
    Playing,
}

/// Reconciles the audio hardware clock with the frame-driven game loop.
///
/// One `SongClock` exists per play session. The host samples its audio
/// backend once per frame and feeds the reading through [`SongClock::update`];
/// both note movement and judgement then read a single song-time value.
/// Song time is negative during pre-roll and crosses zero exactly when the
/// audio starts.
pub struct SongClock<T: TimeProvider> {
    time: T,
    state: ClockState,
    start_delay_secs: f64,
    /// Wall time at which the pre-roll started.
    delay_started_us: i64,
    /// Two most recent audio-clock samples, newest last, with the wall time
    /// at which each was observed. Used for smoothing.
    prev_sample: f64,
    prev_sample_at_us: i64,
    last_sample: f64,
    last_sample_at_us: i64,
}

impl<T: TimeProvider> SongClock<T> {
    pub fn new(time: T, start_delay_secs: f64) -> Self {
        Self {
            time,
            state: ClockState::Uninitialized,
            start_delay_secs,
            delay_started_us: 0,
            prev_sample: 0.0,
            prev_sample_at_us: 0,
            last_sample: 0.0,
            last_sample_at_us: 0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn time_provider(&self) -> &T {
        &self.time
    }

    /// Begin waiting for the audio resource.
    pub fn begin_loading(&mut self) {
        self.state = ClockState::Loading;
        debug!("song clock: loading");
    }

    /// Audio resource is decodable and scheduled; start the pre-roll.
    /// The audio itself becomes audible `start_delay_secs` later.
    pub fn start(&mut self) {
        self.delay_started_us = self.time.now_us();
        self.state = ClockState::Delay;
        debug!("song clock: pre-roll {:.1}s", self.start_delay_secs);
    }

    /// Per-frame update with the latest audio-clock reading in seconds.
    ///
    /// The `Delay -> Playing` transition is purely time-driven: it fires when
    /// the pre-roll elapses, no external event is required.
    pub fn update(&mut self, audio_position_secs: Option<f64>) {
        match self.state {
            ClockState::Uninitialized | ClockState::Loading => {}
            ClockState::Delay => {
                if self.pre_roll_elapsed() >= self.start_delay_secs {
                    self.state = ClockState::Playing;
                    let now = self.time.now_us();
                    self.prev_sample = 0.0;
                    self.prev_sample_at_us = now;
                    self.last_sample = audio_position_secs.unwrap_or(0.0);
                    self.last_sample_at_us = now;
                    debug!("song clock: playing");
                }
            }
            ClockState::Playing => {
                if let Some(pos) = audio_position_secs {
                    // The audio clock updates at a coarser granularity than
                    // the frame rate; only a changed reading is a new sample.
                    if pos != self.last_sample {
                        self.prev_sample = self.last_sample;
                        self.prev_sample_at_us = self.last_sample_at_us;
                        self.last_sample = pos;
                        self.last_sample_at_us = self.time.now_us();
                    }
                }
            }
        }
    }

    /// Authoritative song time in seconds. Negative during pre-roll, held at
    /// `-start_delay_secs` while uninitialized or loading.
    pub fn song_time(&self) -> f64 {
        match self.state {
            ClockState::Uninitialized | ClockState::Loading => -self.start_delay_secs,
            ClockState::Delay => self.pre_roll_elapsed() - self.start_delay_secs,
            ClockState::Playing => self.last_sample,
        }
    }

    /// Song time smoothed across coarse audio-clock updates.
    ///
    /// Extends the last two audio samples linearly by the fraction of wall
    /// time elapsed since the newest sample, so per-frame readings do not
    /// jump in steps when the audio clock ticks slower than the frame rate.
    pub fn smoothed_song_time(&self) -> f64 {
        if self.state != ClockState::Playing {
            return self.song_time();
        }
        let sample_interval = self.last_sample_at_us - self.prev_sample_at_us;
        if sample_interval <= 0 {
            return self.last_sample;
        }
        let since_last = self.time.now_us() - self.last_sample_at_us;
        let fraction = since_last as f64 / sample_interval as f64;
        self.last_sample + fraction * (self.last_sample - self.prev_sample)
    }

    fn pre_roll_elapsed(&self) -> f64 {
        (self.time.now_us() - self.delay_started_us) as f64 / 1_000_000.0
    }
}
