use std::time::Instant;

use crate::playback::domain::playback_transport::PlaybackTransport;

/// Wall-clock stand-in for an audio player.
///
/// Position advances with real time scaled by `speed` and stops at
/// `duration`. Useful for driving follow-along without decoding audio.
pub struct SimulatedTransport {
    duration: f64,
    speed: f64,
    base: f64,
    started_at: Option<Instant>,
}

impl SimulatedTransport {
    pub fn new(duration: f64, speed: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            speed: if speed > 0.0 { speed } else { 1.0 },
            base: 0.0,
            started_at: None,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }
}

impl PlaybackTransport for SimulatedTransport {
    fn play(&mut self, from_seconds: f64) {
        self.base = from_seconds.clamp(0.0, self.duration);
        self.started_at = Some(Instant::now());
    }

    fn pause(&mut self) {
        self.base = self.position();
        self.started_at = None;
    }

    fn resume(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        self.base = 0.0;
        self.started_at = None;
    }

    fn position(&self) -> f64 {
        let elapsed = self
            .started_at
            .map_or(0.0, |t| t.elapsed().as_secs_f64() * self.speed);
        (self.base + elapsed).min(self.duration)
    }

    fn is_finished(&self) -> bool {
        self.position() >= self.duration
    }
}
