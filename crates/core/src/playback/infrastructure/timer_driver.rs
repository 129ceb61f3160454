use std::time::Duration;

use crossbeam_channel::{select, Receiver};

use crate::playback::domain::playback_session::PlaybackSession;
use crate::shared::constants::DEFAULT_TICK_INTERVAL_MS;

/// Periodic poller for a [`PlaybackSession`].
///
/// Runs on the calling thread, so ticks for one session are never
/// concurrent. Stops when the session stops running (paused, stopped or
/// finished) or when `stop` receives a message or disconnects.
pub struct TimerDriver {
    interval: Duration,
}

impl TimerDriver {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Polls `session` every interval. Returns the number of ticks taken.
    pub fn run(&self, session: &mut PlaybackSession<'_>, stop: &Receiver<()>) -> usize {
        let ticker = crossbeam_channel::tick(self.interval);
        let mut ticks = 0;
        while session.is_running() {
            select! {
                recv(ticker) -> _ => {
                    session.poll();
                    ticks += 1;
                }
                recv(stop) -> _ => {
                    log::debug!("Follow-along timer stopped after {ticks} ticks");
                    break;
                }
            }
        }
        ticks
    }

    pub fn run_to_end(&self, session: &mut PlaybackSession<'_>) -> usize {
        self.run(session, &crossbeam_channel::never())
    }
}

impl Default for TimerDriver {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TICK_INTERVAL_MS))
    }
}
