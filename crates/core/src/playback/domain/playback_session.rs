use super::highlight::{HighlightInstruction, HighlightSink};
use super::playback_transport::PlaybackTransport;
use super::sync_scheduler::{SchedulerState, SyncScheduler};
use crate::alignment::domain::position_map::PositionMap;
use crate::transcript::domain::transcribed_word::TranscribedWord;

/// Follow-along controller tying a transport, the sync scheduler and a
/// highlight sink together.
///
/// Pausing keeps the scan position so resuming continues in place; every
/// seek or stop resets it and clears the sink before playback moves.
pub struct PlaybackSession<'a> {
    scheduler: SyncScheduler<'a>,
    words: &'a [TranscribedWord],
    position_map: &'a PositionMap,
    state: SchedulerState,
    transport: Box<dyn PlaybackTransport>,
    sink: Box<dyn HighlightSink>,
    running: bool,
    started: bool,
}

impl<'a> PlaybackSession<'a> {
    pub fn new(
        words: &'a [TranscribedWord],
        position_map: &'a PositionMap,
        transport: Box<dyn PlaybackTransport>,
        sink: Box<dyn HighlightSink>,
    ) -> Self {
        Self {
            scheduler: SyncScheduler::new(words, position_map),
            words,
            position_map,
            state: SchedulerState::new(),
            transport,
            sink,
            running: false,
            started: false,
        }
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn position(&self) -> f64 {
        self.transport.position()
    }

    /// Starts from the beginning, or resumes in place after a pause.
    pub fn play(&mut self) {
        if self.running {
            return;
        }
        if self.started {
            self.transport.resume();
        } else {
            self.reset();
            self.transport.play(0.0);
            self.state.playback_offset = 0.0;
            self.started = true;
        }
        self.running = true;
        log::info!("Playback started at {:.2}s", self.transport.position());
        self.poll();
    }

    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.transport.pause();
        self.running = false;
        log::info!("Playback paused at {:.2}s", self.transport.position());
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Jumps to `seconds` (clamped at zero) and keeps playing from there.
    pub fn seek(&mut self, seconds: f64) {
        let target = seconds.max(0.0);
        self.reset();
        self.transport.play(target);
        self.state.playback_offset = target;
        self.started = true;
        self.running = true;
        log::info!("Seeking to {target:.2}s");
        self.poll();
    }

    pub fn rewind(&mut self, seconds: f64) {
        let current = self.transport.position();
        log::info!(
            "Rewinding from {current:.2}s to {:.2}s",
            (current - seconds).max(0.0)
        );
        self.seek(current - seconds);
    }

    /// Seeks to the narration of the manuscript word at byte `offset`.
    ///
    /// Returns the target time, or `None` when nothing narrated maps there.
    pub fn seek_to_char(&mut self, offset: usize) -> Option<f64> {
        let index = self.position_map.transcript_index_at(offset)?;
        let start = self.words.get(index)?.start_time;
        self.seek(start);
        Some(start)
    }

    pub fn stop(&mut self) {
        self.transport.stop();
        self.reset();
        self.state.playback_offset = 0.0;
        self.running = false;
        self.started = false;
        log::info!("Playback stopped");
    }

    /// One scheduler tick against the transport's current position.
    ///
    /// Does nothing while paused or stopped; marks the session stopped once
    /// the transport reaches the end.
    pub fn poll(&mut self) -> Option<HighlightInstruction> {
        if !self.running {
            return None;
        }
        let now = self.transport.position();
        let instruction = self.scheduler.tick(&mut self.state, now);
        if let Some(ref i) = instruction {
            self.sink.apply(i);
        }
        if self.transport.is_finished() {
            self.running = false;
            log::info!("Playback finished at {now:.2}s");
        }
        instruction
    }

    fn reset(&mut self) {
        let clear = self.scheduler.reset(&mut self.state);
        self.sink.apply(&clear);
    }
}
