/// Domain interface for the audio transport driving follow-along.
///
/// Positions are absolute seconds from the start of the recording.
pub trait PlaybackTransport: Send {
    /// Start playing at `from_seconds`, replacing any current playback.
    fn play(&mut self, from_seconds: f64);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    fn position(&self) -> f64;
    /// True once playback has reached the end of the recording.
    fn is_finished(&self) -> bool;
}
