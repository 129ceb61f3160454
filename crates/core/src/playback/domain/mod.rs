pub mod highlight;
pub mod playback_session;
pub mod playback_transport;
pub mod sync_scheduler;
