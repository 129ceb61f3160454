pub mod alignment;
pub mod manuscript;
pub mod pipeline;
pub mod playback;
pub mod report;
pub mod shared;
pub mod transcript;
