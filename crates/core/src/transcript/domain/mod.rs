pub mod transcribed_word;
pub mod transcript_loader;
