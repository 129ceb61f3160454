pub mod json_transcript_loader;
