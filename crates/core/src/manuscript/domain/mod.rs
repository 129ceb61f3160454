pub mod manuscript;
pub mod manuscript_parser;
pub mod sentence_context;
