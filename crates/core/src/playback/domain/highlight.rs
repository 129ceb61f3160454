use crate::shared::char_range::CharRange;

/// Rendering command produced by the sync scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightInstruction {
    /// Remove the current highlight, then highlight `range`.
    Highlight {
        transcript_index: usize,
        range: CharRange,
    },
    /// Remove all highlight state.
    Clear,
}

/// Domain interface for the surface that displays the manuscript.
pub trait HighlightSink: Send {
    fn apply(&mut self, instruction: &HighlightInstruction);
}

/// Sink that discards every instruction.
pub struct NullHighlightSink;

impl HighlightSink for NullHighlightSink {
    fn apply(&mut self, _instruction: &HighlightInstruction) {}
}
