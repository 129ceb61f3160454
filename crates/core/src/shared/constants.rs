/// Characters stripped from both ends of a word before comparison.
pub const NORMALIZE_STRIP_CHARS: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}', ' ',
];

pub const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Context placeholder when a discrepancy has no manuscript anchor.
pub const NO_CONTEXT: &str = "N/A";

/// Confidence assigned to pure deletions (nothing was narrated to measure).
pub const DELETION_CONFIDENCE: f64 = 1.0;

/// Probability substituted when a transcript word carries none.
pub const MISSING_PROBABILITY: f64 = 0.0;

/// Playback poll cadence used by the follow-along timer.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

pub const DEFAULT_REWIND_SECONDS: f64 = 5.0;

/// Paragraph separator used when joining parsed manuscript paragraphs.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

pub const MANUSCRIPT_EXTENSIONS: &[&str] = &["txt", "text", "md"];
