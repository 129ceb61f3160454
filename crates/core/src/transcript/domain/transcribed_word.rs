/// One recognized spoken word with its timing and recognizer confidence.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscribedWord {
    pub word: String,
    pub start_time: f64,
    pub end_time: f64,
    pub probability: f64,
}

impl TranscribedWord {
    pub fn new(word: impl Into<String>, start_time: f64, end_time: f64, probability: f64) -> Self {
        Self {
            word: word.into(),
            start_time,
            end_time,
            probability,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether `seconds` falls in `[start_time, end_time)`.
    pub fn contains(&self, seconds: f64) -> bool {
        self.start_time <= seconds && seconds < self.end_time
    }
}
