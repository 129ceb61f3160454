use super::highlight::HighlightInstruction;
use crate::alignment::domain::position_map::PositionMap;
use crate::transcript::domain::transcribed_word::TranscribedWord;

/// Mutable follow-along state, owned by the caller and passed to every
/// `tick`/`reset`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SchedulerState {
    /// Last transcript word the scan settled on, highlighted or not.
    pub last_highlighted_index: Option<usize>,
    /// Playback position of the last seek, in seconds.
    pub playback_offset: f64,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    fn scan_start(&self) -> usize {
        self.last_highlighted_index.map_or(0, |i| i + 1)
    }
}

/// Keeps a manuscript highlight in step with playback time.
///
/// The scan only moves forward from the last settled word, so every
/// seek, rewind or restart must go through [`reset`](Self::reset) first.
/// Not meant for concurrent use: serialize all calls on one state.
pub struct SyncScheduler<'a> {
    words: &'a [TranscribedWord],
    position_map: &'a PositionMap,
}

impl<'a> SyncScheduler<'a> {
    pub fn new(words: &'a [TranscribedWord], position_map: &'a PositionMap) -> Self {
        Self {
            words,
            position_map,
        }
    }

    /// Advances to the first word after the last settled one whose
    /// `[start, end)` contains `now`.
    ///
    /// A mapped word yields a `Highlight`; an unmapped (inserted) word
    /// advances the state silently. Gaps, times before the current word and
    /// the end of the transcript leave the state untouched. The scan stops
    /// at the first word starting after `now`, since starts never decrease.
    pub fn tick(&self, state: &mut SchedulerState, now: f64) -> Option<HighlightInstruction> {
        let from = state.scan_start();
        let offset = self
            .words
            .get(from..)?
            .iter()
            .take_while(|w| w.start_time <= now)
            .position(|w| w.contains(now))?;
        let index = from + offset;
        state.last_highlighted_index = Some(index);

        let word = &self.words[index].word;
        match self.position_map.get(index) {
            Some(range) => {
                log::debug!(
                    "t={now:.2}s: highlighting '{word}' (index {index}) at {}..{}",
                    range.start,
                    range.end
                );
                Some(HighlightInstruction::Highlight {
                    transcript_index: index,
                    range,
                })
            }
            None => {
                log::debug!("t={now:.2}s: '{word}' (index {index}) not in manuscript");
                None
            }
        }
    }

    /// Forgets the scan position; the next tick scans from the first word.
    pub fn reset(&self, state: &mut SchedulerState) -> HighlightInstruction {
        state.last_highlighted_index = None;
        HighlightInstruction::Clear
    }
}
