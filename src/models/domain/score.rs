use serde::{Deserialize, Serialize};

/// Running tally for a session. Both counters only ever grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreState {
    pub correct_count: u32,
    pub attempts_count: u32,
}

impl ScoreState {
    pub fn record(&mut self, is_correct: bool) {
        self.attempts_count = self.attempts_count.saturating_add(1);
        if is_correct {
            self.correct_count = self.correct_count.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_every_attempt_and_only_correct_answers() {
        let mut score = ScoreState::default();

        score.record(true);
        score.record(false);
        score.record(true);

        assert_eq!(score.attempts_count, 3);
        assert_eq!(score.correct_count, 2);
    }
}
