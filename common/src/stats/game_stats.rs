use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Persistent per-game record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub high_score: u32,
    pub wins: u32,
    /// Fastest win in whole seconds.
    pub best_time_secs: Option<u64>,
}

impl GameStats {
    /// Returns true when `score` beats the stored high score.
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Counts a win and returns true when `elapsed` is a new best time.
    pub fn record_win(&mut self, elapsed: Duration) -> bool {
        self.wins += 1;
        let secs = elapsed.as_secs();
        match self.best_time_secs {
            Some(best) if best <= secs => false,
            _ => {
                self.best_time_secs = Some(secs);
                true
            }
        }
    }

    /// Keeps the better value of each field.
    pub fn merge(&mut self, other: &GameStats) {
        self.high_score = self.high_score.max(other.high_score);
        self.wins = self.wins.max(other.wins);
        self.best_time_secs = match (self.best_time_secs, other.best_time_secs) {
            (Some(mine), Some(theirs)) => Some(mine.min(theirs)),
            (mine, theirs) => mine.or(theirs),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_score_only_grows() {
        let mut stats = GameStats::default();

        assert!(stats.record_score(30));
        assert!(!stats.record_score(30));
        assert!(!stats.record_score(10));
        assert_eq!(stats.high_score, 30);
    }

    #[test]
    fn test_best_time_keeps_fastest() {
        let mut stats = GameStats::default();

        assert!(stats.record_win(Duration::from_secs(90)));
        assert!(stats.record_win(Duration::from_millis(45_500)));
        assert!(!stats.record_win(Duration::from_secs(60)));

        assert_eq!(stats.wins, 3);
        assert_eq!(stats.best_time_secs, Some(45));
    }

    #[test]
    fn test_merge_keeps_best_of_both() {
        let mut unsaved = GameStats {
            high_score: 120,
            wins: 1,
            best_time_secs: None,
        };
        let stored = GameStats {
            high_score: 90,
            wins: 3,
            best_time_secs: Some(200),
        };

        unsaved.merge(&stored);

        assert_eq!(
            unsaved,
            GameStats {
                high_score: 120,
                wins: 3,
                best_time_secs: Some(200),
            }
        );

        unsaved.merge(&GameStats {
            best_time_secs: Some(150),
            ..GameStats::default()
        });
        assert_eq!(unsaved.best_time_secs, Some(150));
    }
}
