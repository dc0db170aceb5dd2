use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-topic aggregate. `streak` counts consecutive correct answers and
/// resets to zero on any miss. Invariant: `correct <= total`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicStat {
    pub correct: u32,
    pub total: u32,
    pub streak: u32,
}

impl TopicStat {
    /// Accuracy as a rounded percentage; 0 for an unattempted topic.
    pub fn accuracy_percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.correct * 100 + self.total / 2) / self.total
        }
    }
}

/// All progress for one user. The wire format (remote store and local cache)
/// is a single flat JSON object with topic ids as keys plus the reserved
/// scalar keys `email` and `totalXp`; serde flatten keeps the scalars out of
/// the topic map so aggregation never has to filter reserved keys.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "totalXp", skip_serializing_if = "Option::is_none")]
    pub total_xp: Option<f64>,
    #[serde(flatten)]
    pub topics: HashMap<String, TopicStat>,
}

impl UserStats {
    /// Fold one answered question into the stats. Pure: returns the updated
    /// copy and leaves `self` untouched; the caller persists the result.
    pub fn record_answer(&self, topic_id: &str, correct: bool, email: &str) -> UserStats {
        let mut next = self.clone();
        let stat = next.topics.entry(topic_id.to_string()).or_default();
        if correct {
            stat.correct += 1;
            stat.streak += 1;
        } else {
            stat.streak = 0;
        }
        stat.total += 1;
        next.email = Some(email.to_string());
        next
    }

    pub fn total_correct(&self) -> u32 {
        self.topics.values().map(|t| t.correct).sum()
    }

    /// Stat for a topic, zeroed if never attempted.
    pub fn topic(&self, topic_id: &str) -> TopicStat {
        self.topics.get(topic_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_answer_creates_entry() {
        let stats = UserStats::default();
        let next = stats.record_answer("syllogisms", true, "cadet@example.com");
        assert_eq!(
            next.topic("syllogisms"),
            TopicStat {
                correct: 1,
                total: 1,
                streak: 1
            }
        );
        assert_eq!(next.email.as_deref(), Some("cadet@example.com"));
        // Input untouched
        assert!(stats.topics.is_empty());
    }

    #[test]
    fn streak_resets_on_miss() {
        let mut stats = UserStats::default();
        for &correct in &[true, true, false, true] {
            stats = stats.record_answer("inequalities", correct, "a@b.c");
        }
        assert_eq!(
            stats.topic("inequalities"),
            TopicStat {
                correct: 3,
                total: 4,
                streak: 1
            }
        );
    }

    #[test]
    fn correct_never_exceeds_total() {
        let mut stats = UserStats::default();
        let outcomes = [true, false, true, true, false, false, true];
        for &correct in &outcomes {
            stats = stats.record_answer("puzzle_test", correct, "a@b.c");
            let stat = stats.topic("puzzle_test");
            assert!(stat.correct <= stat.total);
        }
    }

    #[test]
    fn total_correct_spans_topics_and_ignores_metadata() {
        let mut stats = UserStats {
            email: Some("a@b.c".into()),
            total_xp: Some(420.0),
            ..Default::default()
        };
        assert_eq!(stats.total_correct(), 0);
        stats = stats.record_answer("syllogisms", true, "a@b.c");
        stats = stats.record_answer("inequalities", true, "a@b.c");
        stats = stats.record_answer("inequalities", false, "a@b.c");
        assert_eq!(stats.total_correct(), 2);
    }

    #[test]
    fn accuracy_rounds() {
        let stat = TopicStat {
            correct: 2,
            total: 3,
            streak: 0
        };
        assert_eq!(stat.accuracy_percent(), 67);
        assert_eq!(TopicStat::default().accuracy_percent(), 0);
    }

    #[test]
    fn wire_format_flattens_reserved_keys() {
        let stats = UserStats::default().record_answer("syllogisms", true, "a@b.c");
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["email"], "a@b.c");
        assert_eq!(json["syllogisms"]["correct"], 1);
        // totalXp is never invented by us
        assert!(json.get("totalXp").is_none());
    }

    #[test]
    fn wire_format_round_trips_remote_payload() {
        let body = r#"{
            "email": "a@b.c",
            "totalXp": 12,
            "syllogisms": {"correct": 4, "total": 6, "streak": 2}
        }"#;
        let stats: UserStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.email.as_deref(), Some("a@b.c"));
        assert_eq!(stats.total_xp, Some(12.0));
        assert_eq!(stats.topics.len(), 1);
        assert_eq!(stats.total_correct(), 4);
    }
}
