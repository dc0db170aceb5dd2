/// A rank tier. `color` is a hex string in the same format the theme files
/// use; render code parses it with `ThemeColors::parse_color`.
#[derive(Debug, PartialEq, Eq)]
pub struct RankTier {
    pub threshold: u32,
    pub name: &'static str,
    pub color: &'static str,
}

/// Ascending by threshold. The first entry doubles as the guaranteed default.
pub const RANK_TIERS: &[RankTier] = &[
    RankTier {
        threshold: 0,
        name: "Space Cadet",
        color: "#9ca3af",
    },
    RankTier {
        threshold: 20,
        name: "Star Navigator",
        color: "#60a5fa",
    },
    RankTier {
        threshold: 50,
        name: "Nebula Walker",
        color: "#c084fc",
    },
    RankTier {
        threshold: 100,
        name: "Cosmic Master",
        color: "#facc15",
    },
    RankTier {
        threshold: 200,
        name: "Galactic Deity",
        color: "#ef4444",
    },
];

/// Highest tier whose threshold does not exceed `total_correct`.
pub fn rank_for(total_correct: u32) -> &'static RankTier {
    RANK_TIERS
        .iter()
        .rev()
        .find(|r| total_correct >= r.threshold)
        .unwrap_or(&RANK_TIERS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_gets_lowest_tier() {
        assert_eq!(rank_for(0).name, "Space Cadet");
    }

    #[test]
    fn boundary_at_twenty() {
        assert_eq!(rank_for(19).name, "Space Cadet");
        assert_eq!(rank_for(20).name, "Star Navigator");
    }

    #[test]
    fn top_tier_is_unbounded() {
        assert_eq!(rank_for(200).name, "Galactic Deity");
        assert_eq!(rank_for(10_000).name, "Galactic Deity");
    }

    #[test]
    fn monotonic_non_decreasing() {
        let mut last_threshold = 0;
        for total in 0..300 {
            let tier = rank_for(total);
            assert!(tier.threshold >= last_threshold);
            assert!(tier.threshold <= total.max(0));
            last_threshold = tier.threshold;
        }
    }

    #[test]
    fn pure_and_idempotent() {
        assert_eq!(rank_for(57), rank_for(57));
    }

    #[test]
    fn table_is_ascending() {
        for pair in RANK_TIERS.windows(2) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
    }
}
