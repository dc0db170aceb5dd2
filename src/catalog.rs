/// The two practice protocols. Quick topics are solvable mentally in under a
/// minute; Deep topics expect a scratchpad and multi-step elimination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Quick,
    Deep,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Quick => "Handy Mode",
            Mode::Deep => "Pen & Paper Mode",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Mode::Quick => "Mental math & quick logic. No pen required.",
            Mode::Deep => "Complex puzzles. Scratchpad required.",
        }
    }

    /// Heading shown above the topic list for this mode.
    pub fn heading(self) -> &'static str {
        match self {
            Mode::Quick => "Quick Drills",
            Mode::Deep => "Deep Space Puzzles",
        }
    }
}

#[derive(Debug)]
pub struct TopicDef {
    pub id: &'static str,
    pub name: &'static str,
    pub mode: Mode,
    pub description: &'static str,
}

impl TopicDef {
    /// Visual/abstract topics get an SVG diagram from the generation service.
    pub fn is_visual(&self) -> bool {
        self.id.contains("visual") || self.id.contains("abstract")
    }
}

pub const SYLLABUS: &[TopicDef] = &[
    // Quick (mental) topics
    TopicDef {
        id: "syllogisms",
        name: "Syllogisms",
        mode: Mode::Quick,
        description: "Venn diagram logic, usually 2-3 statements.",
    },
    TopicDef {
        id: "inequalities",
        name: "Inequalities",
        mode: Mode::Quick,
        description: "Relationship between elements (>, <, =).",
    },
    TopicDef {
        id: "coding_simple",
        name: "Coding/Decoding (Basic)",
        mode: Mode::Quick,
        description: "Letter shifting, number substitution.",
    },
    TopicDef {
        id: "critical_reasoning",
        name: "Critical Reasoning",
        mode: Mode::Quick,
        description: "Assumptions, Strengthening/Weakening arguments.",
    },
    TopicDef {
        id: "classification",
        name: "Odd Man Out",
        mode: Mode::Quick,
        description: "Find the item that does not belong.",
    },
    TopicDef {
        id: "alpha_num",
        name: "Alphabet/Number Test",
        mode: Mode::Quick,
        description: "Position of letters, series completion.",
    },
    TopicDef {
        id: "visual_series",
        name: "Abstract Reasoning (Series)",
        mode: Mode::Quick,
        description: "Visual pattern completion.",
    },
    TopicDef {
        id: "direction_sense",
        name: "Direction Sense (Simple)",
        mode: Mode::Quick,
        description: "Basic navigation logic.",
    },
    // Deep (pen & paper) topics
    TopicDef {
        id: "arrangement_linear",
        name: "Linear Arrangement",
        mode: Mode::Deep,
        description: "Arranging people/items in a row with constraints.",
    },
    TopicDef {
        id: "arrangement_circular",
        name: "Circular Arrangement",
        mode: Mode::Deep,
        description: "Seating arrangements around a table.",
    },
    TopicDef {
        id: "puzzle_test",
        name: "Puzzle Test",
        mode: Mode::Deep,
        description: "Complex multi-variable matching (Day, Person, Item).",
    },
    TopicDef {
        id: "input_output",
        name: "Input-Output",
        mode: Mode::Deep,
        description: "Machine sequential processing logic.",
    },
    TopicDef {
        id: "data_sufficiency",
        name: "Data Sufficiency",
        mode: Mode::Deep,
        description: "Determine if data is sufficient to answer.",
    },
    TopicDef {
        id: "coding_sentence",
        name: "Sentence Coding",
        mode: Mode::Deep,
        description: "Decoding patterns across multiple sentences.",
    },
    TopicDef {
        id: "blood_relations",
        name: "Blood Relations (Complex)",
        mode: Mode::Deep,
        description: "Family tree structures.",
    },
];

pub fn topics_for(mode: Mode) -> Vec<&'static TopicDef> {
    SYLLABUS.iter().filter(|t| t.mode == mode).collect()
}

pub fn topic_by_id(id: &str) -> Option<&'static TopicDef> {
    SYLLABUS.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn mode_filters_are_disjoint_and_cover_syllabus() {
        let quick = topics_for(Mode::Quick);
        let deep = topics_for(Mode::Deep);
        assert!(quick.iter().all(|t| t.mode == Mode::Quick));
        assert!(deep.iter().all(|t| t.mode == Mode::Deep));
        assert_eq!(quick.len() + deep.len(), SYLLABUS.len());
    }

    #[test]
    fn topic_ids_are_unique() {
        let ids: HashSet<&str> = SYLLABUS.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), SYLLABUS.len());
    }

    #[test]
    fn visual_flag_derived_from_id() {
        assert!(topic_by_id("visual_series").unwrap().is_visual());
        assert!(!topic_by_id("syllogisms").unwrap().is_visual());
        assert!(!topic_by_id("puzzle_test").unwrap().is_visual());
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(topic_by_id("blood_relations").unwrap().mode, Mode::Deep);
        assert!(topic_by_id("nope").is_none());
    }
}
