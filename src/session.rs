use crate::generator::Question;

/// Questions per quiz run.
pub const QUIZ_LENGTH: usize = 5;

/// One run through a fixed-length sequence of questions for a single topic.
/// Created when a quiz starts, dropped when it ends or is exited.
pub struct QuizSession {
    pub topic_id: &'static str,
    /// Zero-based position in the run.
    pub index: usize,
    /// Per-question correctness, in answer order.
    pub results: Vec<bool>,
    pub question: Option<Question>,
    /// Committed option for the current question; an answer is accepted
    /// exactly once.
    pub selected: Option<usize>,
    /// True while a question fetch is outstanding.
    pub loading: bool,
}

impl QuizSession {
    pub fn new(topic_id: &'static str) -> Self {
        Self {
            topic_id,
            index: 0,
            results: Vec::new(),
            question: None,
            selected: None,
            loading: true,
        }
    }

    pub fn answered(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= QUIZ_LENGTH
    }

    pub fn score(&self) -> usize {
        self.results.iter().filter(|&&r| r).count()
    }

    pub fn accuracy_percent(&self) -> u32 {
        (self.score() * 100 / QUIZ_LENGTH) as u32
    }

    /// Fraction of the run already behind the user, for the progress bar.
    pub fn progress(&self) -> f64 {
        self.index as f64 / QUIZ_LENGTH as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_loading_and_unanswered() {
        let quiz = QuizSession::new("syllogisms");
        assert_eq!(quiz.index, 0);
        assert!(quiz.results.is_empty());
        assert!(quiz.loading);
        assert!(!quiz.answered());
        assert_eq!(quiz.progress(), 0.0);
    }

    #[test]
    fn score_and_accuracy() {
        let mut quiz = QuizSession::new("syllogisms");
        quiz.results = vec![true, false, true, true, false];
        assert_eq!(quiz.score(), 3);
        assert_eq!(quiz.accuracy_percent(), 60);
    }

    #[test]
    fn last_question_detection() {
        let mut quiz = QuizSession::new("syllogisms");
        assert!(!quiz.is_last());
        quiz.index = QUIZ_LENGTH - 1;
        assert!(quiz.is_last());
    }
}
