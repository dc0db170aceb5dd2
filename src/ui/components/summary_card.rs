use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::rank::rank_for;
use crate::session::{QUIZ_LENGTH, QuizSession};
use crate::stats::UserStats;
use crate::ui::theme::{Theme, ThemeColors};

/// End-of-run card: score, per-question pips, and the lifetime rank.
pub struct SummaryCard<'a> {
    pub quiz: &'a QuizSession,
    pub stats: &'a UserStats,
    pub topic_name: &'a str,
    pub theme: &'a Theme,
}

impl SummaryCard<'_> {
    fn verdict(&self) -> &'static str {
        match self.quiz.score() {
            5 => "Flawless run.",
            4 => "Sharp. One slipped through.",
            3 => "Solid, room to grow.",
            _ => "Rough orbit. Run it again.",
        }
    }
}

impl Widget for &SummaryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Span::styled(
                " Run Complete ",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut pips: Vec<Span> = Vec::with_capacity(QUIZ_LENGTH * 2);
        for &correct in &self.quiz.results {
            let color = if correct { colors.success() } else { colors.error() };
            pips.push(Span::styled("\u{25cf}", Style::default().fg(color)));
            pips.push(Span::raw(" "));
        }

        let rank = rank_for(self.stats.total_correct());
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.topic_name.to_string(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} / {}", self.quiz.score(), QUIZ_LENGTH),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{}% accuracy", self.quiz.accuracy_percent()),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(pips),
            Line::from(""),
            Line::from(Span::styled(
                self.verdict(),
                Style::default().fg(colors.dim()),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Rank: ", Style::default().fg(colors.dim())),
                Span::styled(
                    rank.name,
                    Style::default()
                        .fg(ThemeColors::parse_color(rank.color))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" ({} lifetime correct)", self.stats.total_correct()),
                    Style::default().fg(colors.dim()),
                ),
            ]),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_full_run_without_panic() {
        let theme = Theme::default();
        let mut quiz = QuizSession::new("syllogisms");
        quiz.results = vec![true, false, true, true, false];
        quiz.index = QUIZ_LENGTH - 1;
        let stats = UserStats::default();
        let card = SummaryCard {
            quiz: &quiz,
            stats: &stats,
            topic_name: "Syllogisms",
            theme: &theme,
        };
        let area = Rect::new(0, 0, 50, 16);
        let mut buf = Buffer::empty(area);
        (&card).render(area, &mut buf);
    }

    #[test]
    fn verdict_tracks_score() {
        let theme = Theme::default();
        let stats = UserStats::default();
        let mut quiz = QuizSession::new("syllogisms");
        quiz.results = vec![true; 5];
        let card = SummaryCard {
            quiz: &quiz,
            stats: &stats,
            topic_name: "Syllogisms",
            theme: &theme,
        };
        assert_eq!(card.verdict(), "Flawless run.");
    }
}
