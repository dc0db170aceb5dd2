use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::generator::Question;
use crate::ui::theme::Theme;

/// The active question with its options, and the analysis once answered.
pub struct QuestionCard<'a> {
    pub question: &'a Question,
    pub selected: Option<usize>,
    /// 1-based position shown in the card title.
    pub number: usize,
    pub total: usize,
    pub theme: &'a Theme,
}

impl Widget for &QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let q = self.question;

        let block = Block::bordered()
            .title(Span::styled(
                format!(" Question {} of {} ", self.number, self.total),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Span::styled(
                format!(" {} \u{2219} {} ", q.topic, q.difficulty.as_str()),
                Style::default().fg(colors.dim()),
            ))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            q.text.clone(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )));
        if q.svg.is_some() {
            lines.push(Line::from(Span::styled(
                "(this question includes a diagram; open the web build to view it)",
                Style::default().fg(colors.warning()),
            )));
        }
        lines.push(Line::from(""));

        let answered = self.selected.is_some();
        for (i, option) in q.options.iter().enumerate() {
            let style = match self.selected {
                // Before answering: the full set, pickable
                None => Style::default().fg(colors.fg()),
                Some(picked) => {
                    if !q.degraded && i == q.correct_index {
                        Style::default()
                            .fg(colors.success())
                            .add_modifier(Modifier::BOLD)
                    } else if i == picked {
                        Style::default()
                            .fg(colors.error())
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(colors.dim())
                    }
                }
            };
            lines.push(Line::from(Span::styled(
                format!("  [{}] {}", i + 1, option),
                style,
            )));
        }

        if answered && !q.explanation.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Analysis",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                q.explanation.clone(),
                Style::default().fg(colors.fg()),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::topic_by_id;
    use crate::generator::degraded_question;

    #[test]
    fn renders_degraded_question_without_panic() {
        let theme = Theme::default();
        let q = degraded_question(topic_by_id("syllogisms").unwrap());
        let card = QuestionCard {
            question: &q,
            selected: Some(0),
            number: 1,
            total: 5,
            theme: &theme,
        };
        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        (&card).render(area, &mut buf);
    }
}
