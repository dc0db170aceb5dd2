use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::TopicDef;
use crate::stats::UserStats;
use crate::ui::theme::Theme;

/// Scrollless topic picker with per-topic lifetime accuracy.
pub struct TopicList<'a> {
    pub title: String,
    pub topics: Vec<&'static TopicDef>,
    pub selected: usize,
    pub stats: &'a UserStats,
    pub theme: &'a Theme,
}

impl Widget for &TopicList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::with_capacity(self.topics.len() * 2 + 1);
        lines.push(Line::from(""));
        for (i, topic) in self.topics.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let stat = self.stats.topic(topic.id);

            let record = if stat.total == 0 {
                "unplayed".to_string()
            } else {
                format!("{}% ({}/{})", stat.accuracy_percent(), stat.correct, stat.total)
            };

            let name_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });
            let record_style = Style::default().fg(if stat.total == 0 {
                colors.dim()
            } else if stat.accuracy_percent() >= 60 {
                colors.success()
            } else {
                colors.warning()
            });

            lines.push(Line::from(vec![
                Span::styled(format!(" {indicator} {:<28}", topic.name), name_style),
                Span::styled(record, record_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("     {}", topic.description),
                Style::default().fg(colors.dim()),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, Mode};

    #[test]
    fn renders_without_panic_on_small_area() {
        let theme = Theme::default();
        let stats = UserStats::default();
        let list = TopicList {
            title: "Quick Modes".to_string(),
            topics: catalog::topics_for(Mode::Quick),
            selected: 0,
            stats: &stats,
            theme: &theme,
        };
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        (&list).render(area, &mut buf);
    }
}
