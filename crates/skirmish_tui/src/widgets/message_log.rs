use std::collections::VecDeque;

use ratatui::{prelude::*, widgets::*};

/// Newest first, older lines fall off the end
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    lines: VecDeque<String>,
}

impl MessageLog {
    pub const CAPACITY: usize = 15;

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_front(line.into());
        self.lines.truncate(Self::CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.lines.iter()
    }
}

pub struct MessageLogWidget<'a> {
    pub log: &'a MessageLog,
}

impl<'a> Widget for MessageLogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear::default().render(area, buf);
        let lines: Vec<Line> = self
            .log
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let style = if i == 0 {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(line.as_str()).style(style)
            })
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::QuadrantOutside)
                    .title(" Log "),
            )
            .render(area, buf);
    }
}
