use ratatui::{prelude::*, widgets::*};
use skirmish_core::prelude::*;

use super::faction_color;

#[derive(Debug, Clone, Copy)]
pub struct UnitStatsWidget<'a> {
    pub unit: &'a Unit,
}

impl<'a> UnitStatsWidget<'a> {
    pub const HEIGHT: u16 = 13;

    fn rows(&self) -> Vec<Row<'a>> {
        let unit = self.unit;
        let mut rows = vec![
            Row::new(vec![
                Line::from("Health"),
                Line::from(format!("{:.0}", unit.health)).style(if unit.is_defeated() {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default()
                }),
            ]),
            Row::new(vec![
                Line::from("Attack"),
                Line::from(format!("{:.1}", unit.attack)),
            ]),
            Row::new(vec![Line::from("Speed"), Line::from(unit.speed.to_string())]),
            Row::new(vec![
                Line::from("Skill"),
                Line::from(format!("{:.1}/{:.0}", unit.skill_points, unit.max_skill_points)),
            ]),
            Row::new(vec![
                Line::from("Weapon"),
                Line::from(match unit.weapon {
                    Some(weapon) => format!("+{:.0}", weapon.attack_boost),
                    None => "none".to_string(),
                }),
            ]),
        ];

        let status: Vec<&str> = [
            (unit.status.shielded, "shield"),
            (unit.status.vanished, "hidden"),
            (unit.status.eagle_vision, "eagle"),
        ]
        .into_iter()
        .filter_map(|(active, name)| active.then_some(name))
        .collect();
        if !status.is_empty() {
            rows.push(Row::new(vec![
                Line::from("Status"),
                Line::from(status.join(" ")),
            ]));
        }

        rows.push(Row::new(vec![Line::from(""), Line::from("")]));
        for slot in 1..=SKILL_SLOTS {
            let Some(skill) = skill_for(unit.kind, slot) else {
                continue;
            };
            let style = if unit.can_afford(skill.cost) {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            rows.push(
                Row::new(vec![
                    Line::from(format!("{} ({:.0})", slot, skill.cost)),
                    Line::from(skill.id.name()),
                ])
                .style(style),
            );
        }
        rows
    }
}

impl<'a> Widget for UnitStatsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear::default().render(area, buf);
        let title = format!(" {} {} ", self.unit.kind.name(), self.unit.id);
        let block = Block::bordered()
            .border_type(BorderType::QuadrantOutside)
            .title(title)
            .border_style(Style::default().fg(faction_color(self.unit.faction())));
        let table = Table::new(self.rows(), [Constraint::Length(8), Constraint::Fill(1)]).block(block);
        Widget::render(table, area, buf);
    }
}
