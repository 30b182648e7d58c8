use crossterm::event::{self, Event};
use skirmish_core::prelude::*;

use crate::Keybinds;

#[derive(Debug, Clone, Default)]
pub struct GameInput {
    pub acc: Coord,
    pub select: bool,
    pub quit: bool,
    pub toggle_help: bool,
    pub next_target: bool,
    pub attack: bool,
    /// 1-based, the last skill key pressed wins
    pub skill: Option<u8>,
    pub pickup: bool,
    pub end_turn: bool,
    pub toggle_pause_queue: bool,
    pub step_queue: bool,
}

impl GameInput {
    pub fn from_events(keybinds: &Keybinds, events: &[Event]) -> Self {
        let mut input = GameInput::default();
        for event in events.iter() {
            if let Event::Key(key) = event {
                if key.kind == event::KeyEventKind::Press {
                    if key.code == keybinds.pause {
                        input.quit = true;
                    }
                    if key.code == keybinds.help {
                        input.toggle_help = true;
                    }
                    if key.code == keybinds.left {
                        input.acc.x -= 1;
                    }
                    if key.code == keybinds.right {
                        input.acc.x += 1;
                    }
                    if key.code == keybinds.up {
                        input.acc.y -= 1;
                    }
                    if key.code == keybinds.down {
                        input.acc.y += 1;
                    }
                    if key.code == keybinds.fast_left {
                        input.acc.x -= 10;
                    }
                    if key.code == keybinds.fast_right {
                        input.acc.x += 10;
                    }
                    if key.code == keybinds.fast_up {
                        input.acc.y -= 10;
                    }
                    if key.code == keybinds.fast_down {
                        input.acc.y += 10;
                    }
                    if key.code == keybinds.forward {
                        input.select = true;
                    }
                    if key.code == keybinds.next_target {
                        input.next_target = true;
                    }
                    if key.code == keybinds.attack {
                        input.attack = true;
                    }
                    if key.code == keybinds.skill_1 {
                        input.skill = Some(1);
                    }
                    if key.code == keybinds.skill_2 {
                        input.skill = Some(2);
                    }
                    if key.code == keybinds.skill_3 {
                        input.skill = Some(3);
                    }
                    if key.code == keybinds.pickup {
                        input.pickup = true;
                    }
                    if key.code == keybinds.end_turn {
                        input.end_turn = true;
                    }
                    if key.code == keybinds.pause_queue {
                        input.toggle_pause_queue = true;
                    }
                    if key.code == keybinds.step_queue {
                        input.step_queue = true;
                    }
                }
            }
        }
        input
    }

    /// The command the keys ask of the current unit, with the cursor as destination or target.
    /// Nothing for machine controlled units, they play by themselves.
    pub fn command(&self, game: &Game, cursor: Coord) -> Option<Command> {
        let unit = game.current_unit()?;
        if unit.controller != Controller::Human {
            return None;
        }
        let target = game
            .unit_at(&cursor)
            .filter(|other| other.id != unit.id)
            .map(|other| other.id);

        if self.end_turn {
            Some(Command::EndTurn)
        } else if let Some(slot) = self.skill {
            Some(Command::Skill {
                unit: unit.id,
                slot,
                target,
            })
        } else if self.attack {
            target.map(|target| Command::Attack {
                unit: unit.id,
                target,
            })
        } else if self.pickup {
            Some(Command::Pickup { unit: unit.id })
        } else if self.select {
            Some(Command::Move {
                unit: unit.id,
                to: cursor,
            })
        } else {
            None
        }
    }
}

/// Next living opponent of `unit` after the one under the cursor, nearest first
pub fn cycle_target(game: &Game, unit: &Unit, cursor: Coord) -> Option<Coord> {
    let opponents = opponents_by_distance(&game.units, unit);
    let current = opponents
        .iter()
        .position(|id| game.unit(*id).is_some_and(|u| u.at == cursor));
    let next = match current {
        Some(i) => opponents.get((i + 1) % opponents.len()),
        None => opponents.first(),
    }?;
    game.unit(*next).map(|u| u.at)
}
