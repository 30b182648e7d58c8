use serde::{Deserialize, Serialize};

use crate::prelude::*;

pub mod attack;
pub mod end_turn;
pub mod pickup;
pub mod skill;
pub mod travel;

/// Interface for implementation of a command's logic
pub trait Act: Sized {
    type Precondition;

    /// Whether a successful application moves the turn to `TurnResolved`
    const RESOLVES_TURN: bool = true;

    /// Whether the win condition is evaluated after a successful application
    const CHECKS_GAME_OVER: bool = false;

    /// Every valid act of this kind given the precondition, used by the machine
    fn generate(pre: &Self::Precondition, game: &Game) -> Vec<Self>;

    /// Checks that the act can be applied to the game as it is
    fn validate(&self, game: &Game) -> Result<(), CommandError>;

    /// Modifies the game assuming `validate` passed
    fn apply(&self, game: &mut Game) -> Result<GameEvent, CommandError>;
}

/// A decoded player or machine intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move {
        unit: UnitId,
        to: Coord,
    },
    Attack {
        unit: UnitId,
        target: UnitId,
    },
    Skill {
        unit: UnitId,
        slot: u8,
        target: Option<UnitId>,
    },
    Pickup {
        unit: UnitId,
    },
    EndTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Victory,
    Defeat,
}

/// What an accepted command did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Moved {
        unit: UnitId,
        from: Coord,
        to: Coord,
        picked: Vec<Item>,
    },
    Attacked {
        unit: UnitId,
        strike: Strike,
    },
    SkillUsed {
        unit: UnitId,
        used: SkillUse,
    },
    PickedUp {
        unit: UnitId,
        items: Vec<Item>,
    },
    TurnPassed {
        next: UnitId,
    },
}

impl GameEvent {
    /// Line for the message log
    pub fn message(&self, units: &[Unit]) -> String {
        let name = |id: &UnitId| units.get(id.index()).map_or("Unknown", |u| u.kind.name());
        match self {
            GameEvent::Moved { unit, to, .. } => format!("{} moved to {}", name(unit), to),
            GameEvent::Attacked { unit, strike } => {
                format!("{} attacked for {} damage!", name(unit), strike.damage)
            }
            GameEvent::SkillUsed { unit, used } => {
                format!("{} used the skill: {}!", name(unit), used.skill.name())
            }
            GameEvent::PickedUp { unit, items } => {
                let names: Vec<&str> = items.iter().map(|i| i.kind.name()).collect();
                format!("{} picked up {}", name(unit), names.join(" and "))
            }
            GameEvent::TurnPassed { next } => format!("{}'s turn", name(next)),
        }
    }
}

/// Accepted command. Rejections are the `Err(CommandError)` side of the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Applied(GameEvent),
    GameOverTriggered(GameOutcome),
}
