use crate::prelude::*;

/// Why a command was refused. The game state is untouched when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("{0} is not reachable this turn")]
    InvalidDestination(Coord),

    #[error("{0} is occupied by another unit")]
    Occupied(Coord),

    #[error("not enough skill points: needs {cost}, has {available}")]
    InsufficientSkillPoints { cost: f32, available: f32 },

    #[error("there is no skill in slot {0}")]
    UnknownSkillSlot(u8),

    #[error("the target is already defeated")]
    TargetAlreadyDefeated,

    #[error("no opponent left to target")]
    NoTarget,

    #[error("a unit can't target itself")]
    SelfTarget,

    #[error("the target is on the same side")]
    FriendlyTarget,

    #[error("it's not the turn of {0}")]
    NotUnitsTurn(UnitId),

    #[error("there is no unit {0}")]
    UnknownUnit(UnitId),

    #[error("the turn is over, end it first")]
    TurnAlreadyResolved,

    #[error("there is no item here")]
    NoItemHere,

    #[error("the game is over")]
    GameOver,
}

/// Why a game couldn't be set up from its settings
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    MapGen(#[from] MapGenError),

    #[error("the roster is empty")]
    EmptyRoster,

    #[error("no free tile left to place a {0:?}")]
    NoRoom(UnitKind),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("malformed settings: {0}")]
    Parse(#[from] ron::de::SpannedError),

    #[error("settings can't be written: {0}")]
    Write(#[from] ron::Error),
}
