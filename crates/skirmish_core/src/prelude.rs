pub use crate::access::*;
pub use crate::actions::{
    attack::ActAttack, end_turn::ActEndTurn, pickup::ActPickup, skill::ActSkill,
    travel::ActMove, Act, Command, CommandOutcome, GameEvent, GameOutcome,
};
pub use crate::combat::*;
pub use crate::coord::*;
pub use crate::effect::*;
pub use crate::error::*;
pub use crate::game::*;
pub use crate::grid::*;
pub use crate::item::*;
pub use crate::machine::{choose_command, Boulder};
pub use crate::mapgen::*;
pub use crate::settings::*;
pub use crate::skills::*;
pub use crate::terrain::*;
pub use crate::unit::*;
