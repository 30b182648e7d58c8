use std::collections::HashSet;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::prelude::*;

/// Every this many resolved turns the living units regenerate skill points
pub const REGEN_INTERVAL: u32 = 3;
pub const REGEN_AMOUNT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingCommand(UnitId),
    TurnResolved,
    GameOver(GameOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Unit whose turn it is, kept through `TurnResolved`
    pub current: UnitId,

    /// Incremented on every transition into `TurnResolved`
    pub round_counter: u32,

    pub phase: Phase,
}

/// A running session: the map, the roster and the turn cycle
#[derive(Debug, Clone)]
pub struct Game {
    pub map: Map,
    pub units: Vec<Unit>,
    pub items: Vec<Item>,
    pub effects: Vec<AreaEffect>,
    pub turn: TurnState,
    pub rules: MovementRules,
    pub(crate) rng: StdRng,
}

/// Serializable snapshot used for logs and debugging
#[derive(Serialize)]
struct GameView<'a> {
    terrain: Vec<String>,
    units: &'a [Unit],
    items: &'a [Item],
    effects: &'a [AreaEffect],
    turn: &'a TurnState,
}

impl Game {
    /// Generates the map, places the roster and scatters the items
    pub fn new(settings: &GameSettings) -> Result<Game, SetupError> {
        if settings.roster.is_empty() {
            return Err(SetupError::EmptyRoster);
        }
        let size = Coord::new(settings.width, settings.height);
        let mut rng = session_rng(settings.seed);
        let map = MapGenerator::from_layout(&settings.layout, size, settings.residual)
            .generate(size, &mut rng)?;

        let center = size / 2;
        let mut taken: Vec<Coord> = vec![];
        let mut units = vec![];
        for (i, spawn) in settings.roster.iter().enumerate() {
            let wanted = (center + spawn.offset).clamp(Coord::ZERO, size - Coord::ONE);
            let at = nearest_open(&map, wanted, &taken).ok_or(SetupError::NoRoom(spawn.kind))?;
            if at != wanted {
                debug!(target: "map.gen", "{} spawn moved from {} to {}", spawn.kind.name(), wanted, at);
            }
            taken.push(at);
            units.push(Unit::new(UnitId(i as u32), spawn.kind, at).with_controller(spawn.controller));
        }
        let items = populate_items(&map, &taken, &settings.items, &mut rng);

        let rules = MovementRules {
            terrain_cost_aware: settings.terrain_cost_aware,
        };
        Ok(Game::from_parts(map, units, items, rules, rng))
    }

    /// Assembles a game from ready made parts, the first living unit starts.
    /// Unit ids must match their roster index.
    pub fn from_parts(
        map: Map,
        units: Vec<Unit>,
        items: Vec<Item>,
        rules: MovementRules,
        rng: StdRng,
    ) -> Game {
        let first = units
            .iter()
            .find(|u| u.is_alive())
            .map_or(UnitId::default(), |u| u.id);
        let mut game = Game {
            map,
            units,
            items,
            effects: vec![],
            turn: TurnState {
                current: first,
                round_counter: 0,
                phase: Phase::AwaitingCommand(first),
            },
            rules,
            rng,
        };
        game.start_turn(first);
        game
    }

    pub fn size(&self) -> Coord {
        self.map.size
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.index())
    }

    /// Living unit standing on `at`
    pub fn unit_at(&self, at: &Coord) -> Option<&Unit> {
        self.units.iter().find(|u| u.is_alive() && u.at == *at)
    }

    pub fn current_unit(&self) -> Option<&Unit> {
        self.unit(self.turn.current)
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.turn.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The unit if it may issue a command right now
    pub fn acting_unit(&self, id: UnitId) -> Result<&Unit, CommandError> {
        if let Phase::GameOver(_) = self.turn.phase {
            return Err(CommandError::GameOver);
        }
        let unit = self.unit(id).ok_or(CommandError::UnknownUnit(id))?;
        if id != self.turn.current {
            return Err(CommandError::NotUnitsTurn(id));
        }
        match self.turn.phase {
            Phase::TurnResolved => Err(CommandError::TurnAlreadyResolved),
            _ => Ok(unit),
        }
    }

    pub fn accessible_tiles(&self, unit: &Unit) -> HashSet<Coord> {
        accessible_tiles(unit, &self.map, &self.rules)
    }

    /// Hidden from the renderer: vanished or standing in smoke
    pub fn is_concealed(&self, unit: &Unit) -> bool {
        unit.status.vanished
            || self
                .effects
                .iter()
                .any(|e| e.kind == EffectKind::Smoke && e.contains(&unit.at))
    }

    pub fn issue_move(&mut self, unit: UnitId, to: Coord) -> Result<CommandOutcome, CommandError> {
        self.execute(ActMove { unit, to })
    }

    pub fn issue_attack(
        &mut self,
        unit: UnitId,
        target: UnitId,
    ) -> Result<CommandOutcome, CommandError> {
        self.execute(ActAttack { unit, target })
    }

    pub fn issue_skill(
        &mut self,
        unit: UnitId,
        slot: u8,
        target: Option<UnitId>,
    ) -> Result<CommandOutcome, CommandError> {
        self.execute(ActSkill { unit, slot, target })
    }

    pub fn issue_pickup(&mut self, unit: UnitId) -> Result<CommandOutcome, CommandError> {
        self.execute(ActPickup { unit })
    }

    /// Moves to the next living unit. Acts as a pass when the turn isn't resolved yet.
    pub fn end_turn(&mut self) -> Result<CommandOutcome, CommandError> {
        self.execute(ActEndTurn)
    }

    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        match command {
            Command::Move { unit, to } => self.issue_move(unit, to),
            Command::Attack { unit, target } => self.issue_attack(unit, target),
            Command::Skill { unit, slot, target } => self.issue_skill(unit, slot, target),
            Command::Pickup { unit } => self.issue_pickup(unit),
            Command::EndTurn => self.end_turn(),
        }
    }

    fn execute<A: Act + std::fmt::Debug>(&mut self, act: A) -> Result<CommandOutcome, CommandError> {
        if let Err(err) = act.validate(self) {
            debug!(target: "game.turn", "rejected {:?}: {}", act, err);
            return Err(err);
        }
        let event = act.apply(self)?;
        if A::RESOLVES_TURN {
            self.resolve_turn();
        }
        if A::CHECKS_GAME_OVER {
            if let Some(outcome) = self.check_game_over() {
                info!(target: "game.turn", "game over: {:?} after {} turns", outcome, self.turn.round_counter);
                self.turn.phase = Phase::GameOver(outcome);
                return Ok(CommandOutcome::GameOverTriggered(outcome));
            }
        }
        Ok(CommandOutcome::Applied(event))
    }

    /// `AwaitingCommand -> TurnResolved`, with the periodic regeneration and the effect timers
    pub(crate) fn resolve_turn(&mut self) {
        self.turn.round_counter += 1;
        if self.turn.round_counter % REGEN_INTERVAL == 0 {
            for unit in self.units.iter_mut().filter(|u| u.is_alive()) {
                unit.regenerate_skill_points(REGEN_AMOUNT);
            }
            trace!(target: "game.turn", "skill points regenerated at turn {}", self.turn.round_counter);
        }
        self.effects.retain_mut(|effect| effect.tick());
        self.turn.phase = Phase::TurnResolved;
        trace!(target: "game.turn", "turn {} resolved", self.turn.round_counter);
    }

    /// Hands the turn to the next living unit in roster order
    pub(crate) fn advance(&mut self) -> UnitId {
        let count = self.units.len();
        let start = self.turn.current.index();
        let next = (1..=count)
            .map(|step| (start + step) % count)
            .find(|i| self.units[*i].is_alive())
            .map_or(self.turn.current, |i| self.units[i].id);
        self.start_turn(next);
        next
    }

    /// Clears the status flags and refreshes the movement budget
    fn start_turn(&mut self, id: UnitId) {
        self.turn.current = id;
        self.turn.phase = Phase::AwaitingCommand(id);
        let Some(unit) = self.units.get(id.index()) else {
            return;
        };
        let speed = movement_budget(unit, &self.map, &self.effects);
        if let Some(unit) = self.units.get_mut(id.index()) {
            unit.status = StatusFlags::default();
            unit.speed = speed;
        }
        trace!(target: "game.turn", "{} starts with speed {}", id, speed);
    }

    /// Allies are checked first, so a double wipe is a defeat
    pub fn check_game_over(&self) -> Option<GameOutcome> {
        let wiped = |faction: Faction| {
            self.units
                .iter()
                .filter(|u| u.faction() == faction)
                .all(|u| u.is_defeated())
        };
        if wiped(Faction::Ally) {
            Some(GameOutcome::Defeat)
        } else if wiped(Faction::Enemy) {
            Some(GameOutcome::Victory)
        } else {
            None
        }
    }

    pub fn view(&self) -> String {
        let terrain = (0..self.map.height())
            .map(|y| {
                (0..self.map.width())
                    .map(|x| {
                        self.map
                            .get(&Coord::new(x, y))
                            .and_then(|tile| tile.map(|t| t.kind.glyph()))
                            .unwrap_or("   ")
                    })
                    .collect::<Vec<&str>>()
                    .join(" ")
            })
            .collect();
        let view = GameView {
            terrain,
            units: &self.units,
            items: &self.items,
            effects: &self.effects,
            turn: &self.turn,
        };
        let config = ron::ser::PrettyConfig::default()
            .compact_arrays(true)
            .depth_limit(2);
        ron::ser::to_string_pretty(&view, config)
            .unwrap_or_else(|err| format!("unserializable game: {}", err))
    }
}
