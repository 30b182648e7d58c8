//! Opponent for units with a [`Controller::Machine`].
//! Scores every valid command of the acting unit with a couple of heuristics
//! plus random noise and plays the best one.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::prelude::*;

/// A candidate with its score
#[derive(Clone, Debug)]
struct Weighted<T> {
    weight: i32,
    content: T,
}

impl<T> Weighted<T> {
    fn new(weight: i32, content: T) -> Weighted<T> {
        Self { weight, content }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boulder {
    /// Noise added to each score, zero plays the same game every time
    pub variance: u32,
}

impl Default for Boulder {
    fn default() -> Self {
        Boulder { variance: 10 }
    }
}

const PASS_WEIGHT: i32 = -1000;
const PICKUP_WEIGHT: i32 = 200;
const FINISHING_BONUS: i32 = 100;

impl Boulder {
    /// Next command for the current unit. `EndTurn` once the turn is resolved.
    pub fn choose(&self, game: &mut Game) -> Command {
        let Phase::AwaitingCommand(id) = game.turn.phase else {
            return Command::EndTurn;
        };
        let Some(unit) = game.unit(id).cloned() else {
            return Command::EndTurn;
        };

        let mut weighted: Vec<Weighted<Command>> = vec![Weighted::new(PASS_WEIGHT, Command::EndTurn)];

        weighted.extend(
            ActPickup::generate(&id, game)
                .into_iter()
                .map(|act| Weighted::new(PICKUP_WEIGHT, Command::Pickup { unit: act.unit })),
        );

        weighted.extend(ActAttack::generate(&id, game).into_iter().filter_map(|act| {
            let target = game.unit(act.target)?;
            Some(Weighted::new(
                weight_damage(unit.attack, target),
                Command::Attack {
                    unit: id,
                    target: act.target,
                },
            ))
        }));

        weighted.extend(ActSkill::generate(&id, game).into_iter().filter_map(|act| {
            let skill = skill_for(unit.kind, act.slot)?;
            let targets = resolve_targets(&game.units, &unit, &skill, act.target).ok()?;
            Some(Weighted::new(
                weight_skill(game, &unit, &skill, &targets),
                Command::Skill {
                    unit: id,
                    slot: act.slot,
                    target: act.target,
                },
            ))
        }));

        weighted.extend(
            ActMove::generate(&id, game)
                .into_iter()
                .map(|act| Weighted::new(weight_move(game, &unit, act.to), Command::Move { unit: id, to: act.to })),
        );

        let variance = self.variance as i32;
        for candidate in weighted.iter_mut().filter(|w| w.content != Command::EndTurn) {
            if variance > 0 {
                candidate.weight += game.rng.gen_range(-variance..=variance);
            }
        }

        // first best wins ties, the list order is deterministic
        let best = weighted
            .iter()
            .fold(None::<&Weighted<Command>>, |best, w| match best {
                Some(b) if b.weight >= w.weight => Some(b),
                _ => Some(w),
            });
        match best {
            Some(choice) => {
                trace!(target: "machine", "{} picks {:?} weight {} out of {}", id, choice.content, choice.weight, weighted.len());
                choice.content.clone()
            }
            None => Command::EndTurn,
        }
    }
}

/// Default opponent
pub fn choose_command(game: &mut Game) -> Command {
    Boulder::default().choose(game)
}

fn weight_damage(damage: f32, target: &Unit) -> i32 {
    let finishing = if target.health <= damage {
        FINISHING_BONUS
    } else {
        0
    };
    50 + damage as i32 + finishing
}

fn weight_skill(game: &Game, unit: &Unit, skill: &Skill, targets: &[UnitId]) -> i32 {
    let units: Vec<&Unit> = targets.iter().filter_map(|id| game.unit(*id)).collect();
    let value = match skill.effect {
        SkillEffect::Strike(multiplier) => units
            .iter()
            .map(|t| weight_damage(unit.attack * multiplier, t))
            .sum(),
        SkillEffect::Trap(amount) => units.iter().map(|t| weight_damage(amount, t)).sum(),
        SkillEffect::Heal(_) | SkillEffect::Regenerate(_) => {
            if unit.health < MAX_HEAL_HEALTH / 2.0 {
                120
            } else {
                -20
            }
        }
        SkillEffect::ScaleAttack(factor) => {
            let attack: f32 = units.iter().map(|t| t.attack).sum();
            (attack * (factor - 1.0).abs()) as i32 * 3
        }
        SkillEffect::Frenzy { health, .. } => {
            if unit.health * health > MAX_HEAL_HEALTH / 2.0 {
                60
            } else {
                -50
            }
        }
        SkillEffect::Shield | SkillEffect::Vanish => 20,
        SkillEffect::EagleVision => 0,
    };
    // saving points has some value too
    value - skill.cost as i32 * 5
}

/// Items are worth a detour, otherwise close in on the nearest opponent
fn weight_move(game: &Game, unit: &Unit, to: Coord) -> i32 {
    if game.items.iter().any(|item| item.at == to) {
        return PICKUP_WEIGHT / 2;
    }
    let nearest = opponents_by_distance(&game.units, unit)
        .first()
        .and_then(|id| game.unit(*id))
        .map_or(0, |target| target.at.distance(&to));
    -nearest
}

#[cfg(test)]
mod test {
    use crate::{c, prelude::*, test::scenario};

    use super::*;

    #[test]
    fn finishing_blow_is_preferred() {
        let mut game = scenario(
            "--- --- --- ---",
            &[
                (UnitKind::Orc, c!(0, 0)),
                (UnitKind::Dwarf, c!(1, 0)),
                (UnitKind::Elf, c!(3, 0)),
            ],
        );
        game.units[2].health = 10.0;
        let command = Boulder { variance: 0 }.choose(&mut game);
        assert_eq!(
            command,
            Command::Attack {
                unit: UnitId(0),
                target: UnitId(2)
            }
        );
    }

    #[test]
    fn pickup_comes_first() {
        let mut game = scenario(
            "--- --- ---",
            &[(UnitKind::Goblin, c!(0, 0)), (UnitKind::Human, c!(2, 0))],
        );
        game.items.push(Item::potion(c!(0, 0), 20.0));
        assert_eq!(choose_command(&mut game), Command::Pickup { unit: UnitId(0) });
    }

    #[test]
    fn resolved_turn_is_ended() {
        let mut game = scenario(
            "--- --- ---",
            &[(UnitKind::Goblin, c!(0, 0)), (UnitKind::Human, c!(2, 0))],
        );
        game.end_turn().unwrap();
        game.issue_attack(UnitId(1), UnitId(0)).unwrap();
        assert_eq!(choose_command(&mut game), Command::EndTurn);
    }

    #[test]
    fn machine_commands_are_accepted() {
        let mut game = scenario(
            r"
--- --- ### --- ---
~~~ --- <>> --- ---
--- --- --- ^^^ ---",
            &[
                (UnitKind::Troll, c!(0, 0)),
                (UnitKind::Human, c!(4, 2)),
                (UnitKind::Goblin, c!(1, 1)),
                (UnitKind::Elf, c!(4, 0)),
            ],
        );
        for _ in 0..200 {
            if game.outcome().is_some() {
                break;
            }
            let command = choose_command(&mut game);
            assert!(game.apply(command.clone()).is_ok(), "{:?} rejected", command);
        }
        assert!(game.outcome().is_some());
    }
}
