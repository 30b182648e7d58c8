//! Damage, skills and item pickup. Pure rules over the roster, the turn
//! bookkeeping lives in [`crate::game`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::prelude::*;

/// Damage dealt to a single unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    pub target: UnitId,
    pub damage: f32,
    pub defeated: bool,
}

/// Result of a successful skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillUse {
    pub skill: SkillId,
    pub cost: f32,

    /// Every unit the skill landed on
    pub affected: Vec<UnitId>,

    /// Damage dealt, empty for skills that don't hurt
    pub strikes: Vec<Strike>,

    /// Area effect left on the map
    pub deployed: Option<AreaEffect>,
}

/// `target.health -= attacker.attack`, no range rule
pub fn attack(attacker: &Unit, target: &mut Unit) -> Result<Strike, CommandError> {
    if attacker.id == target.id {
        return Err(CommandError::SelfTarget);
    }
    if target.is_defeated() {
        return Err(CommandError::TargetAlreadyDefeated);
    }
    let damage = target.take_damage(attacker.attack);
    let strike = Strike {
        target: target.id,
        damage,
        defeated: target.is_defeated(),
    };
    if strike.defeated {
        info!(target: "game.combat", "{} {} defeated by {} {}", target.kind.name(), target.id, attacker.kind.name(), attacker.id);
    }
    Ok(strike)
}

/// Living opponents of `caster` sorted by distance, ties in roster order
pub fn opponents_by_distance(units: &[Unit], caster: &Unit) -> Vec<UnitId> {
    let mut opponents: Vec<&Unit> = units
        .iter()
        .filter(|u| u.is_alive() && u.is_hostile(caster))
        .collect();
    opponents.sort_by_key(|u| u.at.distance(&caster.at));
    opponents.into_iter().map(|u| u.id).collect()
}

/// Units a skill of `caster` lands on
pub fn resolve_targets(
    units: &[Unit],
    caster: &Unit,
    skill: &Skill,
    explicit: Option<UnitId>,
) -> Result<Vec<UnitId>, CommandError> {
    let targets = match skill.targeting {
        Targeting::Caster => return Ok(vec![caster.id]),
        Targeting::Allies => {
            return Ok(units
                .iter()
                .filter(|u| u.is_alive() && u.faction() == caster.faction())
                .map(|u| u.id)
                .collect())
        }
        Targeting::Single => match explicit {
            Some(id) => {
                let target = units
                    .get(id.index())
                    .ok_or(CommandError::UnknownUnit(id))?;
                validate_opponent(caster, target)?;
                vec![id]
            }
            None => opponents_by_distance(units, caster)
                .into_iter()
                .take(1)
                .collect(),
        },
        Targeting::Nearest(n) => opponents_by_distance(units, caster)
            .into_iter()
            .take(n)
            .collect(),
        Targeting::Opponents => opponents_by_distance(units, caster),
    };
    if targets.is_empty() {
        Err(CommandError::NoTarget)
    } else {
        Ok(targets)
    }
}

/// Checks shared by attacks and single target skills
pub fn validate_opponent(caster: &Unit, target: &Unit) -> Result<(), CommandError> {
    if caster.id == target.id {
        Err(CommandError::SelfTarget)
    } else if !caster.is_hostile(target) {
        Err(CommandError::FriendlyTarget)
    } else if target.is_defeated() {
        Err(CommandError::TargetAlreadyDefeated)
    } else {
        Ok(())
    }
}

/// Validates then applies the skill in `slot` of `caster`.
/// Nothing changes when an error is returned.
pub fn use_skill(
    units: &mut [Unit],
    caster: UnitId,
    slot: u8,
    explicit: Option<UnitId>,
) -> Result<SkillUse, CommandError> {
    let Some(unit) = units.get(caster.index()) else {
        return Err(CommandError::UnknownUnit(caster));
    };
    let Some(skill) = skill_for(unit.kind, slot) else {
        return Err(CommandError::UnknownSkillSlot(slot));
    };
    if !unit.can_afford(skill.cost) {
        return Err(CommandError::InsufficientSkillPoints {
            cost: skill.cost,
            available: unit.skill_points,
        });
    }
    let targets = resolve_targets(units, unit, &skill, explicit)?;

    let power = unit.attack;
    let origin = unit.at;
    units[caster.index()].skill_points -= skill.cost;

    let mut strikes = vec![];
    let mut deployed = None;
    for id in targets.iter() {
        let target = &mut units[id.index()];
        match skill.effect {
            SkillEffect::Strike(multiplier) => {
                let damage = target.take_damage(power * multiplier);
                strikes.push(Strike {
                    target: *id,
                    damage,
                    defeated: target.is_defeated(),
                });
            }
            SkillEffect::Trap(amount) => {
                let damage = target.take_damage(amount);
                strikes.push(Strike {
                    target: *id,
                    damage,
                    defeated: target.is_defeated(),
                });
                deployed = Some(AreaEffect::new(EffectKind::Venom, target.at));
            }
            SkillEffect::Heal(amount) => target.recover(amount),
            SkillEffect::Regenerate(fraction) => target.recover(target.health * fraction),
            SkillEffect::ScaleAttack(factor) => target.attack *= factor,
            SkillEffect::Frenzy { attack, health } => {
                target.attack *= attack;
                target.health *= health;
            }
            SkillEffect::Shield => target.status.shielded = true,
            SkillEffect::Vanish => {
                target.status.vanished = true;
                deployed = Some(AreaEffect::new(EffectKind::Smoke, origin));
            }
            SkillEffect::EagleVision => target.status.eagle_vision = true,
        }
    }

    for strike in strikes.iter().filter(|s| s.defeated) {
        info!(target: "game.combat", "{} defeated by {}", strike.target, skill.id.name());
    }
    debug!(target: "game.combat", "{} used {} on {:?}", caster, skill.id.name(), targets);

    Ok(SkillUse {
        skill: skill.id,
        cost: skill.cost,
        affected: targets,
        strikes,
        deployed,
    })
}

/// Takes at most one weapon and one potion lying under the unit.
/// A weapon adds its boost to the attack for good and becomes the held weapon.
pub fn pick_up_item(unit: &mut Unit, items: &mut Vec<Item>) -> Vec<Item> {
    let mut picked = vec![];
    if let Some(index) = items
        .iter()
        .position(|item| item.is_weapon() && item.at == unit.at)
    {
        let item = items.remove(index);
        if let ItemKind::Weapon(weapon) = item.kind {
            unit.attack += weapon.attack_boost;
            unit.weapon = Some(weapon);
        }
        picked.push(item);
    }
    if let Some(index) = items
        .iter()
        .position(|item| !item.is_weapon() && item.at == unit.at)
    {
        let item = items.remove(index);
        if let ItemKind::HealthPotion { health_boost } = item.kind {
            unit.heal(health_boost);
        }
        picked.push(item);
    }
    picked
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::c;

    fn roster(kinds: &[(UnitKind, Coord)]) -> Vec<Unit> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, (kind, at))| Unit::new(UnitId(i as u32), *kind, *at))
            .collect()
    }

    #[test]
    fn attack_until_defeated() {
        let mut units = roster(&[(UnitKind::Elf, c!(0, 0)), (UnitKind::Orc, c!(5, 5))]);
        units[1].health = 80.0;
        let (elf, orc) = units.split_at_mut(1);
        let strike = attack(&elf[0], &mut orc[0]).unwrap();
        assert_eq!(orc[0].health, 60.0);
        assert!(!strike.defeated);

        orc[0].health = 15.0;
        let strike = attack(&elf[0], &mut orc[0]).unwrap();
        assert_eq!(orc[0].health, -5.0);
        assert!(strike.defeated);
        assert_eq!(
            attack(&elf[0], &mut orc[0]),
            Err(CommandError::TargetAlreadyDefeated)
        );
    }

    #[test]
    fn skill_rejected_without_points() {
        let mut units = roster(&[(UnitKind::Human, c!(0, 0)), (UnitKind::Orc, c!(1, 0))]);
        units[0].skill_points = 1.0;
        let err = use_skill(&mut units, UnitId(0), 1, None).unwrap_err();
        assert_eq!(
            err,
            CommandError::InsufficientSkillPoints {
                cost: 3.0,
                available: 1.0
            }
        );
        assert_eq!(units[0].skill_points, 1.0);
        assert_eq!(units[1].health, 90.0);
    }

    #[test]
    fn unknown_slot() {
        let mut units = roster(&[(UnitKind::Human, c!(0, 0))]);
        assert_eq!(
            use_skill(&mut units, UnitId(0), 4, None),
            Err(CommandError::UnknownSkillSlot(4))
        );
    }

    #[test]
    fn charge_hits_nearest_opponent() {
        let mut units = roster(&[
            (UnitKind::Human, c!(0, 0)),
            (UnitKind::Troll, c!(9, 9)),
            (UnitKind::Orc, c!(2, 0)),
        ]);
        units[0].skill_points = 5.0;
        let used = use_skill(&mut units, UnitId(0), 1, None).unwrap();
        assert_eq!(used.skill, SkillId::Charge);
        assert_eq!(used.affected, vec![UnitId(2)]);
        assert_eq!(units[2].health, 90.0 - 22.5);
        assert_eq!(units[1].health, 200.0);
        assert_eq!(units[0].skill_points, 2.0);
    }

    #[test]
    fn explicit_target_is_validated() {
        let mut units = roster(&[
            (UnitKind::Goblin, c!(0, 0)),
            (UnitKind::Orc, c!(1, 0)),
            (UnitKind::Elf, c!(3, 0)),
        ]);
        assert_eq!(
            use_skill(&mut units, UnitId(0), 3, Some(UnitId(1))),
            Err(CommandError::FriendlyTarget)
        );
        assert_eq!(
            use_skill(&mut units, UnitId(0), 3, Some(UnitId(0))),
            Err(CommandError::SelfTarget)
        );
        assert_eq!(
            use_skill(&mut units, UnitId(0), 3, Some(UnitId(7))),
            Err(CommandError::UnknownUnit(UnitId(7)))
        );
        let used = use_skill(&mut units, UnitId(0), 3, Some(UnitId(2))).unwrap();
        assert_eq!(used.strikes[0].damage, 18.0);
        assert_eq!(units[0].skill_points, 0.0);
    }

    #[test]
    fn rapid_shot_hits_two_nearest() {
        let mut units = roster(&[
            (UnitKind::Elf, c!(0, 0)),
            (UnitKind::Orc, c!(4, 0)),
            (UnitKind::Goblin, c!(1, 0)),
            (UnitKind::Troll, c!(2, 0)),
        ]);
        units[0].skill_points = 3.0;
        let used = use_skill(&mut units, UnitId(0), 3, None).unwrap();
        assert_eq!(used.affected, vec![UnitId(2), UnitId(3)]);
        assert_eq!(units[1].health, 90.0);
        assert_eq!(units[2].health, 40.0);
    }

    #[test]
    fn rally_cry_boosts_every_ally() {
        let mut units = roster(&[
            (UnitKind::Human, c!(0, 0)),
            (UnitKind::Elf, c!(1, 0)),
            (UnitKind::Orc, c!(2, 0)),
        ]);
        units[0].skill_points = 4.0;
        use_skill(&mut units, UnitId(0), 3, None).unwrap();
        assert!((units[0].attack - 18.0).abs() < 1e-4);
        assert!((units[1].attack - 24.0).abs() < 1e-4);
        assert_eq!(units[2].attack, 18.0);
    }

    #[test]
    fn trap_leaves_venom_on_target() {
        let mut units = roster(&[(UnitKind::Goblin, c!(0, 0)), (UnitKind::Dwarf, c!(3, 4))]);
        units[0].skill_points = 3.0;
        let used = use_skill(&mut units, UnitId(0), 2, None).unwrap();
        assert_eq!(units[1].health, 105.0);
        let venom = used.deployed.unwrap();
        assert_eq!(venom.kind, EffectKind::Venom);
        assert_eq!(venom.center, c!(3, 4));
    }

    #[test]
    fn self_heal_is_clamped() {
        let mut units = roster(&[(UnitKind::Dwarf, c!(0, 0))]);
        units[0].health = 80.0;
        units[0].skill_points = 3.0;
        use_skill(&mut units, UnitId(0), 3, None).unwrap();
        assert_eq!(units[0].health, 100.0);
    }

    #[test]
    fn pickup_weapon_and_potion() {
        let mut unit = Unit::new(UnitId(0), UnitKind::Orc, c!(2, 2));
        unit.health = 90.0;
        let mut items = vec![
            Item::potion(c!(2, 2), 20.0),
            Item::weapon(c!(1, 1), 5.0),
            Item::weapon(c!(2, 2), 5.0),
            Item::weapon(c!(2, 2), 5.0),
        ];
        let picked = pick_up_item(&mut unit, &mut items);
        assert_eq!(picked.len(), 2);
        assert_eq!(unit.health, 100.0);
        assert_eq!(unit.attack, 23.0);
        assert!(unit.weapon.is_some());
        // one weapon per pickup
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn potion_brings_sturdy_units_down_to_the_cap() {
        let mut dwarf = Unit::new(UnitId(0), UnitKind::Dwarf, c!(1, 1));
        let mut items = vec![Item::potion(c!(1, 1), 20.0)];
        let picked = pick_up_item(&mut dwarf, &mut items);
        assert_eq!(picked.len(), 1);
        assert_eq!(dwarf.health, 100.0);
        assert!(items.is_empty());
    }
}
