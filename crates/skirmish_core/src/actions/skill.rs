use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActSkill {
    pub unit: UnitId,
    pub slot: u8,
    pub target: Option<UnitId>,
}

impl Act for ActSkill {
    type Precondition = UnitId;

    const CHECKS_GAME_OVER: bool = true;

    /// One act per affordable slot, targets left to the automatic resolution
    fn generate(pre: &Self::Precondition, game: &Game) -> Vec<Self> {
        (1..=SKILL_SLOTS)
            .map(|slot| ActSkill {
                unit: *pre,
                slot,
                target: None,
            })
            .filter(|act| act.validate(game).is_ok())
            .collect()
    }

    fn validate(&self, game: &Game) -> Result<(), CommandError> {
        let unit = game.acting_unit(self.unit)?;
        let skill = skill_for(unit.kind, self.slot).ok_or(CommandError::UnknownSkillSlot(self.slot))?;
        if !unit.can_afford(skill.cost) {
            return Err(CommandError::InsufficientSkillPoints {
                cost: skill.cost,
                available: unit.skill_points,
            });
        }
        resolve_targets(&game.units, unit, &skill, self.target).map(|_| ())
    }

    fn apply(&self, game: &mut Game) -> Result<GameEvent, CommandError> {
        let used = use_skill(&mut game.units, self.unit, self.slot, self.target)?;
        if let Some(effect) = used.deployed {
            game.effects.push(effect);
        }
        Ok(GameEvent::SkillUsed {
            unit: self.unit,
            used,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::{c, prelude::*, test::scenario};

    use super::*;

    #[test]
    fn insufficient_points_keep_the_turn() {
        let mut game = scenario(
            "--- --- ---",
            &[(UnitKind::Human, c!(0, 0)), (UnitKind::Orc, c!(2, 0))],
        );
        game.units[0].skill_points = 1.0;
        assert_eq!(
            game.issue_skill(UnitId(0), 1, None),
            Err(CommandError::InsufficientSkillPoints {
                cost: 3.0,
                available: 1.0
            })
        );
        assert_eq!(game.units[0].skill_points, 1.0);
        assert_eq!(game.turn.phase, Phase::AwaitingCommand(UnitId(0)));
    }

    #[test]
    fn vanish_deploys_smoke() {
        let mut game = scenario(
            "--- --- --- ---",
            &[(UnitKind::Goblin, c!(1, 0)), (UnitKind::Elf, c!(3, 0))],
        );
        game.units[0].skill_points = 4.0;
        let outcome = game.issue_skill(UnitId(0), 1, None).unwrap();
        assert!(matches!(
            outcome,
            CommandOutcome::Applied(GameEvent::SkillUsed { ref used, .. }) if used.skill == SkillId::Vanish
        ));
        assert!(game.units[0].status.vanished);
        assert_eq!(game.effects.len(), 1);
        assert!(game.is_concealed(&game.units[0]));
        // the elf stands in the smoke too
        assert!(game.is_concealed(&game.units[1]));
    }

    #[test]
    fn generate_only_affordable_slots() {
        let mut game = scenario(
            "--- --- ---",
            &[(UnitKind::Elf, c!(0, 0)), (UnitKind::Orc, c!(2, 0))],
        );
        let slots: Vec<u8> = ActSkill::generate(&UnitId(0), &game)
            .iter()
            .map(|act| act.slot)
            .collect();
        assert_eq!(slots, vec![1]);
        game.units[0].skill_points = 3.0;
        assert_eq!(ActSkill::generate(&UnitId(0), &game).len(), 3);
    }
}
