//! Fixed table of the three skills of every unit kind

use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillId {
    Charge,
    ShieldProtection,
    RallyCry,
    EnchantedArrow,
    EagleVision,
    RapidShot,
    MountainFury,
    HammerSlam,
    StoneResilience,
    WarCry,
    Berserk,
    SavageLeap,
    Vanish,
    ExplosiveTrap,
    Backstab,
    RapidRegeneration,
    CrushingBlow,
    TerrifyingRoar,
}

impl SkillId {
    pub fn name(&self) -> &'static str {
        match self {
            SkillId::Charge => "Charge",
            SkillId::ShieldProtection => "Shield Protection",
            SkillId::RallyCry => "Rally Cry",
            SkillId::EnchantedArrow => "Enchanted Arrow",
            SkillId::EagleVision => "Eagle Vision",
            SkillId::RapidShot => "Rapid Shot",
            SkillId::MountainFury => "Mountain Fury",
            SkillId::HammerSlam => "Hammer Slam",
            SkillId::StoneResilience => "Stone Resilience",
            SkillId::WarCry => "War Cry",
            SkillId::Berserk => "Berserk",
            SkillId::SavageLeap => "Savage Leap",
            SkillId::Vanish => "Vanish",
            SkillId::ExplosiveTrap => "Explosive Trap",
            SkillId::Backstab => "Backstab",
            SkillId::RapidRegeneration => "Rapid Regeneration",
            SkillId::CrushingBlow => "Crushing Blow",
            SkillId::TerrifyingRoar => "Terrifying Roar",
        }
    }
}

/// Which units a skill lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Targeting {
    /// Only the caster
    Caster,

    /// The chosen opponent, or the nearest one when none is chosen
    Single,

    /// The `n` nearest living opponents
    Nearest(usize),

    /// Every living opponent
    Opponents,

    /// Every living unit of the caster's faction, caster included
    Allies,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkillEffect {
    /// Damage equal to the caster attack times the multiplier
    Strike(f32),

    /// Damage independent of the caster, leaves a venom pool on the target
    Trap(f32),

    /// Flat heal, goes through the healing clamp
    Heal(f32),

    /// Heal by a fraction of the current health
    Regenerate(f32),

    /// Multiplies the attack of every target
    ScaleAttack(f32),

    /// Scales the caster attack and health
    Frenzy { attack: f32, health: f32 },

    Shield,

    /// Hides the caster and deploys smoke around it
    Vanish,

    EagleVision,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub cost: f32,
    pub targeting: Targeting,
    pub effect: SkillEffect,
}

impl Skill {
    const fn new(id: SkillId, cost: f32, targeting: Targeting, effect: SkillEffect) -> Self {
        Self {
            id,
            cost,
            targeting,
            effect,
        }
    }

    /// Whether the skill needs an opponent to land on
    pub fn is_offensive(&self) -> bool {
        matches!(
            self.targeting,
            Targeting::Single | Targeting::Nearest(_) | Targeting::Opponents
        )
    }
}

pub const SKILL_SLOTS: u8 = 3;

/// The skill in `slot` (1 based) of `kind`
pub fn skill_for(kind: UnitKind, slot: u8) -> Option<Skill> {
    use SkillEffect::*;
    use SkillId::*;
    use Targeting::*;

    let skills: [Skill; 3] = match kind {
        UnitKind::Human => [
            Skill::new(Charge, 3.0, Single, Strike(1.5)),
            Skill::new(ShieldProtection, 3.0, Caster, Shield),
            Skill::new(RallyCry, 4.0, Allies, ScaleAttack(1.2)),
        ],
        UnitKind::Elf => [
            Skill::new(EnchantedArrow, 2.0, Opponents, Strike(1.2)),
            Skill::new(SkillId::EagleVision, 3.0, Caster, SkillEffect::EagleVision),
            Skill::new(RapidShot, 3.0, Nearest(2), Strike(1.0)),
        ],
        UnitKind::Dwarf => [
            Skill::new(MountainFury, 3.0, Caster, Heal(10.0)),
            Skill::new(HammerSlam, 4.0, Opponents, Strike(1.0)),
            Skill::new(StoneResilience, 3.0, Caster, Heal(25.0)),
        ],
        UnitKind::Orc => [
            Skill::new(WarCry, 3.0, Opponents, ScaleAttack(0.75)),
            Skill::new(
                Berserk,
                4.0,
                Caster,
                Frenzy {
                    attack: 1.5,
                    health: 0.8,
                },
            ),
            Skill::new(SavageLeap, 3.0, Single, Strike(1.0)),
        ],
        UnitKind::Goblin => [
            Skill::new(SkillId::Vanish, 4.0, Caster, SkillEffect::Vanish),
            Skill::new(ExplosiveTrap, 3.0, Single, Trap(15.0)),
            Skill::new(Backstab, 2.0, Single, Strike(1.5)),
        ],
        UnitKind::Troll => [
            Skill::new(RapidRegeneration, 4.0, Caster, Regenerate(0.3)),
            Skill::new(CrushingBlow, 5.0, Opponents, Strike(1.0)),
            Skill::new(TerrifyingRoar, 3.0, Opponents, ScaleAttack(0.8)),
        ],
    };
    match slot {
        1..=SKILL_SLOTS => Some(skills[(slot - 1) as usize]),
        _ => None,
    }
}
