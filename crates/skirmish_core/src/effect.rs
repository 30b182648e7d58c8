use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Turns an area effect stays on the map
pub const EFFECT_DURATION: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Hides the units inside from the renderer
    Smoke,

    /// Units starting their turn inside lose one point of movement
    Venom,
}

impl EffectKind {
    /// Side of the square covered
    pub fn size(&self) -> i32 {
        match self {
            EffectKind::Smoke => 9,
            EffectKind::Venom => 5,
        }
    }
}

/// Timed square cloud centered on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaEffect {
    pub kind: EffectKind,
    pub center: Coord,
    pub size: i32,
    pub remaining: u32,
}

impl AreaEffect {
    pub fn new(kind: EffectKind, center: Coord) -> Self {
        Self {
            kind,
            center,
            size: kind.size(),
            remaining: EFFECT_DURATION,
        }
    }

    pub fn contains(&self, pos: &Coord) -> bool {
        let half = self.size / 2;
        (pos.x - self.center.x).abs() <= half && (pos.y - self.center.y).abs() <= half
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        self.center.square(self.size)
    }

    /// Returns false once the effect has expired
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining > 0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::c;

    #[test]
    fn venom_square() {
        let venom = AreaEffect::new(EffectKind::Venom, c!(5, 5));
        assert!(venom.contains(&c!(3, 7)));
        assert!(!venom.contains(&c!(2, 5)));
        assert_eq!(venom.cells().count(), 25);
        assert!(venom.cells().all(|xy| venom.contains(&xy)));
    }

    #[test]
    fn expires_after_three_ticks() {
        let mut smoke = AreaEffect::new(EffectKind::Smoke, c!(0, 0));
        assert!(smoke.tick());
        assert!(smoke.tick());
        assert!(!smoke.tick());
    }
}
