pub mod board_widget;
pub mod message_log;
pub mod unit_stats_widget;

pub use board_widget::*;
pub use message_log::*;
pub use unit_stats_widget::*;

use std::collections::HashMap;

use ratatui::prelude::*;
use skirmish_core::prelude::*;

pub fn map_color<F>(color: Color, f: F) -> Color
where
    F: Fn(u8, u8, u8) -> (u8, u8, u8),
{
    match color {
        Color::Rgb(r, g, b) => {
            let (r, g, b) = f(r, g, b);
            Color::Rgb(r, g, b)
        }
        _ => color,
    }
}

pub fn dim_color(color: Color, amt: f32) -> Color {
    map_color(color, |r, g, b| {
        (
            (r as f32 * amt) as u8,
            (g as f32 * amt) as u8,
            (b as f32 * amt) as u8,
        )
    })
}

// https://www.w3.org/TR/AERT/#color-contrast
pub fn text_color_contrast(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let perceived_luminance = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
            if perceived_luminance < 128. {
                Color::White
            } else {
                Color::Black
            }
        }
        _ => Color::LightMagenta,
    }
}

pub fn terrain_color(kind: TerrainKind) -> Color {
    match kind {
        TerrainKind::Plain => Color::Rgb(154, 187, 38),
        TerrainKind::Forest => Color::Rgb(50, 120, 60),
        TerrainKind::Mountain => Color::Rgb(255, 255, 255),
        TerrainKind::Swamp => Color::Rgb(40, 164, 100),
        TerrainKind::River => Color::Rgb(30, 100, 152),
        TerrainKind::Obstacle => Color::Rgb(120, 120, 120),
        TerrainKind::Volcanic => Color::Rgb(200, 70, 30),
        TerrainKind::DeadForest => Color::Rgb(110, 90, 60),
        TerrainKind::Ruin => Color::Rgb(163, 142, 100),
    }
}

pub fn faction_color(faction: Faction) -> Color {
    match faction {
        Faction::Ally => Color::Rgb(80, 140, 255),
        Faction::Enemy => Color::Rgb(230, 60, 50),
    }
}

pub fn effect_color(kind: EffectKind) -> Color {
    match kind {
        EffectKind::Smoke => Color::Rgb(150, 150, 160),
        EffectKind::Venom => Color::Rgb(150, 60, 170),
    }
}

/// What a glyph stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terrain(TerrainKind),
    Unit(UnitKind),
    Weapon,
    Potion,
}

impl From<&ItemKind> for Symbol {
    fn from(value: &ItemKind) -> Self {
        match value {
            ItemKind::Weapon(_) => Symbol::Weapon,
            ItemKind::HealthPotion { .. } => Symbol::Potion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub text: &'static str,
    pub style: Style,
}

impl Glyph {
    const MISSING: Glyph = Glyph {
        text: "???",
        style: Style::new().fg(Color::LightMagenta),
    };
}

/// Text and colors of everything drawn on the board, built on first use
#[derive(Debug, Clone)]
pub struct GlyphRegistry {
    glyphs: HashMap<Symbol, Glyph>,
}

impl GlyphRegistry {
    pub fn build() -> Self {
        let mut glyphs = HashMap::new();
        for kind in TerrainKind::ALL {
            let bg = terrain_color(kind);
            glyphs.insert(
                Symbol::Terrain(kind),
                Glyph {
                    text: kind.glyph(),
                    style: Style::default().bg(bg).fg(dim_color(bg, 0.6)),
                },
            );
        }
        for kind in UnitKind::ALL {
            let fg = faction_color(kind.faction());
            glyphs.insert(
                Symbol::Unit(kind),
                Glyph {
                    text: kind.glyph(),
                    style: Style::default()
                        .fg(text_color_contrast(fg))
                        .bg(fg)
                        .add_modifier(Modifier::BOLD),
                },
            );
        }
        let weapon = ItemKind::Weapon(Weapon {
            attack_boost: DEFAULT_ATTACK_BOOST,
        });
        let potion = ItemKind::HealthPotion {
            health_boost: DEFAULT_HEALTH_BOOST,
        };
        glyphs.insert(
            Symbol::Weapon,
            Glyph {
                text: weapon.glyph(),
                style: Style::default().fg(Color::Black).bg(Color::Rgb(240, 168, 43)),
            },
        );
        glyphs.insert(
            Symbol::Potion,
            Glyph {
                text: potion.glyph(),
                style: Style::default().fg(Color::White).bg(Color::Rgb(190, 30, 60)),
            },
        );
        tracing::trace!(target: "tui", "glyph registry built with {} symbols", glyphs.len());
        Self { glyphs }
    }

    pub fn get(&self, symbol: Symbol) -> Glyph {
        self.glyphs.get(&symbol).copied().unwrap_or(Glyph::MISSING)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_symbol_has_a_glyph() {
        let registry = GlyphRegistry::build();
        let symbols = TerrainKind::ALL
            .into_iter()
            .map(Symbol::Terrain)
            .chain(UnitKind::ALL.into_iter().map(Symbol::Unit))
            .chain([Symbol::Weapon, Symbol::Potion]);
        for symbol in symbols {
            let glyph = registry.get(symbol);
            assert_ne!(glyph, Glyph::MISSING, "{:?}", symbol);
            assert_eq!(glyph.text.chars().count(), 3, "{:?}", symbol);
        }
    }

    #[test]
    fn dimming_scales_rgb_only() {
        assert_eq!(dim_color(Color::Rgb(100, 50, 10), 0.5), Color::Rgb(50, 25, 5));
        assert_eq!(dim_color(Color::Red, 0.5), Color::Red);
    }
}
