use std::collections::HashSet;

use super::*;
use ratatui::prelude::*;
use skirmish_core::prelude::*;

/// Terminal cells used by one tile, the glyph and a separator column
pub const TILE_SIZE: Coord = Coord::new(4, 1);

/// Top left corner of the view in board cells, keeping `focus` centered while
/// the view stays inside the board. Boards smaller than the view are centered,
/// giving a negative offset.
pub fn camera_offset(focus: Coord, board: Coord, view: Coord) -> Coord {
    let to_focus = (focus - view / 2).clamp(Coord::ZERO, (board - view).max(Coord::ZERO));
    let off = ((view - board) / 2).max(Coord::ZERO);
    to_focus - off
}

#[derive(Debug, Clone, Copy)]
pub struct BoardWidget<'a> {
    pub game: &'a Game,
    pub glyphs: &'a GlyphRegistry,
    pub cursor: Coord,
    pub reachable: &'a HashSet<Coord>,
}

impl<'a> BoardWidget<'a> {
    fn tile_glyph(&self, xy: Coord) -> Glyph {
        let current = self.game.turn.current;
        if let Some(unit) = self.game.unit_at(&xy) {
            if unit.id == current || !self.game.is_concealed(unit) {
                let mut glyph = self.glyphs.get(Symbol::Unit(unit.kind));
                if unit.id == current {
                    glyph.style = glyph.style.add_modifier(Modifier::UNDERLINED);
                }
                return glyph;
            }
        }
        if let Some(item) = self.game.items.iter().find(|item| item.at == xy) {
            return self.glyphs.get(Symbol::from(&item.kind));
        }
        let Some(Some(tile)) = self.game.map.get(&xy) else {
            return Glyph {
                text: "   ",
                style: Style::default(),
            };
        };
        let mut glyph = self.glyphs.get(Symbol::Terrain(tile.kind));
        if let Some(effect) = self.game.effects.iter().find(|e| e.contains(&xy)) {
            glyph.style = glyph.style.bg(dim_color(effect_color(effect.kind), 0.8));
        } else if self.reachable.contains(&xy) {
            glyph.style = glyph.style.bg(Color::Rgb(40, 50, 200)).fg(Color::White);
        }
        glyph
    }
}

impl<'a> Widget for BoardWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.game.size();
        let board_area = Coord::new(size.x * TILE_SIZE.x, size.y * TILE_SIZE.y);
        let board_rect = Rect::new(0, 0, board_area.x as u16, board_area.y as u16);
        let mut board_buffer = Buffer::empty(board_rect);
        for xy in iter_area(size) {
            let mut glyph = self.tile_glyph(xy);
            if xy == self.cursor {
                glyph.style = glyph.style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            board_buffer.set_string(
                (xy.x * TILE_SIZE.x) as u16,
                (xy.y * TILE_SIZE.y) as u16,
                format!("{} ", glyph.text),
                glyph.style,
            );
        }

        let view_area = Coord::new(area.width.into(), area.height.into());
        let cursor_pos = Coord::new(self.cursor.x * TILE_SIZE.x, self.cursor.y * TILE_SIZE.y);
        let offset = camera_offset(cursor_pos, board_area, view_area);
        for xy in iter_area(view_area) {
            let xy_off = xy + offset;
            if rect_contains(&board_area, &xy_off) {
                *buf.get_mut(area.x + xy.x as u16, area.y + xy.y as u16) =
                    board_buffer.get(xy_off.x as u16, xy_off.y as u16).clone();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use skirmish_core::c;

    use super::*;

    #[test]
    fn camera_follows_the_focus() {
        let board = c!(100, 50);
        let view = c!(20, 10);
        assert_eq!(camera_offset(c!(50, 25), board, view), c!(40, 20));
    }

    #[test]
    fn camera_stops_at_the_edges() {
        let board = c!(100, 50);
        let view = c!(20, 10);
        assert_eq!(camera_offset(c!(2, 1), board, view), c!(0, 0));
        assert_eq!(camera_offset(c!(99, 49), board, view), c!(80, 40));
    }

    #[test]
    fn small_boards_are_centered() {
        assert_eq!(camera_offset(c!(3, 3), c!(10, 6), c!(20, 10)), c!(-5, -2));
    }

    #[test]
    fn board_renders_units_over_terrain() {
        let game = Game::from_parts(
            parse_map("--- ### ---").unwrap(),
            vec![
                Unit::new(UnitId(0), UnitKind::Elf, c!(0, 0)),
                Unit::new(UnitId(1), UnitKind::Troll, c!(2, 0)),
            ],
            vec![Item::potion(c!(1, 0), DEFAULT_HEALTH_BOOST)],
            MovementRules::default(),
            session_rng(Some(0)),
        );
        let glyphs = GlyphRegistry::build();
        let reachable = HashSet::new();
        let widget = BoardWidget {
            game: &game,
            glyphs: &glyphs,
            cursor: c!(1, 0),
            reachable: &reachable,
        };
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        let row: String = (0..12).map(|x| buf.get(x, 0).symbol()).collect();
        assert_eq!(row, "Elf (+) Trl ");
    }

    #[test]
    fn concealed_opponents_are_hidden() {
        let mut game = Game::from_parts(
            parse_map("--- --- ---").unwrap(),
            vec![
                Unit::new(UnitId(0), UnitKind::Elf, c!(0, 0)),
                Unit::new(UnitId(1), UnitKind::Goblin, c!(2, 0)),
            ],
            vec![],
            MovementRules::default(),
            session_rng(Some(0)),
        );
        game.units[1].status.vanished = true;
        let glyphs = GlyphRegistry::build();
        let reachable = HashSet::new();
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        BoardWidget {
            game: &game,
            glyphs: &glyphs,
            cursor: c!(0, 0),
            reachable: &reachable,
        }
        .render(area, &mut buf);
        let row: String = (0..12).map(|x| buf.get(x, 0).symbol()).collect();
        assert_eq!(row, "Elf --- --- ");
    }
}
