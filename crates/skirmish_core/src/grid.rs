use crate::coord::*;

/// Simple 2d matrix type, row major
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Grid<T: Default + Clone> {
    cells: Vec<T>,
    pub size: Coord,
}

impl<T: Default + Clone> Grid<T> {
    /// Negative sides count as zero. Callers bound the area, see `MAX_MAP_CELLS`.
    pub fn fill(size: Coord, value: T) -> Grid<T> {
        let size = size.max(Coord::ZERO);
        Self {
            cells: vec![value; (size.x as usize).saturating_mul(size.y as usize)],
            size,
        }
    }

    pub fn default(size: Coord) -> Grid<T> {
        Grid::fill(size, T::default())
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Bound checked read
    pub fn get(&self, pos: &Coord) -> Option<&T> {
        self.contains(pos)
            .then(|| &self.cells[pos_to_index(&self.size, pos)])
    }

    /// Bound checked write access
    pub fn get_mut(&mut self, pos: &Coord) -> Option<&mut T> {
        if self.contains(pos) {
            Some(&mut self.cells[pos_to_index(&self.size, pos)])
        } else {
            None
        }
    }

    /// Writes are dropped outside of the grid, returns whether the write happened
    pub fn set(&mut self, pos: &Coord, value: T) -> bool {
        match self.get_mut(pos) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Bound check
    pub fn contains(&self, pos: &Coord) -> bool {
        rect_contains(&self.size, pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        iter_area(self.size).zip(self.cells.iter())
    }
}

pub fn pos_to_index(size: &Coord, pos: &Coord) -> usize {
    (pos.x + pos.y * size.x) as usize
}

pub fn rect_contains(size: &Coord, pos: &Coord) -> bool {
    (0..size.x).contains(&pos.x) && (0..size.y).contains(&pos.y)
}

/// Raster order: left to right, top to bottom
pub fn iter_area(size: Coord) -> impl Iterator<Item = Coord> {
    (0..size.y).flat_map(move |y| (0..size.x).map(move |x| Coord::new(x, y)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::c;

    #[test]
    fn out_of_bounds_is_none() {
        let mut grid = Grid::fill(c!(3, 2), 0);
        assert_eq!(grid.get(&c!(3, 0)), None);
        assert_eq!(grid.get(&c!(0, -1)), None);
        assert!(!grid.set(&c!(-1, 0), 4));
        assert!(grid.set(&c!(2, 1), 4));
        assert_eq!(grid.get(&c!(2, 1)), Some(&4));
    }

    #[test]
    fn iter_is_raster_order() {
        let grid = Grid::fill(c!(2, 2), 'a');
        let order: Vec<Coord> = grid.iter().map(|(xy, _)| xy).collect();
        assert_eq!(order, vec![c!(0, 0), c!(1, 0), c!(0, 1), c!(1, 1)]);
    }
}
