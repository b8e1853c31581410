//! Tile grid and the collision oracle shared by movement and ray marching.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Open,
    Wall,
}

pub const MAZE_COLS: usize = 15;
pub const MAZE_ROWS: usize = 11;

// 0 = open, 1 = wall
pub const MAZE: [[u8; MAZE_COLS]; MAZE_ROWS] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no cells")]
    Empty,
    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("cell ({col}, {row}) holds {value}, expected 0 or 1")]
    BadCell { col: usize, row: usize, value: u8 },
    #[error("{what} spawn ({col}, {row}) is not an open cell")]
    Blocked {
        what: &'static str,
        col: i32,
        row: i32,
    },
}

/// Immutable rectangular maze. Anything outside the grid reads as wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    width: usize,
    height: usize,
    tiles: Vec<Tile>, // row-major
}

impl Map {
    /// The built-in level.
    pub fn maze() -> Self {
        let tiles = MAZE
            .iter()
            .flat_map(|row| row.iter().map(|&v| tile_from(v)))
            .collect();
        Self {
            width: MAZE_COLS,
            height: MAZE_ROWS,
            tiles,
        }
    }

    /// Build a map from rows of 0/1 values.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MapError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != width {
                return Err(MapError::Ragged {
                    row,
                    len: cells.len(),
                    expected: width,
                });
            }
            for (col, &value) in cells.iter().enumerate() {
                if value > 1 {
                    return Err(MapError::BadCell { col, row, value });
                }
                tiles.push(tile_from(value));
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            tiles,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile(&self, col: i32, row: i32) -> Tile {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return Tile::Wall;
        }
        self.tiles[row as usize * self.width + col as usize]
    }

    #[inline]
    pub fn is_open_cell(&self, col: i32, row: i32) -> bool {
        self.tile(col, row) == Tile::Open
    }

    /// Is the cell containing world point (x, y) open?
    #[inline]
    pub fn is_open_at(&self, x: f32, y: f32) -> bool {
        // Also rejects NaN.
        if !(x >= 0.0 && y >= 0.0) {
            return false;
        }
        let (col, row) = cell_of([x, y]);
        self.is_open_cell(col, row)
    }

    /// Iterate `(col, row, tile)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &t)| (i % self.width, i / self.width, t))
    }
}

#[inline]
fn tile_from(v: u8) -> Tile {
    if v == 0 { Tile::Open } else { Tile::Wall }
}

/// Grid cell containing a world position.
#[inline]
pub fn cell_of(p: [f32; 2]) -> (i32, i32) {
    (p[0].floor() as i32, p[1].floor() as i32)
}

/// World position of a cell's centre.
#[inline]
pub fn cell_center(col: i32, row: i32) -> [f32; 2] {
    [col as f32 + 0.5, row as f32 + 0.5]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_maze_matches_layout() {
        let map = Map::maze();
        assert_eq!(map.width(), 15);
        assert_eq!(map.height(), 11);
        assert!(map.is_open_cell(1, 1));
        assert!(map.is_open_cell(2, 1));
        assert!(!map.is_open_cell(4, 1));
        assert!(map.is_open_cell(7, 5));
        assert!(map.is_open_cell(13, 9));
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let map = Map::maze();
        let w = map.width() as f32;
        let h = map.height() as f32;
        for &(x, y) in &[
            (-0.01, 1.5),
            (1.5, -0.01),
            (w, 1.5),
            (1.5, h),
            (w + 100.0, h + 100.0),
            (-1e9, -1e9),
            (f32::NAN, 1.5),
            (f32::INFINITY, 1.5),
        ] {
            assert!(!map.is_open_at(x, y), "({x}, {y}) should be closed");
        }
        assert_eq!(map.tile(-1, 0), Tile::Wall);
        assert_eq!(map.tile(0, 99), Tile::Wall);
    }

    #[test]
    fn world_point_resolves_to_containing_cell() {
        let map = Map::maze();
        assert!(map.is_open_at(1.0, 1.0));
        assert!(map.is_open_at(1.99, 1.99));
        assert!(!map.is_open_at(0.99, 1.5));
        assert!(!map.is_open_at(4.5, 1.5));
    }

    #[test]
    fn from_rows_validates_shape_and_values() {
        assert_eq!(Map::from_rows::<[u8; 0]>(&[]), Err(MapError::Empty));
        assert_eq!(
            Map::from_rows(&[vec![1u8, 1], vec![1u8]]),
            Err(MapError::Ragged {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            Map::from_rows(&[[1u8, 2]]),
            Err(MapError::BadCell {
                col: 1,
                row: 0,
                value: 2
            })
        );

        let map = Map::from_rows(&[[1u8, 1, 1], [1, 0, 1], [1, 1, 1]]).unwrap();
        assert!(map.is_open_cell(1, 1));
        assert_eq!(map.cells().filter(|c| c.2 == Tile::Open).count(), 1);
    }

    #[test]
    fn from_rows_agrees_with_builtin() {
        assert_eq!(Map::from_rows(&MAZE).unwrap(), Map::maze());
    }

    #[test]
    fn cell_helpers() {
        assert_eq!(cell_of([1.5, 1.5]), (1, 1));
        assert_eq!(cell_of([13.99, 9.0]), (13, 9));
        assert_eq!(cell_center(7, 5), [7.5, 5.5]);
    }
}
