//! Conway's Game of Life on the 8x8 grid.

use super::Pattern;
use crate::color::Color;
use crate::error::MatrixError;
use crate::surface::{DisplaySurface, GRID_SIZE};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZE: usize = GRID_SIZE as usize;

/// Chance of a cell starting alive in a random soup.
const SOUP_DENSITY: f64 = 0.35;

/// A bounded 8x8 Life board. Cells beyond the edge count as dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifeGrid {
    cells: [[bool; SIZE]; SIZE],
}

impl LifeGrid {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// A board with the given `(x, y)` cells alive.
    pub fn from_cells(alive: &[(u8, u8)]) -> Self {
        let mut grid = Self::new();
        for &(x, y) in alive {
            grid.set(x, y, true);
        }
        grid
    }

    /// The R-pentomino, centred.
    pub fn r_pentomino() -> Self {
        Self::from_cells(&[(3, 2), (4, 2), (2, 3), (3, 3), (3, 4)])
    }

    /// Random soup with at least three live cells.
    pub fn random(rng: &mut impl Rng) -> Self {
        loop {
            let mut grid = Self::new();
            for column in grid.cells.iter_mut() {
                for cell in column.iter_mut() {
                    *cell = rng.gen_bool(SOUP_DENSITY);
                }
            }
            if grid.population() >= 3 {
                return grid;
            }
        }
    }

    /// Whether the cell at (x, y) is alive. Out-of-range cells are dead.
    pub fn get(&self, x: u8, y: u8) -> bool {
        self.cells
            .get(x as usize)
            .and_then(|column| column.get(y as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Set the cell at (x, y). Out-of-range cells are ignored.
    pub fn set(&mut self, x: u8, y: u8, alive: bool) {
        if let Some(cell) = self
            .cells
            .get_mut(x as usize)
            .and_then(|column| column.get_mut(y as usize))
        {
            *cell = alive;
        }
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().flatten().filter(|c| **c).count()
    }

    fn neighbors(&self, x: usize, y: usize) -> usize {
        let mut count = 0;
        for nx in x.saturating_sub(1)..=(x + 1).min(SIZE - 1) {
            for ny in y.saturating_sub(1)..=(y + 1).min(SIZE - 1) {
                if (nx, ny) != (x, y) && self.cells[nx][ny] {
                    count += 1;
                }
            }
        }
        count
    }

    /// The next generation: survive on 2-3 neighbors, born on exactly 3.
    pub fn step(&self) -> Self {
        let mut next = Self::new();
        for x in 0..SIZE {
            for y in 0..SIZE {
                let alive = self.cells[x][y];
                next.cells[x][y] = matches!((alive, self.neighbors(x, y)), (true, 2) | (_, 3));
            }
        }
        next
    }
}

/// Game of Life demo.
///
/// Newborn cells show yellow and survivors green. When the board dies out or
/// settles into a still life or a period-2 oscillator it is re-seeded with a
/// random soup.
#[derive(Debug, Clone)]
pub struct Life {
    grid: LifeGrid,
    previous: Option<LifeGrid>,
    generation: u64,
    rng: StdRng,
}

impl Life {
    /// Create a Life demo starting from the R-pentomino.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a Life demo whose re-seeding is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            grid: LifeGrid::r_pentomino(),
            previous: None,
            generation: 0,
            rng,
        }
    }

    /// Replace the current board.
    pub fn load(&mut self, grid: LifeGrid) {
        self.grid = grid;
        self.previous = None;
        self.generation = 0;
    }

    /// The board the next update will draw.
    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    /// Generations since the last reset or re-seed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn is_stagnant(&self, next: &LifeGrid) -> bool {
        next.population() == 0 || *next == self.grid || Some(*next) == self.previous
    }
}

impl Default for Life {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for Life {
    fn name(&self) -> &'static str {
        "life"
    }

    fn reset(&mut self) {
        self.load(LifeGrid::r_pentomino());
    }

    fn update(&mut self, surface: &mut dyn DisplaySurface) -> Result<(), MatrixError> {
        surface.fill(Color::Off)?;
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                if !self.grid.get(x, y) {
                    continue;
                }
                let newborn = self.previous.is_some_and(|prev| !prev.get(x, y));
                let color = if newborn { Color::Yellow } else { Color::Green };
                surface.set(x, y, color)?;
            }
        }

        let next = self.grid.step();
        if self.is_stagnant(&next) {
            debug!("life settled after {} generations, re-seeding", self.generation);
            let soup = LifeGrid::random(&mut self.rng);
            self.load(soup);
        } else {
            self.previous = Some(self.grid);
            self.grid = next;
            self.generation += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSurface;

    #[test]
    fn test_block_is_still() {
        let block = LifeGrid::from_cells(&[(3, 3), (3, 4), (4, 3), (4, 4)]);
        assert_eq!(block.step(), block);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = LifeGrid::from_cells(&[(2, 4), (3, 4), (4, 4)]);
        let vertical = LifeGrid::from_cells(&[(3, 3), (3, 4), (3, 5)]);
        assert_eq!(horizontal.step(), vertical);
        assert_eq!(vertical.step(), horizontal);
    }

    #[test]
    fn test_edges_do_not_wrap() {
        let edge = LifeGrid::from_cells(&[(0, 0), (1, 0), (2, 0)]);
        let next = edge.step();
        assert_eq!(next, LifeGrid::from_cells(&[(1, 0), (1, 1)]));
        assert!(!next.get(1, 7));
    }

    #[test]
    fn test_lonely_and_crowded_cells_die() {
        let lonely = LifeGrid::from_cells(&[(5, 5)]);
        assert_eq!(lonely.step().population(), 0);

        // Centre of a plus has four neighbors.
        let plus = LifeGrid::from_cells(&[(4, 4), (3, 4), (5, 4), (4, 3), (4, 5)]);
        assert!(!plus.step().get(4, 4));
    }

    #[test]
    fn test_update_draws_board_and_advances() {
        let mock = MockSurface::new();
        let mut surface = mock.clone();
        let mut life = Life::with_seed(1);
        let start = *life.grid();

        life.update(&mut surface).unwrap();
        assert_eq!(mock.state().lit_cells(), start.population());
        assert_eq!(mock.cell(3, 3), Color::Green);
        assert_eq!(*life.grid(), start.step());
        assert_eq!(life.generation(), 1);
    }

    #[test]
    fn test_newborn_cells_are_yellow() {
        let mock = MockSurface::new();
        let mut surface = mock.clone();
        let mut life = Life::with_seed(1);
        life.load(LifeGrid::from_cells(&[(2, 4), (3, 4), (4, 4)]));

        life.update(&mut surface).unwrap();
        life.update(&mut surface).unwrap();

        assert_eq!(mock.cell(3, 4), Color::Green);
        assert_eq!(mock.cell(3, 3), Color::Yellow);
        assert_eq!(mock.cell(3, 5), Color::Yellow);
    }

    #[test]
    fn test_still_life_is_reseeded() {
        let block = LifeGrid::from_cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let mut surface = MockSurface::new();
        let mut life = Life::with_seed(3);
        life.load(block);

        life.update(&mut surface).unwrap();
        assert_ne!(*life.grid(), block);
        assert!(life.grid().population() >= 3);
        assert_eq!(life.generation(), 0);
    }

    #[test]
    fn test_blinker_is_reseeded_after_one_period() {
        let horizontal = LifeGrid::from_cells(&[(2, 4), (3, 4), (4, 4)]);
        let mut surface = MockSurface::new();
        let mut life = Life::with_seed(5);
        life.load(horizontal);

        life.update(&mut surface).unwrap();
        assert_eq!(*life.grid(), horizontal.step());

        life.update(&mut surface).unwrap();
        assert_eq!(life.generation(), 0);
    }

    #[test]
    fn test_reset_loads_r_pentomino() {
        let mut surface = MockSurface::new();
        let mut life = Life::with_seed(9);
        for _ in 0..5 {
            life.update(&mut surface).unwrap();
        }
        life.reset();
        assert_eq!(*life.grid(), LifeGrid::r_pentomino());
        assert_eq!(life.generation(), 0);
    }
}
