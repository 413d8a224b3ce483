/// Food: a single cell the snake is steering towards.

use std::collections::HashSet;

use rand::Rng;

use super::grid::{Grid, Position};

#[derive(Clone, Debug)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Place food on a random cell outside `occupied`.
    pub fn new<R: Rng + ?Sized>(grid: &Grid, occupied: &HashSet<Position>, rng: &mut R) -> Self {
        let mut food = Food { position: Position::new(0, 0) };
        food.relocate(grid, occupied, rng);
        food
    }

    #[cfg(test)]
    pub fn at(position: Position) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Rejection-sample uniform grid cells until one is free.
    ///
    /// Does not terminate if `occupied` covers the whole board; board
    /// capacity is far beyond any reachable snake length.
    pub fn relocate<R: Rng + ?Sized>(&mut self, grid: &Grid, occupied: &HashSet<Position>, rng: &mut R) {
        debug_assert!(occupied.len() < grid.cell_count(), "no free cell for food");
        loop {
            let col = rng.gen_range(0..grid.width_cells());
            let row = rng.gen_range(0..grid.height_cells());
            let pos = grid.cell(col, row);
            if !occupied.contains(&pos) {
                self.position = pos;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn lands_on_a_grid_cell() {
        let g = Grid::new(20, 32, 24);
        let mut rng = StdRng::seed_from_u64(7);
        let mut food = Food::new(&g, &HashSet::new(), &mut rng);
        for _ in 0..500 {
            food.relocate(&g, &HashSet::new(), &mut rng);
            assert!(g.contains(food.position()));
        }
    }

    #[test]
    fn avoids_occupied_cells() {
        let g = Grid::new(20, 4, 3);
        let mut rng = StdRng::seed_from_u64(99);
        // Everything but (2, 1) is taken.
        let free = g.cell(2, 1);
        let occupied: HashSet<Position> = (0..4)
            .flat_map(|c| (0..3).map(move |r| (c, r)))
            .map(|(c, r)| g.cell(c, r))
            .filter(|p| *p != free)
            .collect();
        let mut food = Food::at(g.cell(0, 0));
        for _ in 0..20 {
            food.relocate(&g, &occupied, &mut rng);
            assert_eq!(food.position(), free);
        }
    }

    #[test]
    fn never_inside_snake_body() {
        let g = Grid::new(20, 6, 5);
        let mut rng = StdRng::seed_from_u64(3);
        let body: HashSet<Position> = (0..6).map(|c| g.cell(c, 2)).collect();
        let mut food = Food::new(&g, &body, &mut rng);
        for _ in 0..200 {
            assert!(!body.contains(&food.position()));
            food.relocate(&g, &body, &mut rng);
        }
    }

    #[test]
    fn seeded_placement_is_reproducible() {
        let g = Grid::new(20, 32, 24);
        let a = Food::new(&g, &HashSet::new(), &mut StdRng::seed_from_u64(42));
        let b = Food::new(&g, &HashSet::new(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a.position(), b.position());
    }
}
