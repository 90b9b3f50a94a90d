use crate::games::RandomSource;
use super::types::{FieldSize, Point};

pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Found by a uniform random draw.
    Random(Point),
    /// Random budget ran out; first free cell in row-major order.
    Scanned(Point),
    /// Every cell is occupied.
    BoardFull,
}

impl Placement {
    pub fn point(&self) -> Option<Point> {
        match self {
            Placement::Random(point) | Placement::Scanned(point) => Some(*point),
            Placement::BoardFull => None,
        }
    }
}

/// Picks a free cell: up to `max_attempts` uniform draws, then one row-major scan.
///
/// Work is bounded by `max_attempts` draws plus one pass over the field. Only the scan
/// fallback is non-uniform.
pub fn place_food<R, F>(field: FieldSize, is_occupied: F, rng: &mut R, max_attempts: usize) -> Placement
where
    R: RandomSource + ?Sized,
    F: Fn(&Point) -> bool,
{
    for _ in 0..max_attempts {
        let x = rng.next_index(field.width);
        let y = rng.next_index(field.height);
        let candidate = Point::new(x, y);

        if !is_occupied(&candidate) {
            return Placement::Random(candidate);
        }
    }

    match field.cells().find(|cell| !is_occupied(cell)) {
        Some(cell) => Placement::Scanned(cell),
        None => Placement::BoardFull,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::games::SessionRng;
    use crate::games::session_rng::testing::ScriptedRng;

    fn full_except(field: FieldSize, free: Point) -> HashSet<Point> {
        field.cells().filter(|cell| *cell != free).collect()
    }

    #[test]
    fn test_first_free_draw_is_taken() {
        let field = FieldSize::new(4, 4);
        let occupied: HashSet<Point> = [Point::new(1, 1)].into_iter().collect();
        // (1,1) is rejected, (2,3) accepted.
        let mut rng = ScriptedRng::new(vec![1, 1, 2, 3]);

        let placement = place_food(field, |p| occupied.contains(p), &mut rng, 10);

        assert_eq!(placement, Placement::Random(Point::new(2, 3)));
        assert_eq!(rng.calls, 4);
    }

    #[test]
    fn test_single_free_cell_found_by_scan() {
        let field = FieldSize::new(5, 5);
        let free = Point::new(3, 4);
        let occupied = full_except(field, free);
        // Always draws (0,0), which is occupied.
        let mut rng = ScriptedRng::new(vec![0]);

        let placement = place_food(field, |p| occupied.contains(p), &mut rng, DEFAULT_PLACEMENT_ATTEMPTS);

        assert_eq!(placement, Placement::Scanned(free));
        assert_eq!(placement.point(), Some(free));
    }

    #[test]
    fn test_single_free_cell_with_real_rng() {
        let field = FieldSize::new(6, 6);
        let free = Point::new(5, 0);
        let occupied = full_except(field, free);
        let mut rng = SessionRng::new(99);

        let placement = place_food(field, |p| occupied.contains(p), &mut rng, DEFAULT_PLACEMENT_ATTEMPTS);

        assert_eq!(placement.point(), Some(free));
    }

    #[test]
    fn test_full_board_reports_board_full() {
        let field = FieldSize::new(3, 3);
        let occupied: HashSet<Point> = field.cells().collect();
        let mut rng = ScriptedRng::new(vec![0, 1, 2]);

        let placement = place_food(field, |p| occupied.contains(p), &mut rng, 50);

        assert_eq!(placement, Placement::BoardFull);
        assert_eq!(placement.point(), None);
    }

    #[test]
    fn test_draw_budget_is_bounded() {
        let field = FieldSize::new(10, 10);
        let occupied: HashSet<Point> = field.cells().collect();
        let mut rng = ScriptedRng::new(vec![4, 2, 7]);

        place_food(field, |p| occupied.contains(p), &mut rng, 25);

        // Two draws per attempt, nothing more after the budget is spent.
        assert_eq!(rng.calls, 50);
    }

    #[test]
    fn test_scan_is_row_major() {
        let field = FieldSize::new(3, 3);
        let free: HashSet<Point> = [Point::new(2, 0), Point::new(0, 1)].into_iter().collect();
        let mut rng = ScriptedRng::new(vec![1]);

        let placement = place_food(field, |p| !free.contains(p), &mut rng, 5);

        assert_eq!(placement, Placement::Scanned(Point::new(2, 0)));
    }
}
