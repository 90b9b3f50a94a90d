use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Snake body, head first. `body_set` mirrors `body` for O(1) occupancy checks.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    /// Lays out `length` segments in a horizontal line ending at `head`, trailing to the left.
    /// Callers guarantee `length >= 1` and `head.x + 1 >= length`.
    pub fn horizontal(head: Point, length: usize) -> Self {
        let body: VecDeque<Point> = (0..length)
            .map(|i| Point::new(head.x - i, head.y))
            .collect();
        Self::from_segments(body)
    }

    pub fn from_segments(body: impl IntoIterator<Item = Point>) -> Self {
        let body: VecDeque<Point> = body.into_iter().collect();
        let body_set = body.iter().copied().collect();
        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    /// Whether moving the head onto `next_head` would run into the body.
    /// The tail cell only counts when the snake grows this tick, since otherwise it is vacated.
    pub fn would_bite(&self, next_head: Point, grows: bool) -> bool {
        self.body_set.contains(&next_head) && (grows || next_head != self.tail())
    }

    pub fn advance(&mut self, next_head: Point, grows: bool) {
        if !grows && let Some(tail) = self.body.pop_back() {
            self.body_set.remove(&tail);
        }
        self.body.push_front(next_head);
        self.body_set.insert(next_head);
    }
}
