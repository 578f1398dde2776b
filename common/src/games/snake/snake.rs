use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Body segments from head (front) to tail (back).
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    /// Builds a snake from segments listed head first.
    pub fn from_segments(segments: impl IntoIterator<Item = Point>) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            body_set: HashSet::new(),
        };
        for segment in segments {
            snake.body.push_back(segment);
            snake.body_set.insert(segment);
        }
        snake
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn push_head(&mut self, point: Point) {
        self.body.push_front(point);
        self.body_set.insert(point);
    }

    pub fn pop_tail(&mut self) -> Option<Point> {
        let tail = self.body.pop_back()?;
        self.body_set.remove(&tail);
        Some(tail)
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_long() -> Snake {
        Snake::from_segments([Point::new(1, 3), Point::new(1, 2), Point::new(1, 1)])
    }

    #[test]
    fn test_head_and_tail() {
        let snake = three_long();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(1, 3));
        assert_eq!(snake.tail(), Point::new(1, 1));
    }

    #[test]
    fn test_push_head_pop_tail() {
        let mut snake = three_long();
        snake.push_head(Point::new(1, 4));
        assert_eq!(snake.pop_tail(), Some(Point::new(1, 1)));

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(1, 4));
        assert_eq!(snake.tail(), Point::new(1, 2));
        assert!(snake.contains(&Point::new(1, 4)));
        assert!(!snake.contains(&Point::new(1, 1)));
    }

    #[test]
    fn test_segments_are_head_first() {
        let snake = three_long();
        let segments: Vec<Point> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![Point::new(1, 3), Point::new(1, 2), Point::new(1, 1)]
        );
    }
}
