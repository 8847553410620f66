use std::collections::HashSet;

/// Grid coordinate, `x` = column and `y` = row. Signed so a guard can step
/// off the top or left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `heading`
    pub fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    /// Quarter turn clockwise
    pub fn turn_right(self) -> Self {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    /// Unit vector, with `y` growing downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
        }
    }
}

/// Patrolling guard.
///
/// `visited` only grows when the guard steps off a cell, so a freshly
/// created guard has visited nothing, not even its own cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    position: Point,
    heading: Heading,
    visited: HashSet<Point>,
}

impl Guard {
    pub fn new(position: Point, heading: Heading) -> Self {
        Self {
            position,
            heading,
            visited: HashSet::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn visited(&self) -> &HashSet<Point> {
        &self.visited
    }

    pub fn into_visited(self) -> HashSet<Point> {
        self.visited
    }

    /// Cell the guard would enter on its next step
    pub fn next_position(&self) -> Point {
        self.position.step(self.heading)
    }

    pub fn turn_right(&mut self) {
        self.heading = self.heading.turn_right();
    }

    /// Record the current cell, then move one cell forward
    pub fn step_forward(&mut self) {
        self.visited.insert(self.position);
        self.position = self.next_position();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_guard_has_position_heading_and_no_visits() {
        let guard = Guard::new(Point::new(1, 1), Heading::Up);
        assert_eq!(guard.position(), Point::new(1, 1));
        assert_eq!(guard.heading().delta(), (0, -1));
        assert!(guard.visited().is_empty());
    }

    #[test]
    fn moves_forward_in_its_heading() {
        let mut guard = Guard::new(Point::new(1, 1), Heading::Up);
        guard.step_forward();
        assert_eq!(guard.position(), Point::new(1, 0));

        let guard = Guard::new(Point::new(1, 1), Heading::Down);
        assert_eq!(guard.next_position(), Point::new(1, 2));
    }

    #[test]
    fn turns_clockwise_through_all_headings() {
        let mut guard = Guard::new(Point::new(0, 0), Heading::Down);
        guard.turn_right();
        assert_eq!(guard.heading(), Heading::Left);
        guard.turn_right();
        assert_eq!(guard.heading(), Heading::Up);
        guard.turn_right();
        assert_eq!(guard.heading(), Heading::Right);
        guard.turn_right();
        assert_eq!(guard.heading(), Heading::Down);
    }

    #[test]
    fn keeps_distinct_visited_cells() {
        let mut guard = Guard::new(Point::new(1, 1), Heading::Down);
        guard.step_forward(); // down
        guard.turn_right(); // facing left
        guard.step_forward();
        guard.step_forward();
        guard.turn_right();
        guard.turn_right(); // facing right
        guard.step_forward(); // back over (-1, 2), not counted twice

        let expected: HashSet<Point> = [
            Point::new(1, 1),
            Point::new(1, 2),
            Point::new(0, 2),
            Point::new(-1, 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(guard.visited(), &expected);
        assert_eq!(guard.position(), Point::new(0, 2));
    }
}
