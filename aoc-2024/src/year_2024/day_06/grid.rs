use super::guard::Point;
use aoc_core::ParseError;

const GUARD: char = '^';
const OBSTACLE: char = '#';
const EMPTY: char = '.';

/// Fixed-size field of empty and obstacle cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    obstacles: Vec<bool>,
}

impl Grid {
    /// Empty grid of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            obstacles: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        let x = usize::try_from(p.x).ok()?;
        let y = usize::try_from(p.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.index(p).is_some()
    }

    /// Out-of-bounds cells are never obstacles
    pub fn is_obstacle(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.obstacles[i])
    }

    /// Put an obstacle on `p`. Returns `false` if `p` is outside the grid or
    /// already blocked.
    pub fn place_obstacle(&mut self, p: Point) -> bool {
        match self.index(p) {
            Some(i) if !self.obstacles[i] => {
                self.obstacles[i] = true;
                true
            }
            _ => false,
        }
    }

    pub fn obstacles(&self) -> impl Iterator<Item = Point> + '_ {
        self.obstacles
            .iter()
            .enumerate()
            .filter(|(_, blocked)| **blocked)
            .map(|(i, _)| Point::new((i % self.width) as i32, (i / self.width) as i32))
    }
}

/// The lab map: obstacles plus where the guard starts, if anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatrolMap {
    pub grid: Grid,
    pub start: Option<Point>,
}

impl PatrolMap {
    /// Parse rows of `.`, `#` and a single `^`
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let rows: Vec<&str> = input.trim_end().lines().collect();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if rows.is_empty() || width == 0 {
            return Err(ParseError::MissingData("empty map".into()));
        }
        if i32::try_from(width.max(rows.len())).is_err() {
            return Err(ParseError::InvalidFormat("map too large".into()));
        }

        let mut grid = Grid::new(width, rows.len());
        let mut start = None;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(ParseError::at_line(
                    y + 1,
                    format!("expected {} cells, found {}", width, row.chars().count()),
                ));
            }
            for (x, cell) in row.chars().enumerate() {
                let point = Point::new(x as i32, y as i32);
                match cell {
                    EMPTY => {}
                    OBSTACLE => {
                        grid.place_obstacle(point);
                    }
                    GUARD if start.is_none() => start = Some(point),
                    GUARD => {
                        return Err(ParseError::at_line(y + 1, "more than one guard marker"));
                    }
                    other => {
                        return Err(ParseError::at_line(
                            y + 1,
                            format!("unexpected cell {:?} at column {}", other, x + 1),
                        ));
                    }
                }
            }
        }

        Ok(Self { grid, start })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_guard() {
        let map = PatrolMap::parse("....\n....\n...^\n....").unwrap();
        assert_eq!(map.start, Some(Point::new(3, 2)));
        assert_eq!((map.grid.width(), map.grid.height()), (4, 4));
    }

    #[test]
    fn finds_every_obstacle() {
        let map = PatrolMap::parse(".##.\n.#..\n..#.\n#..#").unwrap();
        let obstacles: Vec<Point> = map.grid.obstacles().collect();
        assert_eq!(
            obstacles,
            vec![
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(1, 1),
                Point::new(2, 2),
                Point::new(0, 3),
                Point::new(3, 3),
            ]
        );
        assert_eq!(map.start, None);
    }

    #[test]
    fn bounds_are_exclusive_of_width_and_height() {
        let grid = Grid::new(3, 3);
        assert!(grid.contains(Point::new(1, 2)));
        assert!(!grid.contains(Point::new(1, 3)));
        assert!(!grid.contains(Point::new(-1, 0)));
        assert!(!grid.contains(Point::new(3, 0)));
    }

    #[test]
    fn placing_obstacles() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.place_obstacle(Point::new(1, 1)));
        assert!(!grid.place_obstacle(Point::new(1, 1)));
        assert!(!grid.place_obstacle(Point::new(2, 0)));
        assert!(grid.is_obstacle(Point::new(1, 1)));
        assert!(!grid.is_obstacle(Point::new(5, 5)));
    }

    #[test]
    fn parsing_is_repeatable() {
        let text = ".#.\n.^.\n...";
        assert_eq!(PatrolMap::parse(text).unwrap(), PatrolMap::parse(text).unwrap());
    }

    #[test]
    fn malformed_maps_are_rejected() {
        assert!(matches!(PatrolMap::parse(""), Err(ParseError::MissingData(_))));
        assert!(matches!(
            PatrolMap::parse("...\n..\n..."),
            Err(ParseError::AtLine { line: 2, .. })
        ));
        assert!(matches!(
            PatrolMap::parse("..x\n..."),
            Err(ParseError::AtLine { line: 1, .. })
        ));
        assert!(matches!(
            PatrolMap::parse("^..\n..^"),
            Err(ParseError::AtLine { line: 2, .. })
        ));
    }
}
