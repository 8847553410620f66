use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 4, tags = ["2024", "grid"])]
pub struct Day04;

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Rectangular block of letters, indexed `(x, y)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGrid<'a> {
    rows: Vec<&'a [u8]>,
}

impl<'a> LetterGrid<'a> {
    pub fn parse(input: &'a str) -> Result<Self, ParseError> {
        let rows: Vec<&[u8]> = input.trim().lines().map(str::as_bytes).collect();
        let width = rows.first().map_or(0, |row| row.len());
        if width == 0 {
            return Err(ParseError::MissingData("empty word search".into()));
        }
        if let Some(idx) = rows.iter().position(|row| row.len() != width) {
            return Err(ParseError::at_line(
                idx + 1,
                format!("expected {} letters, found {}", width, rows[idx].len()),
            ));
        }
        Ok(Self { rows })
    }

    pub fn get(&self, x: isize, y: isize) -> Option<u8> {
        let row = self.rows.get(usize::try_from(y).ok()?)?;
        row.get(usize::try_from(x).ok()?).copied()
    }

    fn cells(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            (0..row.len()).map(move |x| (x as isize, y as isize))
        })
    }

    /// Whether `word` is spelled starting at `(x, y)` and walking `(dx, dy)`
    fn spells(&self, word: &[u8], (x, y): (isize, isize), (dx, dy): (isize, isize)) -> bool {
        word.iter().zip(0..).all(|(&letter, step)| {
            self.get(x + dx * step, y + dy * step) == Some(letter)
        })
    }

    /// Occurrences of `word` in any of the eight directions
    pub fn count_word(&self, word: &str) -> usize {
        self.cells()
            .map(|cell| {
                DIRECTIONS
                    .iter()
                    .filter(|&&direction| self.spells(word.as_bytes(), cell, direction))
                    .count()
            })
            .sum()
    }

    /// `A` cells whose two diagonals each read `MAS` in either direction
    pub fn count_x_mas(&self) -> usize {
        let diagonal = |(x, y): (isize, isize), dx: isize| {
            matches!(
                (self.get(x - dx, y - 1), self.get(x + dx, y + 1)),
                (Some(b'M'), Some(b'S')) | (Some(b'S'), Some(b'M'))
            )
        };
        self.cells()
            .filter(|&(x, y)| self.get(x, y) == Some(b'A'))
            .filter(|&cell| diagonal(cell, 1) && diagonal(cell, -1))
            .count()
    }
}

impl AocParser for Day04 {
    type SharedData<'a> = LetterGrid<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        LetterGrid::parse(input)
    }
}

impl PartSolver<1> for Day04 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_word("XMAS").to_string())
    }
}

impl PartSolver<2> for Day04 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_x_mas().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_core::Solver;

    const EXAMPLE: &str = "\
MMMSXXMASM
MSAMXMSMSA
AMXSXMAAMM
MSAMASMSMX
XMASAMXAMM
XXAMMXXAMA
SMSMSASXSS
SAXAMASAAA
MAMMMXMMMM
MXMXAXMASX
";

    #[test]
    fn example() {
        let mut grid = Day04::parse(EXAMPLE).unwrap();
        assert_eq!(Day04::solve_part(&mut grid, 1).unwrap(), "18");
        assert_eq!(Day04::solve_part(&mut grid, 2).unwrap(), "9");
    }

    #[test]
    fn counts_every_direction() {
        let grid = LetterGrid::parse("S..S..S\n.A.A.A.\n..MMM..\nSAMXMAS\n..MMM..\n.A.A.A.\nS..S..S")
            .unwrap();
        assert_eq!(grid.count_word("XMAS"), 8);
    }

    #[test]
    fn single_cross() {
        let grid = LetterGrid::parse("M.S\n.A.\nM.S").unwrap();
        assert_eq!(grid.count_x_mas(), 1);
        let grid = LetterGrid::parse("M.M\n.A.\nM.S").unwrap();
        assert_eq!(grid.count_x_mas(), 0);
    }

    #[test]
    fn ragged_rows_rejected() {
        assert!(matches!(
            LetterGrid::parse("XMAS\nXMA\n"),
            Err(ParseError::AtLine { line: 2, .. })
        ));
        assert!(matches!(LetterGrid::parse("\n"), Err(ParseError::MissingData(_))));
    }
}
