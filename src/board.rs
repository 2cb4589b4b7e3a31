//! Go rules on a plain 2D board.
//!
//! The board is a row-major grid of `Option<Color>`, where `None` is an empty point.
//! Every operation here works on a single board snapshot; there is no move history
//! apart from the optional previous board passed to [`Board::place_with_ko`].

use std::fmt;

use crate::constants::MAX_SIZE;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A point on the board as `(x, y)`, with `y = 0` the top row.
pub type Point = (usize, usize);

/// A move: a stone placement or a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Play(Point),
    Pass,
}

/// Reason a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Point lies outside the board
    OutOfBounds,
    /// Point is not empty
    Occupied,
    /// Move would leave the placed group without liberties
    Suicide,
    /// Move recreates the previous position
    Ko,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds => write!(f, "illegal move: point off the board"),
            MoveError::Occupied => write!(f, "illegal move: point not empty"),
            MoveError::Suicide => write!(f, "illegal move: suicide"),
            MoveError::Ko => write!(f, "illegal move: retakes ko"),
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Stone at `(x, y)`. Off-board points read as empty.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.cells[self.idx(x, y)]
    }

    fn set(&mut self, x: usize, y: usize, stone: Option<Color>) {
        let i = self.idx(x, y);
        self.cells[i] = stone;
    }

    /// Orthogonal on-board neighbors of `(x, y)`.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if x > 0 {
            v.push((x - 1, y));
        }
        if x + 1 < s {
            v.push((x + 1, y));
        }
        if y > 0 {
            v.push((x, y - 1));
        }
        if y + 1 < s {
            v.push((x, y + 1));
        }
        v.into_iter()
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        (0..s).flat_map(move |y| (0..s).map(move |x| (x, y)))
    }

    /// Number of stones of `color` on the board.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    /// Check whether the group containing `(x, y)` touches at least one empty point.
    ///
    /// Flood-fills over same-colored stones, visiting each point once, and stops at
    /// the first liberty found. An empty starting point has no group and returns false.
    pub fn group_has_liberty(&self, x: usize, y: usize) -> bool {
        let Some(color) = self.get(x, y) else {
            return false;
        };
        let mut stack = vec![(x, y)];
        let mut visited = vec![false; self.size * self.size];
        visited[self.idx(x, y)] = true;

        while let Some((cx, cy)) = stack.pop() {
            for (nx, ny) in self.neighbors(cx, cy) {
                match self.get(nx, ny) {
                    None => return true,
                    Some(c) if c == color => {
                        let ni = self.idx(nx, ny);
                        if !visited[ni] {
                            visited[ni] = true;
                            stack.push((nx, ny));
                        }
                    }
                    _ => {}
                }
            }
        }
        false
    }

    /// Remove every opponent stone of `player` whose group has no liberty.
    ///
    /// Dead stones are collected on the unmodified board first and cleared afterwards,
    /// so each dead group goes at once. Returns the cleared points in row-major order.
    pub fn resolve_captures(&mut self, player: Color) -> Vec<Point> {
        let opp = player.opponent();
        let dead: Vec<Point> = self
            .points()
            .filter(|&(x, y)| self.get(x, y) == Some(opp) && !self.group_has_liberty(x, y))
            .collect();
        for &(x, y) in &dead {
            self.set(x, y, None);
        }
        dead
    }

    /// Check whether `player` playing at `(x, y)` would be suicide.
    ///
    /// Tentatively plays the stone, resolves captures and tests the new group, then
    /// restores every captured stone and clears the point. The board is unchanged
    /// afterwards. Off-board or occupied points are not suicide (they are rejected
    /// for other reasons).
    pub fn is_suicide(&mut self, x: usize, y: usize, player: Color) -> bool {
        if !self.in_bounds(x, y) || self.get(x, y).is_some() {
            return false;
        }
        self.set(x, y, Some(player));
        let captured = self.resolve_captures(player);
        let suicide = !self.group_has_liberty(x, y);

        let opp = player.opponent();
        for (cx, cy) in captured {
            self.set(cx, cy, Some(opp));
        }
        self.set(x, y, None);
        suicide
    }

    /// Empty points where `player` may play without committing suicide.
    pub fn legal_moves(&self, player: Color) -> Vec<Point> {
        let mut scratch = self.clone();
        self.points()
            .filter(|&(x, y)| self.get(x, y).is_none() && !scratch.is_suicide(x, y, player))
            .collect()
    }

    /// Put the stone down and resolve captures, without legality checks.
    pub(crate) fn commit(&mut self, x: usize, y: usize, player: Color) -> Vec<Point> {
        self.set(x, y, Some(player));
        self.resolve_captures(player)
    }

    /// Play a stone for `player` at `(x, y)`.
    ///
    /// Returns the captured opponent stones. The board is only modified on success.
    ///
    /// # Errors
    /// - [`MoveError::OutOfBounds`] if the point is off the board
    /// - [`MoveError::Occupied`] if the point already holds a stone
    /// - [`MoveError::Suicide`] if the new group would have no liberties
    pub fn place(&mut self, x: usize, y: usize, player: Color) -> Result<Vec<Point>, MoveError> {
        if !self.in_bounds(x, y) {
            return Err(MoveError::OutOfBounds);
        }
        if self.get(x, y).is_some() {
            return Err(MoveError::Occupied);
        }
        if self.is_suicide(x, y, player) {
            return Err(MoveError::Suicide);
        }
        Ok(self.commit(x, y, player))
    }

    /// Like [`Board::place`], but also rejects a move whose result equals `previous`.
    ///
    /// The move is played on a copy first; the board is replaced only if every check
    /// passes, so a ko rejection leaves it untouched.
    pub fn place_with_ko(
        &mut self,
        x: usize,
        y: usize,
        player: Color,
        previous: Option<&Board>,
    ) -> Result<Vec<Point>, MoveError> {
        let mut next = self.clone();
        let captured = next.place(x, y, player)?;
        if previous.is_some_and(|prev| is_ko(prev, &next)) {
            return Err(MoveError::Ko);
        }
        *self = next;
        Ok(captured)
    }

    /// Local territory test: an empty point counts for `player` when no orthogonal
    /// neighbor holds an opposing stone. Empty neighbors do not disqualify it, so a
    /// point in open space counts for both colors.
    pub fn territory_point(&self, player: Color, x: usize, y: usize) -> bool {
        if self.get(x, y).is_some() {
            return false;
        }
        let opp = player.opponent();
        self.neighbors(x, y).all(|(nx, ny)| self.get(nx, ny) != Some(opp))
    }

    fn territory(&self, player: Color) -> usize {
        self.points()
            .filter(|&(x, y)| self.territory_point(player, x, y))
            .count()
    }

    /// Score as `(black, white)`: stones on the board plus territory points, with
    /// `komi` added to White.
    pub fn score(&self, komi: f64) -> (f64, f64) {
        let black = self.count(Color::Black) + self.territory(Color::Black);
        let white = self.count(Color::White) + self.territory(Color::White);
        (black as f64, white as f64 + komi)
    }
}

/// Positional ko test: true iff both boards are identical.
pub fn is_ko(previous: &Board, current: &Board) -> bool {
    previous == current
}

/// Parse a GTP vertex (e.g. `"C4"` or `"pass"`) for a board of `size`.
///
/// Columns use letters A-T skipping I; row 1 is the bottom row.
pub fn parse_vertex(s: &str, size: usize) -> Option<Move> {
    if s.eq_ignore_ascii_case("pass") {
        return Some(Move::Pass);
    }
    let bytes = s.as_bytes();
    if bytes.len() < 2 || size > MAX_SIZE {
        return None;
    }

    let col_char = bytes[0].to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == b'I' {
        return None;
    }
    let mut x = (col_char - b'A') as usize;
    if col_char > b'I' {
        x -= 1;
    }

    let row: usize = s[1..].parse().ok()?;
    if row == 0 || row > size || x >= size {
        return None;
    }
    Some(Move::Play((x, size - row)))
}

/// Format a move as a GTP vertex for a board of `size`.
pub fn format_move(mv: Move, size: usize) -> String {
    match mv {
        Move::Pass => "pass".into(),
        Move::Play((x, y)) => {
            let mut c = b'A' + x as u8;
            if c >= b'I' {
                c += 1;
            }
            format!("{}{}", c as char, size - y)
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            write!(f, "{:>2} ", self.size - y)?;
            for x in 0..self.size {
                let ch = match self.get(x, y) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 0..self.size {
            let label = format_move(Move::Play((x, 0)), self.size);
            write!(f, "{} ", &label[..1])?;
        }
        writeln!(f)
    }
}
