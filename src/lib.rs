use arrayvec::ArrayVec;

mod fmt;
mod parse;
pub mod solve;

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

pub const MIN_BOARD_SIZE: i32 = 1;
pub const MAX_BOARD_SIZE: i32 = 100;
/// A board needs at least this many robots before a search is meaningful.
pub const MIN_ROBOTS: usize = 4;
/// One robot per colour, including the silver one.
pub const MAX_ROBOTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildError {
    InvalidSize,
    OutOfBounds,
    AlreadyOutOfBounds,
    DuplicateWall,
    DuplicateToken,
    PositionOccupied,
    DuplicateColour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoError {
    NoSuchRobot,
    Unmovable,
}

/// A `(column, row)` cell coordinate. Row 0 is the northern edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vec2(pub i32, pub i32);

impl Vec2 {
    /// The adjacent cell in `dir`. No bounds checking is done.
    pub fn next(self, dir: Direction) -> Self {
        const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
        let (dx, dy) = DIRECTIONS[dir as usize];
        Vec2(self.0.wrapping_add(dx), self.1.wrapping_add(dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North = 0,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn reversed(self) -> Self {
        Self::ALL[(self as usize + 2) % 4]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    Circle = 0,
    Triangle,
    Diamond,
    Hexagon,
}

impl Shape {
    pub const ALL: [Self; 4] = [Self::Circle, Self::Triangle, Self::Diamond, Self::Hexagon];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Colour {
    Blue = 0,
    Yellow = 1,
    Green = 2,
    Red = 3,
    /// The wildcard robot. Never the colour of a token.
    Silver = 10,
}

impl Colour {
    /// Colours a token can have.
    pub const TOKEN: [Self; 4] = [Self::Blue, Self::Yellow, Self::Green, Self::Red];

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            10 => Some(Self::Silver),
            _ => Self::TOKEN.get(code as usize).copied(),
        }
    }

    pub fn is_token_colour(self) -> bool {
        self != Self::Silver
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token {
    pub shape: Shape,
    pub colour: Colour,
}

impl Token {
    pub fn all() -> impl Iterator<Item = Self> {
        Shape::ALL.into_iter().flat_map(|shape| {
            Colour::TOKEN
                .into_iter()
                .map(move |colour| Token { shape, colour })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Robot(pub Colour);

/// One completed slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub robot: Robot,
    pub dir: Direction,
    pub to: Vec2,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Cell {
    out_of_bounds: bool,
    // Bit `dir as u8` is set if a robot cannot leave this cell towards `dir`.
    walls: u8,
}

impl Cell {
    fn has_wall(&self, dir: Direction) -> bool {
        self.walls & (1 << dir as u8) != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    grid: Box<[Cell]>,
    sinks: IndexMap<Token, Vec2>,
}

impl Board {
    pub fn new(size: i32) -> Result<Self, BuildError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BuildError::InvalidSize);
        }
        let size = size as u8;
        Ok(Board {
            size,
            grid: vec![Cell::default(); size as usize * size as usize].into(),
            sinks: IndexMap::default(),
        })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    fn grid_index(&self, pos: Vec2) -> Option<usize> {
        let size = self.size as i32;
        if !(0..size).contains(&pos.0) || !(0..size).contains(&pos.1) {
            return None;
        }
        Some(pos.1 as usize * self.size as usize + pos.0 as usize)
    }

    fn cell(&self, pos: Vec2) -> Option<&Cell> {
        let idx = self.grid_index(pos)?;
        Some(&self.grid[idx])
    }

    fn cell_mut(&mut self, pos: Vec2) -> Option<&mut Cell> {
        let idx = self.grid_index(pos)?;
        Some(&mut self.grid[idx])
    }

    pub fn in_bounds(&self, pos: Vec2) -> bool {
        self.cell(pos).map_or(false, |cell| !cell.out_of_bounds)
    }

    pub fn mark_out_of_bounds(&mut self, pos: Vec2) -> Result<(), BuildError> {
        match self.cell_mut(pos) {
            Some(cell) if !cell.out_of_bounds => {
                cell.out_of_bounds = true;
                Ok(())
            }
            _ => Err(BuildError::AlreadyOutOfBounds),
        }
    }

    /// Blocks leaving `pos` towards `dir`. The neighbouring cell is left untouched;
    /// movement checks look at both sides of the boundary.
    pub fn add_wall(&mut self, pos: Vec2, dir: Direction) -> Result<(), BuildError> {
        let cell = match self.cell_mut(pos) {
            Some(cell) if !cell.out_of_bounds => cell,
            _ => return Err(BuildError::OutOfBounds),
        };
        if cell.has_wall(dir) {
            return Err(BuildError::DuplicateWall);
        }
        cell.walls |= 1 << dir as u8;
        Ok(())
    }

    pub fn has_wall(&self, pos: Vec2, dir: Direction) -> bool {
        self.cell(pos).map_or(false, |cell| cell.has_wall(dir))
    }

    pub fn add_sink(&mut self, token: Token, pos: Vec2) -> Result<(), BuildError> {
        if self.sinks.contains_key(&token) {
            return Err(BuildError::DuplicateToken);
        }
        if !self.in_bounds(pos) {
            return Err(BuildError::OutOfBounds);
        }
        if self.has_sink(pos) {
            return Err(BuildError::PositionOccupied);
        }
        self.sinks.insert(token, pos);
        Ok(())
    }

    pub fn sink(&self, token: Token) -> Option<Vec2> {
        self.sinks.get(&token).copied()
    }

    pub fn sinks(&self) -> impl Iterator<Item = (Token, Vec2)> + '_ {
        self.sinks.iter().map(|(&token, &pos)| (token, pos))
    }

    pub fn has_sink(&self, pos: Vec2) -> bool {
        self.sinks.values().any(|&p| p == pos)
    }

    /// Whether every token has its sink.
    pub fn is_complete(&self) -> bool {
        Token::all().all(|token| self.sinks.contains_key(&token))
    }
}

/// The set of occupied cells, regardless of which robot sits where.
///
/// Used as the visited-state key of the search. Two configurations that only
/// differ by a permutation of robot colours compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occupancy(ArrayVec<Vec2, MAX_ROBOTS>);

/// A placement of robots on a board, plus the moves that led to it.
#[derive(Debug, Clone)]
pub struct State<'a> {
    board: &'a Board,
    robots: ArrayVec<(Vec2, Robot), MAX_ROBOTS>,
    path: Vec<Move>,
}

impl<'a> State<'a> {
    pub fn new(board: &'a Board) -> Self {
        State {
            board,
            robots: ArrayVec::new(),
            path: Vec::new(),
        }
    }

    pub fn board(&self) -> &'a Board {
        self.board
    }

    pub fn robots(&self) -> impl Iterator<Item = (Vec2, Robot)> + '_ {
        self.robots.iter().copied()
    }

    pub fn path(&self) -> &[Move] {
        &self.path
    }

    pub fn add_robot(&mut self, pos: Vec2, robot: Robot) -> Result<(), BuildError> {
        if !self.board.in_bounds(pos) {
            return Err(BuildError::OutOfBounds);
        }
        for &(p, r) in &self.robots {
            if p == pos {
                return Err(BuildError::PositionOccupied);
            }
            if r == robot {
                return Err(BuildError::DuplicateColour);
            }
        }
        // Colours are unique, so there is always room.
        self.robots.push((pos, robot));
        Ok(())
    }

    pub fn robot_at(&self, pos: Vec2) -> Option<Robot> {
        self.robots
            .iter()
            .find_map(|&(p, robot)| (p == pos).then_some(robot))
    }

    pub fn position_of(&self, colour: Colour) -> Option<Vec2> {
        self.robots
            .iter()
            .find_map(|&(pos, robot)| (robot == Robot(colour)).then_some(pos))
    }

    /// Whether a robot standing on `pos` could take one step towards `dir`.
    /// There need not be a robot on `pos`.
    pub fn can_move(&self, pos: Vec2, dir: Direction) -> bool {
        let next = pos.next(dir);
        self.board.in_bounds(next)
            && !self.board.has_wall(pos, dir)
            && !self.board.has_wall(next, dir.reversed())
            && self.robot_at(next).is_none()
    }

    /// Where a robot starting on `pos` comes to rest when sliding towards `dir`.
    pub fn slide_destination(&self, mut pos: Vec2, dir: Direction) -> Vec2 {
        while self.can_move(pos, dir) {
            pos = pos.next(dir);
        }
        pos
    }

    fn relocate(&mut self, from: Vec2, to: Vec2) {
        if let Some((pos, _)) = self.robots.iter_mut().find(|(pos, _)| *pos == from) {
            *pos = to;
        }
    }

    /// Slides the robot of `colour` towards `dir` and records the move.
    pub fn go(&mut self, colour: Colour, dir: Direction) -> Result<Vec2, GoError> {
        let from = self.position_of(colour).ok_or(GoError::NoSuchRobot)?;
        if !self.can_move(from, dir) {
            return Err(GoError::Unmovable);
        }
        let to = self.slide_destination(from, dir);
        self.relocate(from, to);
        self.path.push(Move {
            robot: Robot(colour),
            dir,
            to,
        });
        Ok(to)
    }

    /// Every configuration reachable with one slide.
    pub fn successors(&self) -> impl Iterator<Item = State<'a>> + '_ {
        self.robots.iter().flat_map(move |&(pos, robot)| {
            Direction::ALL
                .into_iter()
                .filter(move |&dir| self.can_move(pos, dir))
                .map(move |dir| {
                    let to = self.slide_destination(pos, dir);
                    let mut next = self.clone();
                    next.relocate(pos, to);
                    next.path.push(Move { robot, dir, to });
                    next
                })
        })
    }

    pub fn occupancy(&self) -> Occupancy {
        let mut cells = self
            .robots
            .iter()
            .map(|&(pos, _)| pos)
            .collect::<ArrayVec<_, MAX_ROBOTS>>();
        cells.sort_unstable();
        Occupancy(cells)
    }

    /// Whether the robot of the token's colour rests on the token's sink.
    pub fn is_success(&self, token: Token) -> bool {
        self.board
            .sink(token)
            .map_or(false, |sink| self.robot_at(sink) == Some(Robot(token.colour)))
    }

    pub fn is_valid(&self) -> bool {
        self.board.is_complete() && self.robots.len() >= MIN_ROBOTS
    }

    pub fn solve(&self, token: Token) -> Option<Vec<Move>> {
        solve::bfs(self, token, |_| {})
    }
}

/// A parsed board together with its initial robot placement.
#[derive(Debug, Clone)]
pub struct Game {
    pub board: Board,
    robots: ArrayVec<(Vec2, Robot), MAX_ROBOTS>,
}

impl Game {
    pub fn state(&self) -> State<'_> {
        State {
            board: &self.board,
            robots: self.robots.clone(),
            path: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.state().is_valid()
    }
}
