use std::fmt::{self, Write};

use crate::{BuildError, Colour, Direction, GoError, Move, Robot, Shape, State, Token, Vec2};

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => f.write_str("N"),
            Direction::East => f.write_str("E"),
            Direction::South => f.write_str("S"),
            Direction::West => f.write_str("W"),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Triangle => "triangle",
            Shape::Diamond => "diamond",
            Shape::Hexagon => "hexagon",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Colour {
    pub fn name(self) -> &'static str {
        match self {
            Colour::Blue => "blue",
            Colour::Yellow => "yellow",
            Colour::Green => "green",
            Colour::Red => "red",
            Colour::Silver => "silver",
        }
    }

    /// The character a robot of this colour is drawn with.
    pub fn initial(self) -> char {
        match self {
            Colour::Blue => 'B',
            Colour::Yellow => 'Y',
            Colour::Green => 'G',
            Colour::Red => 'R',
            Colour::Silver => 'S',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.shape, self.colour)
    }
}

impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.robot, self.dir, self.to)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildError::InvalidSize => "Board size out of range",
            BuildError::OutOfBounds => "Position is out of bounds",
            BuildError::AlreadyOutOfBounds => "Position is already out of bounds",
            BuildError::DuplicateWall => "Duplicate wall",
            BuildError::DuplicateToken => "Token already has a sink",
            BuildError::PositionOccupied => "Position is already occupied",
            BuildError::DuplicateColour => "A robot of this colour is already placed",
        })
    }
}

impl std::error::Error for BuildError {}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GoError::NoSuchRobot => "No robot of this colour",
            GoError::Unmovable => "Robot is blocked",
        })
    }
}

impl std::error::Error for GoError {}

/// Draws the board one row per line: `#` out of bounds, robots by their
/// colour initial, `+` an unoccupied sink, `.` anything else. Walls are not drawn.
impl fmt::Display for State<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.board.size() as i32;
        for y in 0..size {
            for x in 0..size {
                let pos = Vec2(x, y);
                let ch = match self.robot_at(pos) {
                    Some(Robot(colour)) => colour.initial(),
                    None if !self.board.in_bounds(pos) => '#',
                    None if self.board.has_sink(pos) => '+',
                    None => '.',
                };
                f.write_char(ch)?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
