use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinate on the board; (0, 0) is the top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Board occupancy; the discriminant is what the `Board` opcode reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum Cell {
    #[default]
    Empty = 0,
    Snake = 1,
    Pellet = 2,
}

impl Cell {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Everything that can end (or, for `DivByZero`, interrupt) a genome's life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fault {
    DivByZero,
    OutOfBounds,
    OutOfBoard,
    BoardFilled,
    SelfCollision,
    Stalled,
    Starved,
}

impl Fault {
    /// Divide-by-zero is reported but leaves the VM running
    pub fn halts(self) -> bool {
        !matches!(self, Fault::DivByZero)
    }

    pub fn description(self) -> &'static str {
        match self {
            Fault::DivByZero => "Divided by Zero",
            Fault::OutOfBounds => "Out of Bounds Memory Access",
            Fault::OutOfBoard => "Moved Out of Board",
            Fault::BoardFilled => "Board Filled by Snake",
            Fault::SelfCollision => "Snake Ate Self",
            Fault::Stalled => "Gene Too Slow",
            Fault::Starved => "Snake Starved to Death",
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
