use crate::error::EditError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub const ZERO: BlockPosition = BlockPosition { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }

    /// True for the six unit vectors along the axes.
    pub fn is_axis_unit(&self) -> bool {
        self.x.abs() + self.y.abs() + self.z.abs() == 1
    }

    pub fn checked_sub(self, rhs: BlockPosition) -> Option<BlockPosition> {
        Some(BlockPosition::new(
            self.x.checked_sub(rhs.x)?,
            self.y.checked_sub(rhs.y)?,
            self.z.checked_sub(rhs.z)?,
        ))
    }

    pub fn checked_mul(self, rhs: i32) -> Option<BlockPosition> {
        Some(BlockPosition::new(
            self.x.checked_mul(rhs)?,
            self.y.checked_mul(rhs)?,
            self.z.checked_mul(rhs)?,
        ))
    }
}

impl fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for BlockPosition {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl From<BlockPosition> for (i32, i32, i32) {
    fn from(pos: BlockPosition) -> Self {
        (pos.x, pos.y, pos.z)
    }
}

impl Add for BlockPosition {
    type Output = BlockPosition;

    fn add(self, rhs: BlockPosition) -> BlockPosition {
        BlockPosition::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for BlockPosition {
    type Output = BlockPosition;

    fn sub(self, rhs: BlockPosition) -> BlockPosition {
        BlockPosition::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for BlockPosition {
    type Output = BlockPosition;

    fn mul(self, rhs: i32) -> BlockPosition {
        BlockPosition::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for BlockPosition {
    type Output = BlockPosition;

    fn neg(self) -> BlockPosition {
        BlockPosition::new(-self.x, -self.y, -self.z)
    }
}

/// Absolute axis directions. North is -Z and east is +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn unit_vector(self) -> BlockPosition {
        match self {
            Direction::Up => BlockPosition::new(0, 1, 0),
            Direction::Down => BlockPosition::new(0, -1, 0),
            Direction::North => BlockPosition::new(0, 0, -1),
            Direction::South => BlockPosition::new(0, 0, 1),
            Direction::East => BlockPosition::new(1, 0, 0),
            Direction::West => BlockPosition::new(-1, 0, 0),
        }
    }

    /// Accepts the absolute names and their first letters. Player-relative
    /// names such as `me` have to be resolved by the caller.
    pub fn parse(name: &str) -> Result<Direction, EditError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            other => Err(EditError::InvalidDirection(other.to_string())),
        }
    }
}

impl From<Direction> for BlockPosition {
    fn from(direction: Direction) -> Self {
        direction.unit_vector()
    }
}
