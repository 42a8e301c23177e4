use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


// Row as seen on screen for the default orientation: row 0 is the top-most row, i.e. rank '8'.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8,  // 0-based, from the top
}

impl Row {
    pub fn from_zero_based(idx: u8) -> Option<Self> {
        (idx < NUM_ROWS).then_some(Self { idx })
    }
    pub fn from_algebraic(rank: char) -> Option<Self> {
        let rank = rank.to_digit(10)?;
        if !(1..=NUM_ROWS as u32).contains(&rank) {
            return None;
        }
        Some(Self { idx: NUM_ROWS - rank as u8 })
    }
    pub fn to_zero_based(self) -> u8 { self.idx }
    pub fn to_algebraic(self) -> char { (b'0' + NUM_ROWS - self.idx) as char }
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(|idx| Self { idx })
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8,  // 0-based, 'a' is 0
}

impl Col {
    pub fn from_zero_based(idx: u8) -> Option<Self> {
        (idx < NUM_COLS).then_some(Self { idx })
    }
    pub fn from_algebraic(file: char) -> Option<Self> {
        if !('a'..='h').contains(&file) {
            return None;
        }
        Some(Self { idx: file as u8 - b'a' })
    }
    pub fn to_zero_based(self) -> u8 { self.idx }
    pub fn to_algebraic(self) -> char { (b'a' + self.idx) as char }
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_COLS).map(|idx| Self { idx })
    }
}


// Serialized as algebraic square name, e.g. "e4".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub fn from_zero_based(row: u8, col: u8) -> Option<Self> {
        Some(Self {
            row: Row::from_zero_based(row)?,
            col: Col::from_zero_based(col)?,
        })
    }

    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (file, rank) = s.chars().collect_tuple()?;
        Some(Self {
            row: Row::from_algebraic(rank)?,
            col: Col::from_algebraic(file)?,
        })
    }

    pub fn to_algebraic(self) -> String { self.to_string() }

    // Row-major, starting from the top left corner ("a8").
    pub fn all() -> impl Iterator<Item = Coord> {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Coord { row, col })
    }

    pub fn is_light(self) -> bool { (self.row.to_zero_based() + self.col.to_zero_based()) % 2 == 0 }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}{})", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl From<Coord> for String {
    fn from(coord: Coord) -> String { coord.to_algebraic() }
}

impl TryFrom<String> for Coord {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Coord::from_algebraic(&s).ok_or_else(|| format!("invalid square: {s}"))
    }
}
