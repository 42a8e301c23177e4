use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumIter;


// Serialized as the one-letter color codes used on the wire and in FEN.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum Force {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Force {
    pub fn name(self) -> &'static str {
        match self {
            Force::White => "White",
            Force::Black => "Black",
        }
    }
}

impl fmt::Display for Force {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}
