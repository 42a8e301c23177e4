// Wire protocol. Each frame is a JSON object `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::force::Force;
use crate::piece::PieceKind;


// A move already validated by the server.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Coord,
    pub to: Coord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

// A move requested by the user. Never checked locally: the server is the judge.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveProposal {
    pub from: Coord,
    pub to: Coord,
    pub promotion: PieceKind,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    PlayerRole(Force),
    SpectatorRole,
    // Full position in FEN.
    BoardState(String),
    Move(MoveRequest),
    GameOver { winner: String },
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    Move(MoveProposal),
}
