#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod client;
pub mod coord;
pub mod display;
pub mod event;
pub mod force;
pub mod grid;
pub mod piece;
pub mod role;
pub mod rules;
pub mod test_util;

pub use client::{ClientState, EventError, NotableEvent, PieceDrag, PieceDragError};
pub use coord::Coord;
pub use display::{BoardOrientation, BoardRender, PieceRender, SquareRender, SquareShade};
pub use event::{ClientEvent, MoveProposal, MoveRequest, ServerEvent};
pub use force::Force;
pub use piece::{Piece, PieceKind};
pub use role::PlayerRole;
pub use rules::{GameLogic, GameLogicError, StandardChess};
