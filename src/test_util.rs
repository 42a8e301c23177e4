// Test utilities shared by unit tests and the "tests" folder.

use std::sync::mpsc;

use crate::client::ClientState;
use crate::coord::Coord;
use crate::event::{ClientEvent, MoveRequest};
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rules::StandardChess;


pub fn coord(name: &str) -> Coord {
    Coord::from_algebraic(name).unwrap_or_else(|| panic!("invalid square: {name}"))
}

pub fn algebraic_move(from: &str, to: &str) -> MoveRequest {
    MoveRequest { from: coord(from), to: coord(to), promotion: None }
}

pub fn piece_at(grid: &Grid, name: &str) -> Option<Piece> { grid[coord(name)] }

// Client with a standard game in the starting position and a handle to its outgoing events.
pub fn sample_client() -> (ClientState, mpsc::Receiver<ClientEvent>) {
    let (events_tx, events_rx) = mpsc::channel();
    (ClientState::new(Box::new(StandardChess::new()), events_tx), events_rx)
}

pub fn drain_events(events_rx: &mpsc::Receiver<ClientEvent>) -> Vec<ClientEvent> {
    events_rx.try_iter().collect()
}
