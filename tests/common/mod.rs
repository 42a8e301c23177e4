// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::cell::RefCell;
use std::rc::Rc;

use chessgame::grid::Grid;
use chessgame::{GameLogic, GameLogicError, MoveRequest, ServerEvent};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameCall {
    Load(String),
    ApplyMove(MoveRequest),
    Reset,
}

// Game logic double: records every mutating call and serves an empty grid.
#[derive(Clone, Default)]
pub struct RecordingGame {
    pub calls: Rc<RefCell<Vec<GameCall>>>,
    pub reject_moves: bool,
}

impl GameLogic for RecordingGame {
    fn load(&mut self, snapshot: &str) -> Result<(), GameLogicError> {
        self.calls.borrow_mut().push(GameCall::Load(snapshot.to_owned()));
        Ok(())
    }

    fn apply_move(&mut self, mv: &MoveRequest) -> Result<(), GameLogicError> {
        self.calls.borrow_mut().push(GameCall::ApplyMove(mv.clone()));
        if self.reject_moves {
            return Err(GameLogicError::IllegalMove { from: mv.from, to: mv.to });
        }
        Ok(())
    }

    fn reset(&mut self) { self.calls.borrow_mut().push(GameCall::Reset); }

    fn grid(&self) -> Grid { Grid::new() }

    fn snapshot(&self) -> String { String::new() }
}

#[allow(dead_code)]
pub fn server_event(json: &str) -> ServerEvent { serde_json::from_str(json).unwrap() }
