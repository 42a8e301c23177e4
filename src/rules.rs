// Chess rules are not implemented here. `GameLogic` is the seam through which the client reads and
// updates the authoritative position; `StandardChess` plugs in the `chess` crate.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::coord::{Coord, NUM_ROWS};
use crate::event::MoveRequest;
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{Piece, PieceKind};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameLogicError {
    // Snapshot is not a valid board description (e.g. a malformed FEN).
    InvalidSnapshot { snapshot: String },
    // Move does not apply to the current position: wrong turn, no piece, blocked path, etc.
    IllegalMove { from: Coord, to: Coord },
}

impl fmt::Display for GameLogicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameLogicError::InvalidSnapshot { snapshot } => write!(f, "invalid snapshot: \"{snapshot}\""),
            GameLogicError::IllegalMove { from, to } => write!(f, "illegal move: {from}-{to}"),
        }
    }
}

pub trait GameLogic {
    // Replaces the whole position.
    fn load(&mut self, snapshot: &str) -> Result<(), GameLogicError>;
    // Applies a move to the current position. Leaves the position unchanged on error.
    fn apply_move(&mut self, mv: &MoveRequest) -> Result<(), GameLogicError>;
    // Returns to the initial position.
    fn reset(&mut self);
    fn grid(&self) -> Grid;
    fn snapshot(&self) -> String;
}


#[derive(Clone, Debug, Default)]
pub struct StandardChess {
    board: chess::Board,
}

impl StandardChess {
    pub fn new() -> Self { Self::default() }
}

impl GameLogic for StandardChess {
    fn load(&mut self, snapshot: &str) -> Result<(), GameLogicError> {
        self.board = chess::Board::from_str(snapshot).map_err(|_| GameLogicError::InvalidSnapshot {
            snapshot: snapshot.to_owned(),
        })?;
        Ok(())
    }

    fn apply_move(&mut self, mv: &MoveRequest) -> Result<(), GameLogicError> {
        let illegal = || GameLogicError::IllegalMove { from: mv.from, to: mv.to };
        let source = to_chess_square(mv.from);
        let dest = to_chess_square(mv.to);
        let piece = self.board.piece_on(source).ok_or_else(illegal)?;
        // The promotion field is a hint: it only matters for a pawn reaching the last rank.
        let promotion = if piece == chess::Piece::Pawn && is_last_rank(mv.to) {
            Some(to_chess_piece(mv.promotion.unwrap_or(PieceKind::Queen)))
        } else {
            None
        };
        let chess_move = chess::ChessMove::new(source, dest, promotion);
        if !self.board.legal(chess_move) {
            return Err(illegal());
        }
        self.board = self.board.make_move_new(chess_move);
        debug!("Applied {}-{}, position: {}", mv.from, mv.to, self.board);
        Ok(())
    }

    fn reset(&mut self) { self.board = chess::Board::default(); }

    fn grid(&self) -> Grid {
        let mut grid = Grid::new();
        for coord in Coord::all() {
            let square = to_chess_square(coord);
            if let (Some(kind), Some(color)) = (self.board.piece_on(square), self.board.color_on(square)) {
                grid[coord] = Some(Piece::new(from_chess_piece(kind), from_chess_color(color)));
            }
        }
        grid
    }

    fn snapshot(&self) -> String { self.board.to_string() }
}

fn is_last_rank(coord: Coord) -> bool {
    let row = coord.row.to_zero_based();
    row == 0 || row == NUM_ROWS - 1
}

fn to_chess_square(coord: Coord) -> chess::Square {
    let rank = (NUM_ROWS - 1 - coord.row.to_zero_based()) as usize;
    chess::Square::make_square(
        chess::Rank::from_index(rank),
        chess::File::from_index(coord.col.to_zero_based() as usize),
    )
}

fn to_chess_piece(kind: PieceKind) -> chess::Piece {
    match kind {
        PieceKind::Pawn => chess::Piece::Pawn,
        PieceKind::Knight => chess::Piece::Knight,
        PieceKind::Bishop => chess::Piece::Bishop,
        PieceKind::Rook => chess::Piece::Rook,
        PieceKind::Queen => chess::Piece::Queen,
        PieceKind::King => chess::Piece::King,
    }
}

fn from_chess_piece(piece: chess::Piece) -> PieceKind {
    match piece {
        chess::Piece::Pawn => PieceKind::Pawn,
        chess::Piece::Knight => PieceKind::Knight,
        chess::Piece::Bishop => PieceKind::Bishop,
        chess::Piece::Rook => PieceKind::Rook,
        chess::Piece::Queen => PieceKind::Queen,
        chess::Piece::King => PieceKind::King,
    }
}

fn from_chess_color(color: chess::Color) -> Force {
    match color {
        chess::Color::White => Force::White,
        chess::Color::Black => Force::Black,
    }
}
