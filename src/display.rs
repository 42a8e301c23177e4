// Pure "game state -> render instructions" step. Knows nothing about the DOM: the web client
// applies `BoardRender` to the page, tests inspect it directly.

use crate::coord::{Coord, NUM_COLS};
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{Piece, piece_to_pictogram};
use crate::role::PlayerRole;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardOrientation {
    Normal,  // White at bottom
    Rotated, // Black at bottom
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SquareShade {
    Light,
    Dark,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PieceRender {
    pub piece: Piece,
    pub glyph: char,
    // Only pieces of the player's own color accept drag input.
    pub draggable: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SquareRender {
    pub coord: Coord,
    pub shade: SquareShade,
    pub piece: Option<PieceRender>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardRender {
    pub orientation: BoardOrientation,
    // All 64 squares in row-major order, starting from "a8". Orientation is not applied here:
    // rotation is purely presentational.
    pub squares: Vec<SquareRender>,
}

impl BoardRender {
    pub fn square(&self, coord: Coord) -> &SquareRender {
        &self.squares[coord.row.to_zero_based() as usize * NUM_COLS as usize + coord.col.to_zero_based() as usize]
    }

    pub fn draggable_pieces(&self) -> impl Iterator<Item = (Coord, PieceRender)> + '_ {
        self.squares
            .iter()
            .filter_map(|sq| sq.piece.filter(|p| p.draggable).map(|p| (sq.coord, p)))
    }
}

pub fn get_board_orientation(role: PlayerRole) -> BoardOrientation {
    match role {
        PlayerRole::Player(Force::Black) => BoardOrientation::Rotated,
        PlayerRole::Player(Force::White) | PlayerRole::Spectator => BoardOrientation::Normal,
    }
}

pub fn square_shade(coord: Coord) -> SquareShade {
    if coord.is_light() { SquareShade::Light } else { SquareShade::Dark }
}

pub fn render_board(grid: &Grid, role: PlayerRole) -> BoardRender {
    let squares = Coord::all()
        .map(|coord| SquareRender {
            coord,
            shade: square_shade(coord),
            piece: grid[coord].map(|piece| PieceRender {
                piece,
                glyph: piece_to_pictogram(piece.kind, piece.force),
                draggable: role.controls(piece.force),
            }),
        })
        .collect();
    BoardRender {
        orientation: get_board_orientation(role),
        squares,
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rules::{GameLogic, StandardChess};

    fn starting_grid() -> Grid { StandardChess::new().grid() }

    #[test]
    fn shading_alternates() {
        let render = render_board(&starting_grid(), PlayerRole::Spectator);
        assert_eq!(render.squares.len(), 64);
        for sq in &render.squares {
            let sum = sq.coord.row.to_zero_based() + sq.coord.col.to_zero_based();
            let expected = if sum % 2 == 0 { SquareShade::Light } else { SquareShade::Dark };
            assert_eq!(sq.shade, expected, "{:?}", sq.coord);
        }
        assert_eq!(render.square(Coord::from_algebraic("a8").unwrap()).shade, SquareShade::Light);
        assert_eq!(render.square(Coord::from_algebraic("a1").unwrap()).shade, SquareShade::Dark);
        assert_eq!(render.square(Coord::from_algebraic("h1").unwrap()).shade, SquareShade::Light);
    }

    #[test]
    fn shading_does_not_depend_on_role() {
        let grid = starting_grid();
        let shades = |role| {
            render_board(&grid, role).squares.iter().map(|sq| sq.shade).collect::<Vec<_>>()
        };
        assert_eq!(shades(PlayerRole::Spectator), shades(PlayerRole::Player(Force::Black)));
        assert_eq!(shades(PlayerRole::Spectator), shades(PlayerRole::Player(Force::White)));
    }

    #[test]
    fn squares_are_row_major() {
        let render = render_board(&starting_grid(), PlayerRole::Spectator);
        let names: Vec<_> = render.squares.iter().take(9).map(|sq| sq.coord.to_algebraic()).collect();
        assert_eq!(names, ["a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8", "a7"]);
    }

    #[test]
    fn draggable_iff_own_piece() {
        let grid = starting_grid();
        for force in [Force::White, Force::Black] {
            let render = render_board(&grid, PlayerRole::Player(force));
            assert_eq!(render.draggable_pieces().count(), 16);
            for sq in &render.squares {
                if let Some(piece) = sq.piece {
                    assert_eq!(piece.draggable, piece.piece.force == force);
                }
            }
        }
        let render = render_board(&grid, PlayerRole::Spectator);
        assert_eq!(render.draggable_pieces().count(), 0);
    }

    #[test]
    fn glyphs() {
        let render = render_board(&starting_grid(), PlayerRole::Spectator);
        let glyph = |name| render.square(Coord::from_algebraic(name).unwrap()).piece.map(|p| p.glyph);
        assert_eq!(glyph("e1"), Some('♔'));
        assert_eq!(glyph("d8"), Some('♛'));
        assert_eq!(glyph("a2"), Some('♙'));
        assert_eq!(glyph("g8"), Some('♞'));
        assert_eq!(glyph("e4"), None);
    }

    #[test]
    fn orientation() {
        assert_eq!(get_board_orientation(PlayerRole::Player(Force::Black)), BoardOrientation::Rotated);
        assert_eq!(get_board_orientation(PlayerRole::Player(Force::White)), BoardOrientation::Normal);
        assert_eq!(get_board_orientation(PlayerRole::Spectator), BoardOrientation::Normal);
    }

    #[test]
    fn rotation_keeps_coordinates() {
        let grid = starting_grid();
        let normal = render_board(&grid, PlayerRole::Player(Force::White));
        let rotated = render_board(&grid, PlayerRole::Player(Force::Black));
        let coords = |r: &BoardRender| r.squares.iter().map(|sq| sq.coord).collect::<Vec<_>>();
        assert_eq!(coords(&normal), coords(&rotated));
    }
}
