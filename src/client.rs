use std::fmt;
use std::sync::mpsc;

use log::{debug, info, warn};

use crate::coord::Coord;
use crate::display::{BoardRender, render_board};
use crate::event::{ClientEvent, MoveProposal, ServerEvent};
use crate::piece::{Piece, PieceKind};
use crate::role::PlayerRole;
use crate::rules::{GameLogic, GameLogicError};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PieceDragError {
    NoPiece,
    NotYourPiece,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventError {
    CannotApplyEvent(GameLogicError),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::CannotApplyEvent(err) => write!(f, "cannot apply server event: {err}"),
        }
    }
}

// Things the user must be told about. The web client shows them as blocking alerts.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NotableEvent {
    None,
    RoleAssigned(PlayerRole),
    GameOver { winner: String },
}

impl NotableEvent {
    pub fn notice(&self) -> Option<String> {
        match self {
            NotableEvent::None => None,
            NotableEvent::RoleAssigned(PlayerRole::Player(force)) => {
                Some(format!("You are playing as {force}."))
            }
            NotableEvent::RoleAssigned(PlayerRole::Spectator) => {
                Some("You are viewing the game as a spectator.".to_owned())
            }
            NotableEvent::GameOver { winner } => Some(format!("Checkmate! {winner} wins!")),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PieceDrag {
    pub piece: Piece,
    pub source: Coord,
}

// Local mirror of the game. The server is the source of truth: user input is only forwarded as
// move proposals, and the position changes only when the server confirms.
pub struct ClientState {
    game: Box<dyn GameLogic>,
    role: PlayerRole,
    piece_drag: Option<PieceDrag>,
    events_tx: mpsc::Sender<ClientEvent>,
}

impl ClientState {
    pub fn new(game: Box<dyn GameLogic>, events_tx: mpsc::Sender<ClientEvent>) -> Self {
        ClientState {
            game,
            role: PlayerRole::Spectator,
            piece_drag: None,
            events_tx,
        }
    }

    pub fn role(&self) -> PlayerRole { self.role }
    pub fn piece_drag(&self) -> Option<PieceDrag> { self.piece_drag }
    pub fn game(&self) -> &dyn GameLogic { self.game.as_ref() }

    pub fn render(&self) -> BoardRender { render_board(&self.game.grid(), self.role) }

    pub fn start_drag_piece(&mut self, source: Coord) -> Result<(), PieceDragError> {
        let piece = self.game.grid()[source].ok_or(PieceDragError::NoPiece)?;
        if !self.role.controls(piece.force) {
            return Err(PieceDragError::NotYourPiece);
        }
        // A previous drag may never have received its "dragend" if the board was re-rendered
        // underneath it. Starting a new one replaces it.
        if let Some(stale) = self.piece_drag.replace(PieceDrag { piece, source }) {
            debug!("Replacing stale drag from {}", stale.source);
        }
        debug!("Drag started at {source}");
        Ok(())
    }

    pub fn abort_drag_piece(&mut self) { self.piece_drag = None; }

    // Returns the proposal sent to the server, if any.
    pub fn drag_piece_drop(&mut self, dest: Coord) -> Option<MoveProposal> {
        let drag = self.piece_drag.take()?;
        let proposal = MoveProposal {
            from: drag.source,
            to: dest,
            promotion: PieceKind::Queen,
        };
        debug!("Proposing {}-{}", proposal.from, proposal.to);
        if self.events_tx.send(ClientEvent::Move(proposal.clone())).is_err() {
            warn!("Cannot send move {}-{}: event channel disconnected", proposal.from, proposal.to);
        }
        Some(proposal)
    }

    pub fn process_server_event(&mut self, event: ServerEvent) -> Result<NotableEvent, EventError> {
        match event {
            ServerEvent::PlayerRole(force) => Ok(self.set_role(PlayerRole::Player(force))),
            ServerEvent::SpectatorRole => Ok(self.set_role(PlayerRole::Spectator)),
            ServerEvent::BoardState(snapshot) => {
                self.game.load(&snapshot).map_err(reject)?;
                Ok(NotableEvent::None)
            }
            ServerEvent::Move(mv) => {
                // Not checked against any local expectation: whatever the server says goes, as
                // long as the rules engine accepts it for the current position.
                self.game.apply_move(&mv).map_err(reject)?;
                Ok(NotableEvent::None)
            }
            ServerEvent::GameOver { winner } => {
                info!("Game over, winner: {winner}");
                self.game.reset();
                Ok(NotableEvent::GameOver { winner })
            }
        }
    }

    fn set_role(&mut self, role: PlayerRole) -> NotableEvent {
        info!("Assigned role: {role:?}");
        self.role = role;
        NotableEvent::RoleAssigned(role)
    }
}

fn reject(err: GameLogicError) -> EventError {
    warn!("Rejected server event: {err}");
    EventError::CannotApplyEvent(err)
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::force::Force;
    use crate::test_util::{algebraic_move, coord, drain_events, piece_at, sample_client};

    fn as_white(client: &mut ClientState) {
        client.process_server_event(ServerEvent::PlayerRole(Force::White)).unwrap();
    }

    #[test]
    fn spectator_by_default() {
        let (client, _rx) = sample_client();
        assert_eq!(client.role(), PlayerRole::Spectator);
        assert_eq!(client.render().draggable_pieces().count(), 0);
    }

    #[test]
    fn drop_without_drag_sends_nothing() {
        let (mut client, rx) = sample_client();
        as_white(&mut client);
        assert_eq!(client.drag_piece_drop(coord("e4")), None);
        assert!(drain_events(&rx).is_empty());
    }

    #[test]
    fn drop_sends_queen_promotion_proposal() {
        let (mut client, rx) = sample_client();
        as_white(&mut client);
        client.start_drag_piece(coord("e2")).unwrap();
        let expected = MoveProposal {
            from: Coord::from_zero_based(6, 4).unwrap(),
            to: Coord::from_zero_based(4, 4).unwrap(),
            promotion: PieceKind::Queen,
        };
        assert_eq!(client.drag_piece_drop(Coord::from_zero_based(4, 4).unwrap()), Some(expected.clone()));
        assert_eq!(drain_events(&rx), vec![ClientEvent::Move(expected)]);
        assert_eq!(client.piece_drag(), None);
    }

    #[test]
    fn drop_does_not_change_local_position() {
        let (mut client, _rx) = sample_client();
        as_white(&mut client);
        let before = client.game().snapshot();
        client.start_drag_piece(coord("e2")).unwrap();
        client.drag_piece_drop(coord("e4"));
        assert_eq!(client.game().snapshot(), before);
    }

    #[test]
    fn drop_is_forwarded_even_if_illegal() {
        let (mut client, rx) = sample_client();
        as_white(&mut client);
        client.start_drag_piece(coord("a1")).unwrap();
        client.drag_piece_drop(coord("a8"));
        assert_eq!(drain_events(&rx).len(), 1);
    }

    #[test]
    fn cannot_drag_foreign_or_empty() {
        let (mut client, _rx) = sample_client();
        assert_eq!(client.start_drag_piece(coord("e2")), Err(PieceDragError::NotYourPiece));
        as_white(&mut client);
        assert_eq!(client.start_drag_piece(coord("e7")), Err(PieceDragError::NotYourPiece));
        assert_eq!(client.start_drag_piece(coord("e4")), Err(PieceDragError::NoPiece));
        assert_eq!(client.piece_drag(), None);
    }

    #[test]
    fn drag_end_clears_drag() {
        let (mut client, rx) = sample_client();
        as_white(&mut client);
        client.start_drag_piece(coord("g1")).unwrap();
        assert_eq!(client.piece_drag().map(|d| d.source), Some(coord("g1")));
        client.abort_drag_piece();
        assert_eq!(client.piece_drag(), None);
        assert_eq!(client.drag_piece_drop(coord("f3")), None);
        assert!(drain_events(&rx).is_empty());
    }

    #[test]
    fn new_drag_replaces_stale_one() {
        let (mut client, rx) = sample_client();
        as_white(&mut client);
        client.start_drag_piece(coord("g1")).unwrap();
        client.start_drag_piece(coord("b1")).unwrap();
        let proposal = client.drag_piece_drop(coord("c3")).unwrap();
        assert_eq!(proposal.from, coord("b1"));
        assert_eq!(drain_events(&rx).len(), 1);
    }

    #[test]
    fn role_notices() {
        let (mut client, _rx) = sample_client();
        let white = client.process_server_event(ServerEvent::PlayerRole(Force::White)).unwrap();
        assert_eq!(white.notice().as_deref(), Some("You are playing as White."));
        let black = client.process_server_event(ServerEvent::PlayerRole(Force::Black)).unwrap();
        assert_eq!(black.notice().as_deref(), Some("You are playing as Black."));
        assert_eq!(client.role(), PlayerRole::Player(Force::Black));
        let spectator = client.process_server_event(ServerEvent::SpectatorRole).unwrap();
        assert_eq!(spectator.notice().as_deref(), Some("You are viewing the game as a spectator."));
        assert_eq!(client.role(), PlayerRole::Spectator);
    }

    #[test]
    fn snapshot_replaces_position() {
        let (mut client, _rx) = sample_client();
        let event = ServerEvent::BoardState("4k3/8/8/8/8/8/8/4K3 b - - 0 1".to_owned());
        assert_eq!(client.process_server_event(event), Ok(NotableEvent::None));
        assert_eq!(client.game().grid().pieces().count(), 2);
    }

    #[test]
    fn rejected_events_keep_state() {
        let (mut client, _rx) = sample_client();
        as_white(&mut client);
        let before = client.game().snapshot();
        let bad_snapshot = client.process_server_event(ServerEvent::BoardState("garbage".to_owned()));
        assert!(matches!(
            bad_snapshot,
            Err(EventError::CannotApplyEvent(GameLogicError::InvalidSnapshot { .. }))
        ));
        let bad_move = client.process_server_event(ServerEvent::Move(algebraic_move("e2", "e5")));
        assert!(matches!(bad_move, Err(EventError::CannotApplyEvent(GameLogicError::IllegalMove { .. }))));
        assert_eq!(client.game().snapshot(), before);
        assert_eq!(client.role(), PlayerRole::Player(Force::White));
    }

    #[test]
    fn game_over_resets_locally() {
        let (mut client, rx) = sample_client();
        client.process_server_event(ServerEvent::Move(algebraic_move("e2", "e4"))).unwrap();
        let event = client
            .process_server_event(ServerEvent::GameOver { winner: "Black".to_owned() })
            .unwrap();
        assert_eq!(event.notice().as_deref(), Some("Checkmate! Black wins!"));
        assert_eq!(piece_at(&client.game().grid(), "e4"), None);
        assert!(drain_events(&rx).is_empty());
    }
}
