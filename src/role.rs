use crate::force::Force;


// Which side of the game this client controls.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PlayerRole {
    Player(Force),
    // Either explicitly assigned by the server or not assigned yet. Can only watch.
    #[default]
    Spectator,
}

impl PlayerRole {
    pub fn force(self) -> Option<Force> {
        match self {
            PlayerRole::Player(force) => Some(force),
            PlayerRole::Spectator => None,
        }
    }

    pub fn controls(self, force: Force) -> bool { self.force() == Some(force) }
}
