//! Session state machine and game events

use serde::{Deserialize, Serialize};

/// Whether gameplay is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Active gameplay (initial state)
    #[default]
    Playing,
    /// Player ship destroyed; waits for "new game"
    GameOver,
}

impl SessionState {
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionState::Playing)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, SessionState::GameOver)
    }

    /// PLAYING -> GAME_OVER. Returns true only on the actual transition, so
    /// repeated calls within a tick report it once.
    pub fn end_game(&mut self) -> bool {
        match self {
            SessionState::Playing => {
                *self = SessionState::GameOver;
                true
            }
            SessionState::GameOver => false,
        }
    }

    /// Back to PLAYING; only ever called by the new-game reset
    pub(crate) fn restart(&mut self) {
        *self = SessionState::Playing;
    }
}

/// Something the host may want to react to (sound, vibration)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerShot,
    EnemyShot,
    Explosion,
    GameOver,
    NewGame,
}
