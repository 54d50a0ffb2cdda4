//! Enumeration types used throughout the round core.

use serde::{Deserialize, Serialize};

/// Top-level round state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundState {
    #[default]
    MainMenu,
    Playing,
    RoundEnd,
}

impl RoundState {
    /// The screen shown while in this state.
    pub fn screen(self) -> Screen {
        match self {
            RoundState::MainMenu => Screen::MainMenu,
            RoundState::Playing => Screen::Game,
            RoundState::RoundEnd => Screen::End,
        }
    }
}

/// UI screens. Each has its own element tree on the UI host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    MainMenu,
    Game,
    End,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::MainMenu, Screen::Game, Screen::End];

    pub fn name(self) -> &'static str {
        match self {
            Screen::MainMenu => "menu-screen",
            Screen::Game => "game-screen",
            Screen::End => "end-screen",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of asking the Firestorm scheduler to start a new sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirestormActivation {
    /// A new sequence was started; `uses_remaining` after this one.
    Started { uses_remaining: u32 },
    /// No uses left; the caller ends the round instead.
    Exhausted,
    /// The scheduler is not armed (not in a round).
    Disarmed,
}
