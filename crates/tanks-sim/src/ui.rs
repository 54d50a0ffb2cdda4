//! UI binding: element ids to commands, and display pushes.
//!
//! Each screen gets a binding table when it is activated and again whenever
//! the UI host reports that its definition was reloaded. Logic never looks
//! elements up by name outside of binding; clicks and display updates go
//! through the table.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use tanks_core::commands::RoundCommand;
use tanks_core::constants::{ui, HEALTH_POLL_INTERVAL_SECS};
use tanks_core::enums::Screen;
use tanks_core::error::{ConfigError, Result};
use tanks_core::host::UiHost;
use tanks_core::state::{RoundSnapshot, StatsView};

/// A stat label on the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Speed,
    KillsRemaining,
    ShotsFired,
    Accuracy,
}

impl StatField {
    fn element(self) -> &'static str {
        match self {
            StatField::Speed => ui::SPEED_LABEL,
            StatField::KillsRemaining => ui::KILLS_LABEL,
            StatField::ShotsFired => ui::SHOTS_LABEL,
            StatField::Accuracy => ui::ACCURACY_LABEL,
        }
    }

    fn text(self, stats: &StatsView) -> String {
        match self {
            StatField::Speed => stats.speed.to_string(),
            StatField::KillsRemaining => stats.kills_remaining.to_string(),
            StatField::ShotsFired => stats.shots_fired.to_string(),
            StatField::Accuracy => stats.accuracy_percent.to_string(),
        }
    }
}

const STAT_FIELDS: [StatField; 4] = [
    StatField::Speed,
    StatField::KillsRemaining,
    StatField::ShotsFired,
    StatField::Accuracy,
];

/// Buttons a screen cannot work without.
fn required_buttons(screen: Screen) -> &'static [(&'static str, RoundCommand)] {
    match screen {
        Screen::MainMenu => &[
            (ui::START_BUTTON, RoundCommand::StartRound),
            (ui::EXIT_BUTTON, RoundCommand::Quit),
        ],
        Screen::Game => &[
            (ui::INCREASE_SPEED_BUTTON, RoundCommand::IncreaseSpeed),
            (ui::BACK_TO_MENU_BUTTON, RoundCommand::ReturnToMenu),
            (ui::RANDOM_EXPLOSION_BUTTON, RoundCommand::LaunchFirestorm),
        ],
        Screen::End => &[(ui::END_BACK_TO_MENU_BUTTON, RoundCommand::ReturnToMenu)],
    }
}

/// The binding table of one screen.
#[derive(Debug, Clone, Default)]
pub struct ScreenBindings {
    handlers: HashMap<&'static str, RoundCommand>,
    stat_labels: Vec<StatField>,
    player_list: Option<&'static str>,
}

impl ScreenBindings {
    /// Bind every element of `screen` found on the host. A missing button
    /// is a configuration error; missing labels and lists are skipped.
    pub fn build(ui_host: &impl UiHost, screen: Screen) -> Result<Self> {
        let mut bindings = Self::default();

        for &(element, command) in required_buttons(screen) {
            if !ui_host.has_element(screen, element) {
                return Err(ConfigError::MissingUiElement {
                    screen,
                    element: element.to_string(),
                });
            }
            bindings.handlers.insert(element, command);
        }

        if screen == Screen::Game {
            for field in STAT_FIELDS {
                if ui_host.has_element(screen, field.element()) {
                    bindings.stat_labels.push(field);
                } else {
                    warn!(%screen, element = field.element(), "Stat label missing, not bound");
                }
            }
            if ui_host.has_element(screen, ui::PLAYER_LIST) {
                bindings.player_list = Some(ui::PLAYER_LIST);
            } else {
                warn!(%screen, element = ui::PLAYER_LIST, "Player list missing, not bound");
            }
        }

        Ok(bindings)
    }

    pub fn command_for(&self, element: &str) -> Option<RoundCommand> {
        self.handlers.get(element).copied()
    }

    pub fn stat_labels(&self) -> &[StatField] {
        &self.stat_labels
    }

    pub fn has_player_list(&self) -> bool {
        self.player_list.is_some()
    }
}

/// Keeps the UI host in step with round snapshots.
#[derive(Debug, Default)]
pub struct UiPresenter {
    bindings: HashMap<Screen, ScreenBindings>,
    shown: Option<Screen>,
    /// Seconds until the next player list refresh.
    health_poll_secs: f64,
}

impl UiPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every screen. Called once at startup.
    pub fn bind_all(&mut self, ui_host: &impl UiHost) -> Result<()> {
        for screen in Screen::ALL {
            self.bind_screen(ui_host, screen)?;
        }
        Ok(())
    }

    /// (Re)build the binding table of one screen.
    pub fn bind_screen(&mut self, ui_host: &impl UiHost, screen: Screen) -> Result<()> {
        let bindings = ScreenBindings::build(ui_host, screen)?;
        self.bindings.insert(screen, bindings);
        Ok(())
    }

    /// The host reloaded a screen's definition; old element references are
    /// stale, so bind again.
    pub fn screen_reloaded(&mut self, ui_host: &impl UiHost, screen: Screen) -> Result<()> {
        info!(%screen, "Screen definition reloaded, rebinding");
        self.bindings.remove(&screen);
        if self.shown == Some(screen) {
            self.shown = None;
        }
        self.bind_screen(ui_host, screen)
    }

    pub fn bindings(&self, screen: Screen) -> Option<&ScreenBindings> {
        self.bindings.get(&screen)
    }

    /// Translate a click into a command through the binding table.
    pub fn click(&self, screen: Screen, element: &str) -> Option<RoundCommand> {
        let command = self.bindings.get(&screen)?.command_for(element);
        if command.is_none() {
            debug!(%screen, element, "Click on unbound element");
        }
        command
    }

    /// Push a snapshot to the UI host: screen visibility, stat labels every
    /// call, player list health bars on the poll interval.
    pub fn present(&mut self, ui_host: &mut impl UiHost, snapshot: &RoundSnapshot, dt: f64) {
        if self.shown != Some(snapshot.screen) {
            for screen in Screen::ALL {
                ui_host.set_screen_visible(screen, screen == snapshot.screen);
            }
            self.shown = Some(snapshot.screen);
            self.health_poll_secs = 0.0;
        }

        let Some(bindings) = self.bindings.get(&snapshot.screen) else {
            return;
        };

        if let Some(stats) = &snapshot.stats {
            for field in &bindings.stat_labels {
                ui_host.set_label(snapshot.screen, field.element(), &field.text(stats));
            }
        }

        if let Some(list) = bindings.player_list {
            self.health_poll_secs -= dt;
            if self.health_poll_secs <= 0.0 {
                ui_host.set_player_list(snapshot.screen, list, &snapshot.players);
                self.health_poll_secs = HEALTH_POLL_INTERVAL_SECS;
            }
        }
    }
}
