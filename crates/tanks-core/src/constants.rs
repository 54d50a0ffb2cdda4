//! Round core constants and tuning parameters.

/// Game loop tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Roster ---

/// Player number of the locally controlled, UI-tracked tank.
pub const PLAYER_ONE: u32 = 1;

/// Starting health of a freshly spawned tank.
pub const TANK_STARTING_HEALTH: f32 = 100.0;

/// Movement speed of a freshly spawned tank.
pub const TANK_BASE_SPEED: f32 = 12.0;

/// Amount added to player 1's speed by the increase-speed button.
pub const SPEED_INCREMENT: f32 = 1.0;

// --- Firestorm ---

/// Shells dropped per Firestorm sequence.
pub const FIRESTORM_WAVE_COUNT: u32 = 10;

/// Seconds between successive shells of one sequence.
pub const FIRESTORM_SHELL_DELAY_SECS: f64 = 0.1;

/// Horizontal half-extent of the drop area.
pub const FIRESTORM_RANDOM_RANGE: f32 = 20.0;

/// Height shells are dropped from.
pub const FIRESTORM_DROP_HEIGHT: f32 = 20.0;

/// Downward shell speed.
pub const FIRESTORM_FALL_SPEED: f32 = 30.0;

/// Firestorm activations allowed per session.
pub const FIRESTORM_USES: u32 = 3;

// --- Shells (headless host) ---

/// Splash radius of a shell on ground impact.
pub const SHELL_EXPLOSION_RADIUS: f32 = 5.0;

/// Damage dealt at the center of a shell explosion.
pub const SHELL_MAX_DAMAGE: f32 = 100.0;

// --- UI ---

/// Interval between player list health bar refreshes.
pub const HEALTH_POLL_INTERVAL_SECS: f64 = 0.5;

/// Alpha applied to a player's color in the player list icon.
pub const PLAYER_ICON_ALPHA: f32 = 0.9;

/// UI element identifiers, grouped by screen.
pub mod ui {
    // Main menu
    pub const START_BUTTON: &str = "start-button";
    pub const EXIT_BUTTON: &str = "exit-button";

    // Game screen
    pub const SPEED_LABEL: &str = "_speed";
    pub const KILLS_LABEL: &str = "_kills";
    pub const SHOTS_LABEL: &str = "_shots";
    pub const ACCURACY_LABEL: &str = "_accuracy";
    pub const INCREASE_SPEED_BUTTON: &str = "increase-speed";
    pub const BACK_TO_MENU_BUTTON: &str = "back-to-menu";
    pub const RANDOM_EXPLOSION_BUTTON: &str = "random-explosion";
    pub const PLAYER_LIST: &str = "player-list";

    // End screen
    pub const END_BACK_TO_MENU_BUTTON: &str = "back-to-menu-button";
}
