//! Screens and transitions for the menu state machine.

/// A menu screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Screen {
    /// Welcome banner and top-level options.
    Main,
    /// Game rules.
    Rules,
    /// Navigation help.
    Help,
    /// Mode selection for a new game.
    StartGame,
    /// Account settings.
    Settings,
    /// Pick the difficulty for the next games.
    ChangeDifficulty,
    /// Rename the account.
    ChangeUsername,
    /// List, delete and add custom difficulties.
    ManageCustom,
    /// Create a custom difficulty.
    AddCustom,
    /// Ask before leaving.
    ConfirmExit,
}

/// The result of handling a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Show another screen.
    GoTo(Screen),
    /// Leave the application.
    Quit,
}
