//! Menu controller: the state machine driving the terminal session.

use std::io::{BufRead, Write};

use anyhow::Context;
use rand::rngs::StdRng;
use strictly_guessing::{
    Difficulty, DifficultyDraft, DifficultyRegistry, GameMode, GameOutcome, MAX_ROUNDS,
    MAX_VALUE_LIMIT, MIN_ROUNDS, MIN_VALUE_LIMIT, run_computer_guesses_game,
    run_user_guesses_game,
};
use tracing::{debug, info, instrument, warn};

use super::screen::{Screen, ScreenTransition};
use super::text;
use crate::input::{is_valid_difficulty_name, is_valid_email, is_valid_username};
use crate::{Console, DifficultyService, ProfileService, RegistryError, Session};

const BACK_TO_MENU: &str = "Press Enter to go back to the menu...";

/// Controller that drives the menu state machine.
///
/// Call [`MenuController::run`] to start the loop.
#[derive(Debug)]
pub struct MenuController<R, W> {
    profiles: ProfileService,
    difficulties: DifficultyService,
    console: Console<R, W>,
    rng: StdRng,
    default_difficulty: String,
    session: Option<Session>,
}

impl<R: BufRead, W: Write> MenuController<R, W> {
    /// Creates a controller with nobody logged in.
    #[instrument(skip_all, fields(default_difficulty = %default_difficulty))]
    pub fn new(
        profiles: ProfileService,
        difficulties: DifficultyService,
        console: Console<R, W>,
        rng: StdRng,
        default_difficulty: String,
    ) -> Self {
        info!("Creating MenuController");
        Self {
            profiles,
            difficulties,
            console,
            rng,
            default_difficulty,
            session: None,
        }
    }

    /// The logged-in session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Consumes the controller, returning the console.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Runs the menus until the person exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the console or the database fails.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> anyhow::Result<()> {
        info!("Starting menu loop");
        let mut screen = Screen::Main;

        loop {
            debug!(%screen, "Showing screen");
            let transition = match screen {
                Screen::Main => self.main_menu()?,
                Screen::Rules => self.show_text(text::RULES, "Understood? ")?,
                Screen::Help => self.show_text(text::HELP, "All clear? ")?,
                Screen::StartGame => self.start_game()?,
                Screen::Settings => self.settings()?,
                Screen::ChangeDifficulty => self.change_difficulty()?,
                Screen::ChangeUsername => self.change_username()?,
                Screen::ManageCustom => self.manage_custom()?,
                Screen::AddCustom => self.add_custom()?,
                Screen::ConfirmExit => self.confirm_exit()?,
            };

            match transition {
                ScreenTransition::GoTo(next) => screen = next,
                ScreenTransition::Quit => {
                    info!("Menu loop finished");
                    return Ok(());
                }
            }
        }
    }

    fn require_session(&self) -> anyhow::Result<&Session> {
        self.session.as_ref().context("No account logged in")
    }

    fn require_session_mut(&mut self) -> anyhow::Result<&mut Session> {
        self.session.as_mut().context("No account logged in")
    }

    /// Logs in by email, registering unknown emails. Returns false if the person left.
    #[instrument(skip(self))]
    fn login(&mut self) -> anyhow::Result<bool> {
        if self.session.is_some() {
            return Ok(true);
        }

        let Some(email) = self.console.ask_text(
            "Please enter your email:\n",
            is_valid_email,
            "Please enter a valid email address",
        )?
        else {
            return Ok(false);
        };

        let user = match self.profiles.find_user(&email)? {
            Some(user) => {
                self.console
                    .say(format!("Welcome back {}!", user.username()))?;
                user
            }
            None => {
                let Some(username) = self.console.ask_text(
                    "Welcome! Please choose a username:\n",
                    is_valid_username,
                    text::USERNAME_RULE,
                )?
                else {
                    return Ok(false);
                };
                self.profiles
                    .register(email, username, &self.default_difficulty)?
            }
        };

        let difficulty = self.difficulties.resolve(
            *user.id(),
            user.current_difficulty().as_deref(),
            &self.default_difficulty,
        )?;
        info!(user_id = user.id(), difficulty = %difficulty.name(), "Logged in");
        self.session = Some(Session::new(user, difficulty));
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────
    //  Main menu
    // ─────────────────────────────────────────────────────────────

    fn main_menu(&mut self) -> anyhow::Result<ScreenTransition> {
        self.console.clear()?;
        self.console.say(text::WELCOME)?;
        let next = match self.console.select(5)? {
            Some(0) => Screen::StartGame,
            Some(1) => Screen::Rules,
            Some(2) => Screen::Help,
            Some(3) => Screen::Settings,
            Some(_) => Screen::ConfirmExit,
            None => return Ok(ScreenTransition::Quit),
        };
        Ok(ScreenTransition::GoTo(next))
    }

    fn show_text(&mut self, body: &str, question: &str) -> anyhow::Result<ScreenTransition> {
        self.console.say(body)?;
        self.console.pause(&format!("{}{}", question, BACK_TO_MENU))?;
        Ok(ScreenTransition::GoTo(Screen::Main))
    }

    fn confirm_exit(&mut self) -> anyhow::Result<ScreenTransition> {
        match self.console.yes_no("Do you want to exit the game?")? {
            Some(false) => Ok(ScreenTransition::GoTo(Screen::Main)),
            Some(true) | None => {
                self.console.say("Goodbye")?;
                Ok(ScreenTransition::Quit)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Games
    // ─────────────────────────────────────────────────────────────

    fn start_game(&mut self) -> anyhow::Result<ScreenTransition> {
        if !self.login()? {
            return Ok(ScreenTransition::GoTo(Screen::Main));
        }

        self.console.clear()?;
        let current = self.require_session()?.difficulty().name().to_string();
        self.console
            .say(format!("Current difficulty: {}", current))?;
        self.console.say(text::GAME_OPTIONS)?;

        let mode = match self.console.select(3)? {
            Some(0) => GameMode::ComputerGuesses,
            Some(1) => GameMode::UserGuesses,
            Some(_) => return Ok(ScreenTransition::GoTo(Screen::Main)),
            None => return Ok(ScreenTransition::Quit),
        };
        self.play(mode)?;
        Ok(ScreenTransition::GoTo(Screen::Main))
    }

    /// Plays one game on the session's difficulty and records the outcome.
    #[instrument(skip(self))]
    fn play(&mut self, mode: GameMode) -> anyhow::Result<GameOutcome> {
        let session = self.require_session()?;
        let account = session.account_id();
        let difficulty = session.difficulty().clone();
        info!(%mode, difficulty = %difficulty.name(), "Starting game");

        let outcome = match mode {
            GameMode::ComputerGuesses => {
                self.console.say(format!(
                    "Think of a number between {} and {}. I have {} rounds to find it.",
                    difficulty.min_value(),
                    difficulty.max_value(),
                    difficulty.rounds()
                ))?;
                if !difficulty.computer_always_wins() {
                    self.console.say(format!(
                        "Heads up: this range can take me up to {} rounds, so you might win.",
                        difficulty.guaranteed_rounds()
                    ))?;
                }
                run_computer_guesses_game(&difficulty, &mut self.console)?
            }
            GameMode::UserGuesses => {
                self.console.say(format!(
                    "I picked a number between {} and {}. You have {} rounds to find it.",
                    difficulty.min_value(),
                    difficulty.max_value(),
                    difficulty.rounds()
                ))?;
                run_user_guesses_game(&difficulty, &mut self.console, &mut self.rng)?
            }
        };

        self.console.say(outcome_message(mode, &outcome))?;
        self.profiles
            .record_game_result(account, mode, difficulty.name(), &outcome)?;
        self.console.pause(BACK_TO_MENU)?;
        Ok(outcome)
    }

    // ─────────────────────────────────────────────────────────────
    //  Settings
    // ─────────────────────────────────────────────────────────────

    fn settings(&mut self) -> anyhow::Result<ScreenTransition> {
        if !self.login()? {
            return Ok(ScreenTransition::GoTo(Screen::Main));
        }

        self.console.clear()?;
        self.console.say(text::SETTINGS_BANNER)?;
        let username = self.require_session()?.user().username().clone();
        self.console.say(format!("Hey {}!", username))?;
        self.console.say(text::SETTINGS_OPTIONS)?;

        let next = match self.console.select(4)? {
            Some(0) => Screen::ChangeDifficulty,
            Some(1) => Screen::ChangeUsername,
            Some(2) => Screen::ManageCustom,
            Some(_) => Screen::Main,
            None => return Ok(ScreenTransition::Quit),
        };
        Ok(ScreenTransition::GoTo(next))
    }

    fn change_difficulty(&mut self) -> anyhow::Result<ScreenTransition> {
        let account = self.require_session()?.account_id();
        let all = self.difficulties.list_all(account)?;

        self.console.say("Select one difficulty:")?;
        for (index, difficulty) in all.iter().enumerate() {
            self.console.say(format!("{}. {}", index + 1, difficulty))?;
        }
        self.console
            .say(format!("{}. Back to the settings menu", all.len() + 1))?;

        let chosen = match self.console.select(all.len() + 1)? {
            Some(index) if index < all.len() => all[index].clone(),
            Some(_) => return Ok(ScreenTransition::GoTo(Screen::Settings)),
            None => return Ok(ScreenTransition::Quit),
        };

        self.apply_difficulty(chosen)?;
        Ok(ScreenTransition::GoTo(Screen::Settings))
    }

    /// Persists `difficulty` as current and updates the session.
    fn apply_difficulty(&mut self, difficulty: Difficulty) -> anyhow::Result<()> {
        let account = self.require_session()?.account_id();
        let user = self.profiles.select_difficulty(account, &difficulty)?;
        self.console
            .say(format!("Difficulty set: {}", difficulty.name()))?;

        let session = self.require_session_mut()?;
        session.set_user(user);
        session.set_difficulty(difficulty);
        Ok(())
    }

    fn change_username(&mut self) -> anyhow::Result<ScreenTransition> {
        let account = self.require_session()?.account_id();
        let Some(username) = self.console.ask_text(
            "Please enter your new username:\n",
            is_valid_username,
            text::USERNAME_RULE,
        )?
        else {
            return Ok(ScreenTransition::GoTo(Screen::Settings));
        };

        let user = self.profiles.change_username(account, &username)?;
        self.require_session_mut()?.set_user(user);
        self.console.say("Username changed")?;
        Ok(ScreenTransition::GoTo(Screen::Settings))
    }

    fn manage_custom(&mut self) -> anyhow::Result<ScreenTransition> {
        let account = self.require_session()?.account_id();
        let customs = self.difficulties.list_custom(account)?;

        self.console
            .say("Choose a difficulty to delete or add a new one")?;
        for (index, difficulty) in customs.iter().enumerate() {
            self.console.say(format!("{}. {}", index + 1, difficulty))?;
        }
        self.console
            .say(format!("{}. Add a new custom difficulty", customs.len() + 1))?;
        self.console
            .say(format!("{}. Back to the settings", customs.len() + 2))?;

        let chosen = match self.console.select(customs.len() + 2)? {
            Some(index) if index < customs.len() => &customs[index],
            Some(index) if index == customs.len() => {
                return Ok(ScreenTransition::GoTo(Screen::AddCustom));
            }
            Some(_) => return Ok(ScreenTransition::GoTo(Screen::Settings)),
            None => return Ok(ScreenTransition::Quit),
        };

        self.console.say(chosen)?;
        match self
            .console
            .yes_no("Do you want to delete this custom difficulty?")?
        {
            Some(true) => self.delete_custom(chosen)?,
            Some(false) => {}
            None => return Ok(ScreenTransition::Quit),
        }
        Ok(ScreenTransition::GoTo(Screen::ManageCustom))
    }

    /// Deletes a custom difficulty, moving the session off it if it was current.
    #[instrument(skip(self, difficulty), fields(name = %difficulty.name()))]
    fn delete_custom(&mut self, difficulty: &Difficulty) -> anyhow::Result<()> {
        let account = self.require_session()?.account_id();
        let Some(id) = difficulty.custom_id() else {
            warn!("Refusing to delete a built-in difficulty");
            return Ok(());
        };

        match self.difficulties.delete_custom(account, id) {
            Ok(()) => self.console.say("Custom difficulty deleted")?,
            Err(RegistryError::NotFound { .. }) => {
                self.console.say("That difficulty no longer exists")?;
            }
            Err(e) => return Err(e.into()),
        }

        if self.require_session()?.difficulty().custom_id() == Some(id) {
            let fallback = self
                .difficulties
                .resolve(account, None, &self.default_difficulty)?;
            self.apply_difficulty(fallback)?;
        }
        Ok(())
    }

    fn add_custom(&mut self) -> anyhow::Result<ScreenTransition> {
        let account = self.require_session()?.account_id();
        let taken = self.difficulties.list_all(account)?;

        let name = loop {
            let Some(name) = self.console.ask_text(
                "Enter a name for your difficulty:\n",
                is_valid_difficulty_name,
                text::NAME_RULE,
            )?
            else {
                return Ok(ScreenTransition::GoTo(Screen::Settings));
            };
            if taken.iter().any(|d| d.name() == name) {
                self.console
                    .say("You can't reuse a name for a difficulty")?;
                continue;
            }
            break name;
        };

        let Some(rounds) = self
            .console
            .ask_number("Please enter number of rounds:\n", MIN_ROUNDS..=MAX_ROUNDS)?
        else {
            return Ok(ScreenTransition::GoTo(Screen::Settings));
        };
        let Some(min_value) = self
            .console
            .ask_number("Please enter the minimum value:\n", 0..=MIN_VALUE_LIMIT)?
        else {
            return Ok(ScreenTransition::GoTo(Screen::Settings));
        };
        let Some(max_value) = self.console.ask_number(
            "Please enter the maximum value:\n",
            min_value + 1..=MAX_VALUE_LIMIT,
        )?
        else {
            return Ok(ScreenTransition::GoTo(Screen::Settings));
        };

        let draft = DifficultyDraft::new(name, rounds, min_value, max_value);
        match self.difficulties.create_custom(account, draft) {
            Ok(_) => self.console.say("Your new difficulty has been added!")?,
            Err(RegistryError::Validation(e)) => self.console.say(e)?,
            Err(e) => return Err(e.into()),
        }
        Ok(ScreenTransition::GoTo(Screen::ManageCustom))
    }
}

/// What to tell the person once a game is over.
fn outcome_message(mode: GameMode, outcome: &GameOutcome) -> String {
    match (mode, *outcome) {
        (GameMode::ComputerGuesses, GameOutcome::Won { rounds_played, secret }) => format!(
            "I found your number {} in {} rounds! You lose.",
            secret, rounds_played
        ),
        (GameMode::ComputerGuesses, GameOutcome::LostRounds { rounds_played, .. }) => format!(
            "I couldn't find your number in {} rounds. You win!",
            rounds_played
        ),
        (GameMode::UserGuesses, GameOutcome::Won { rounds_played, secret }) => format!(
            "You found my number {} in {} rounds. You win!",
            secret, rounds_played
        ),
        (GameMode::UserGuesses, GameOutcome::LostRounds { secret, .. }) => match secret {
            Some(secret) => format!("Out of rounds! My number was {}. You lose.", secret),
            None => "Out of rounds! You lose.".to_string(),
        },
        (_, GameOutcome::Contradiction { .. }) => {
            "Your hints contradict each other, no number fits them all.".to_string()
        }
        (_, GameOutcome::Aborted { .. }) => "Game aborted.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages_take_person_side() {
        let computer_won = GameOutcome::Won {
            rounds_played: 3,
            secret: 7,
        };
        assert!(outcome_message(GameMode::ComputerGuesses, &computer_won).contains("You lose"));
        assert!(outcome_message(GameMode::UserGuesses, &computer_won).contains("You win"));

        let lost = GameOutcome::LostRounds {
            rounds_played: 10,
            secret: Some(42),
        };
        assert!(outcome_message(GameMode::UserGuesses, &lost).contains("42"));
        assert!(outcome_message(GameMode::ComputerGuesses, &lost).contains("You win"));
    }
}
