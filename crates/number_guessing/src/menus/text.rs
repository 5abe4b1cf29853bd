//! Fixed menu text.

pub(super) const WELCOME: &str = "\
Welcome to NumberGuessing

Select one option:
1. Start game
2. Rules
3. Help
4. Settings
5. Exit";

pub(super) const SETTINGS_BANNER: &str = r"
 __      _   _   _
/ _\ ___| |_| |_(_)_ __   __ _ ___
\ \ / _ \ __| __| | '_ \ / _` / __|
_\ \  __/ |_| |_| | | | | (_| \__ \
\__/\___|\__|\__|_|_| |_|\__, |___/
                         |___/
";

pub(super) const SETTINGS_OPTIONS: &str = "\
Select one option:
1. Change difficulty
2. Change username
3. Manage custom difficulties
4. Back to main menu";

pub(super) const GAME_OPTIONS: &str = "\
Select one option:
1. Computer guesses
2. User guesses
3. Back to main menu";

pub(super) const RULES: &str = "\
--- The rules ---
The rules are pretty simple:
As a guesser:
The computer has selected a random number within a given range. Guess the \
number before you run out of rounds. The computer tells you whether its \
number is lower or higher than your guess.

The computer is guessing:
Choose a number within the allowed difficulty range. The computer guesses \
your number. Tell the computer if it is correct and help it with a lower or \
higher hint. You have won when the computer hasn't guessed your number after \
all rounds are played.";

pub(super) const HELP: &str = "\
--- Help ---
Navigate through the menus by typing the number of an option. You can leave \
any text input by typing 'exit'. This doesn't work when you are asked to \
select an option.
Small extra hints:
- Y/N questions can be answered by the shorthand or the full word (yes/no)
- The lower or higher hint during the game can be shortened by typing l or h";

pub(super) const USERNAME_RULE: &str =
    "Your username must be 3-100 characters long and can only contain alphanumeric values (A-Z and 0-9)";

pub(super) const NAME_RULE: &str =
    "Your difficulty name must be 3-30 characters long and can only contain letters";
