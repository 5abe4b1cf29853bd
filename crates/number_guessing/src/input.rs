//! Classification of raw input lines.
//!
//! Every function here is pure: it takes one line and returns a typed value
//! or `None`. Re-prompting is the console's job.

use std::sync::LazyLock;

use regex::Regex;
use strictly_guessing::{Hint, Turn, is_valid_name};

/// Word that leaves any text prompt.
pub const EXIT_WORD: &str = "exit";

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{3,100}$").expect("valid username regex"));
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,6}$").expect("valid number regex"));
static OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]?$").expect("valid option regex"));

/// Returns true if the line is exactly the exit word.
pub fn is_exit(line: &str) -> bool {
    line == EXIT_WORD
}

/// Parses a menu selection between 1 and `count`, returned zero-based.
///
/// Menus of up to nine entries take a single digit; longer lists of custom
/// difficulties take two digits without a leading zero.
pub fn parse_option(line: &str, count: usize) -> Option<usize> {
    if !OPTION.is_match(line) {
        return None;
    }
    let option: usize = line.parse().ok()?;
    (1..=count).contains(&option).then(|| option - 1)
}

/// Parses 1 to 6 decimal digits with nothing around them.
pub fn parse_number(line: &str) -> Option<u32> {
    if NUMBER.is_match(line) {
        line.parse().ok()
    } else {
        None
    }
}

/// Classifies a hint for the computer's guess.
///
/// Accepts `l`, `lower`, `h`, `higher` and `correct` in any case, and
/// exactly `exit` as a request to leave.
pub fn parse_hint(line: &str) -> Option<Turn<Hint>> {
    if is_exit(line) {
        return Some(Turn::Abort);
    }
    match line.trim().to_ascii_lowercase().as_str() {
        "l" | "lower" => Some(Turn::Play(Hint::Lower)),
        "h" | "higher" => Some(Turn::Play(Hint::Higher)),
        "correct" => Some(Turn::Play(Hint::Correct)),
        _ => None,
    }
}

/// Classifies a yes/no answer.
pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Returns true for 3 to 100 ASCII letters and digits.
pub fn is_valid_username(line: &str) -> bool {
    USERNAME.is_match(line)
}

/// Returns true for something shaped like `name@domain.tld`.
pub fn is_valid_email(line: &str) -> bool {
    EMAIL.is_match(line)
}

/// Returns true for a well-formed custom difficulty name.
pub fn is_valid_difficulty_name(line: &str) -> bool {
    is_valid_name(line)
}
