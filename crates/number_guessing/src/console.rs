//! Blocking line-based console.
//!
//! Reads one line at a time, re-prompts until the line classifies, and
//! reports end of input as `None` (or [`Turn::Abort`] during a game).

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use strictly_guessing::{GuessPrompt, GuessProvider, Hint, HintProvider, RoundPrompt, RoundReport, Turn};
use tracing::{debug, instrument, warn};

use crate::input::{is_exit, parse_hint, parse_number, parse_option, parse_yes_no};

/// Line reader and writer with re-prompt loops.
#[derive(Debug)]
pub struct Console<R, W> {
    reader: R,
    writer: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console that clears the screen between menus.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            clear_screen: true,
        }
    }

    /// Disables screen clearing (scripted sessions, pipes).
    pub fn without_clearing(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    /// Returns the writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes the console, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Writes one line.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    /// Clears the terminal and moves the cursor home.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Shows `prompt` and reads one line without its line ending.
    ///
    /// Returns `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            debug!("End of input");
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompts until `parse` accepts a line, printing `retry` after each miss.
    fn collect<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Option<T>,
        retry: &str,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse(&line) {
                Some(value) => return Ok(Some(value)),
                None => {
                    debug!(line = %line, "Input rejected");
                    self.say(retry)?;
                }
            }
        }
    }

    /// Reads a menu selection between 1 and `count`, returned zero-based.
    #[instrument(skip(self))]
    pub fn select(&mut self, count: usize) -> io::Result<Option<usize>> {
        self.collect(
            "Select: ",
            |line| parse_option(line, count),
            "Please select the correct option",
        )
    }

    /// Asks a yes/no question.
    #[instrument(skip(self))]
    pub fn yes_no(&mut self, question: &str) -> io::Result<Option<bool>> {
        self.collect(
            &format!("{} (y/n)\n", question),
            parse_yes_no,
            "Please answer with y/yes or n/no",
        )
    }

    /// Reads a number inside `range`; `exit` or end of input give `None`.
    #[instrument(skip(self))]
    pub fn ask_number(&mut self, prompt: &str, range: RangeInclusive<u32>) -> io::Result<Option<u32>> {
        let retry = format!(
            "Please enter a number between {} and {}",
            range.start(),
            range.end()
        );
        let answer = self.collect(
            prompt,
            |line| {
                if is_exit(line) {
                    return Some(None);
                }
                parse_number(line)
                    .filter(|n| range.contains(n))
                    .map(Some)
            },
            &retry,
        )?;
        Ok(answer.flatten())
    }

    /// Reads text accepted by `is_valid`; `exit` or end of input give `None`.
    #[instrument(skip(self, is_valid))]
    pub fn ask_text(
        &mut self,
        prompt: &str,
        is_valid: impl Fn(&str) -> bool,
        retry: &str,
    ) -> io::Result<Option<String>> {
        let answer = self.collect(
            prompt,
            |line| {
                if is_exit(line) {
                    Some(None)
                } else if is_valid(line) {
                    Some(Some(line.to_string()))
                } else {
                    None
                }
            },
            retry,
        )?;
        Ok(answer.flatten())
    }

    /// Waits for Enter.
    pub fn pause(&mut self, prompt: &str) -> io::Result<()> {
        self.read_line(prompt).map(|_| ())
    }
}

impl<R: BufRead, W: Write> HintProvider for Console<R, W> {
    fn hint_for(&mut self, prompt: &GuessPrompt) -> Turn<Hint> {
        let question = format!(
            "Round {}/{} - Is your number {}? (l = lower, h = higher, correct)\n",
            prompt.round, prompt.budget, prompt.guess
        );
        match self.collect(
            &question,
            parse_hint,
            "Please answer with l (lower), h (higher) or correct",
        ) {
            Ok(Some(turn)) => turn,
            Ok(None) => Turn::Abort,
            Err(e) => {
                warn!(error = %e, "Console failed, aborting game");
                Turn::Abort
            }
        }
    }

    fn on_round(&mut self, report: &RoundReport) {
        let message = match report.hint {
            Hint::Lower => format!("Noted: your number is below {}.", report.guess),
            Hint::Higher => format!("Noted: your number is above {}.", report.guess),
            Hint::Correct => format!("Got it: your number is {}.", report.guess),
        };
        if let Err(e) = self.say(message) {
            warn!(error = %e, "Failed to report round");
        }
    }
}

impl<R: BufRead, W: Write> GuessProvider for Console<R, W> {
    fn next_guess(&mut self, prompt: &RoundPrompt) -> Turn<u32> {
        let question = format!(
            "Round {}/{} - Enter your guess ({}-{}):\n",
            prompt.round, prompt.budget, prompt.min, prompt.max
        );
        match self.ask_number(&question, prompt.min..=prompt.max) {
            Ok(Some(guess)) => Turn::Play(guess),
            Ok(None) => Turn::Abort,
            Err(e) => {
                warn!(error = %e, "Console failed, aborting game");
                Turn::Abort
            }
        }
    }

    fn on_round(&mut self, report: &RoundReport) {
        let message = match report.hint {
            Hint::Lower => format!("Lower! The number is smaller than {}.", report.guess),
            Hint::Higher => format!("Higher! The number is bigger than {}.", report.guess),
            Hint::Correct => format!("Correct! The number was {}.", report.guess),
        };
        if let Err(e) = self.say(message) {
            warn!(error = %e, "Failed to report round");
        }
    }
}
