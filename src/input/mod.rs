//! # Input Module
//!
//! Line-based command parsing for the terminal front end.
//!
//! Movement follows the WASD layout. The same physical keys on a Russian
//! layout (ц/ф/ы/в and friends) map to the same commands, so switching the
//! keyboard layout mid-game does not break controls.

use crate::{Direction, Intent, WarrenError, WarrenResult};

/// Player input types produced by the command parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Resolve one turn with this intent
    Act(Intent),
    /// Start over on a fresh floor
    Restart,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

/// Help text listing every command.
pub const HELP_TEXT: &str = "\
Commands:
  w/a/s/d (ц/ф/ы/в)  move one tile
  .                  wait in place (picks up items underfoot)
  f or space         attack all eight neighbours
  r                  restart on a new floor
  h or ?             show this help
  q                  quit
Several keys on one line run one after another, e.g. `ddf`. A space
between keys is an attack too, so `d d` moves, attacks, and moves.";

/// Maps a movement key to its direction.
///
/// # Examples
///
/// ```
/// use warren::{direction_for_key, Direction};
///
/// assert_eq!(direction_for_key('w'), Some(Direction::North));
/// assert_eq!(direction_for_key('Ф'), Some(Direction::West));
/// assert_eq!(direction_for_key('x'), None);
/// ```
pub fn direction_for_key(key: char) -> Option<Direction> {
    match key.to_lowercase().next()? {
        'w' | 'ц' => Some(Direction::North),
        'a' | 'ф' => Some(Direction::West),
        's' | 'ы' => Some(Direction::South),
        'd' | 'в' => Some(Direction::East),
        _ => None,
    }
}

/// Maps a single key to an input.
pub fn input_for_key(key: char) -> Option<PlayerInput> {
    if let Some(direction) = direction_for_key(key) {
        return Some(PlayerInput::Act(Intent::from(direction)));
    }

    match key.to_lowercase().next()? {
        '.' => Some(PlayerInput::Act(Intent::wait())),
        ' ' | 'f' | 'а' => Some(PlayerInput::Act(Intent::Attack)),
        'r' | 'к' => Some(PlayerInput::Restart),
        'h' | 'р' | '?' => Some(PlayerInput::Help),
        'q' | 'й' => Some(PlayerInput::Quit),
        _ => None,
    }
}

/// Parses one line of player input.
///
/// A line is either a whole command word (`attack`, `wait`, `restart`,
/// `help`, `quit`) or a run of single-key commands. Leading and trailing
/// whitespace is trimmed, but a space inside a run is an attack key like
/// `f`; tabs are skipped. A line made only of spaces is a single attack.
/// Empty lines produce no input.
///
/// # Examples
///
/// ```
/// use warren::{parse_command, Intent, PlayerInput};
///
/// let inputs = parse_command("df").unwrap();
/// assert_eq!(
///     inputs,
///     vec![
///         PlayerInput::Act(Intent::Move { dx: 1, dy: 0 }),
///         PlayerInput::Act(Intent::Attack),
///     ]
/// );
/// assert!(parse_command("xyz").is_err());
/// ```
pub fn parse_command(line: &str) -> WarrenResult<Vec<PlayerInput>> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if line.is_empty() {
        return Ok(Vec::new());
    }
    if line.chars().all(|c| c == ' ') {
        return Ok(vec![PlayerInput::Act(Intent::Attack)]);
    }

    let trimmed = line.trim();
    if let Some(input) = command_word(trimmed) {
        return Ok(vec![input]);
    }

    trimmed
        .chars()
        .filter(|&c| c == ' ' || !c.is_whitespace())
        .map(|key| {
            input_for_key(key).ok_or_else(|| WarrenError::UnknownCommand(key.to_string()))
        })
        .collect()
}

fn command_word(word: &str) -> Option<PlayerInput> {
    match word.to_lowercase().as_str() {
        "attack" => Some(PlayerInput::Act(Intent::Attack)),
        "wait" => Some(PlayerInput::Act(Intent::wait())),
        "restart" => Some(PlayerInput::Restart),
        "help" => Some(PlayerInput::Help),
        "quit" | "exit" => Some(PlayerInput::Quit),
        _ => None,
    }
}
