//! Typed-command parsing.
//!
//! This module owns the text-to-command mapping so the rest of the client
//! stays agnostic about concrete spellings. Parsing is pure; anything that
//! depends on the live game (such as picking a default attack target) is
//! left to the caller.

use std::str::FromStr;

use game_core::{AttackKind, EnemyId, Intent, ItemKind, ZoneId};
use thiserror::Error;

/// High-level outcome of parsing one input line.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Submit the decoded intent to the runtime.
    Submit(Intent),
    /// Attack `target`, or the first enemy still standing.
    Attack {
        kind: AttackKind,
        target: Option<EnemyId>,
    },
    /// Describe the current zone and its cards.
    Look,
    /// Player stats, credits and inventory.
    Status,
    /// Re-read the content directory and hot-swap the configuration.
    Reload,
    /// Abandon the current game and start over.
    NewGame,
    Help,
    Quit,
    /// Blank line.
    None,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{0}' needs {1}")]
    MissingArgument(&'static str, &'static str),

    #[error("unknown place '{0}'")]
    UnknownZone(String),

    #[error("unknown item '{0}'")]
    UnknownItem(String),

    #[error("unknown enemy '{0}'")]
    UnknownEnemy(String),
}

pub const HELP: &str = "\
commands:
  look | l                  describe where you are
  status | s                stats, credits and inventory
  go <place>                walk to a neighboring place
  bus <street>              ride the bus (costs the fare)
  attack [enemy]            melee attack (alias: hit, a)
  shoot [enemy]             ranged attack
  flee                      run from the fight
  buy <item> | sell <item>  trade with a merchant
  equip <weapon>            equip or unequip a bat or sword
  use <item>                use a stim pack
  heal                      pay the doctor for a full heal
  reload                    reload game content from disk
  new                       start a new game
  quit | q                  save and exit";

/// Parse a single line of player input.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::None);
    };
    let argument = words.next();

    let command = match verb.to_ascii_lowercase().as_str() {
        "look" | "l" => Command::Look,
        "status" | "s" | "stats" => Command::Status,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "reload" => Command::Reload,
        "new" => Command::NewGame,
        "attack" | "hit" | "a" => Command::Attack {
            kind: AttackKind::Melee,
            target: argument.map(parse_enemy).transpose()?,
        },
        "shoot" => Command::Attack {
            kind: AttackKind::Ranged,
            target: argument.map(parse_enemy).transpose()?,
        },
        "flee" | "run" => Command::Submit(Intent::flee()),
        "heal" => Command::Submit(Intent::heal_at_hospital()),
        "go" | "travel" => {
            let zone = require(argument, "go", "a place")?;
            Command::Submit(Intent::travel(parse_zone(zone)?))
        }
        "bus" => {
            let zone = require(argument, "bus", "a street")?;
            Command::Submit(Intent::pay_fare(parse_zone(zone)?))
        }
        "buy" => Command::Submit(Intent::buy(parse_item(require(argument, "buy", "an item")?)?)),
        "sell" => Command::Submit(Intent::sell(parse_item(require(argument, "sell", "an item")?)?)),
        "equip" => {
            let item = require(argument, "equip", "a weapon")?;
            Command::Submit(Intent::equip(parse_item(item)?))
        }
        "use" => {
            let item = require(argument, "use", "an item")?;
            Command::Submit(Intent::use_consumable(parse_item(item)?))
        }
        other => return Err(ParseError::UnknownCommand(other.to_owned())),
    };
    Ok(command)
}

fn require<'a>(
    argument: Option<&'a str>,
    verb: &'static str,
    what: &'static str,
) -> Result<&'a str, ParseError> {
    argument.ok_or(ParseError::MissingArgument(verb, what))
}

/// Accepts kebab-case zone ids; underscores work too.
pub fn parse_zone(raw: &str) -> Result<ZoneId, ParseError> {
    let normalized = raw.to_ascii_lowercase().replace('_', "-");
    ZoneId::from_str(&normalized).map_err(|_| ParseError::UnknownZone(raw.to_owned()))
}

pub fn parse_item(raw: &str) -> Result<ItemKind, ParseError> {
    match raw.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
        "bat" => Ok(ItemKind::Bat),
        "sword" => Ok(ItemKind::Sword),
        "stim" | "stimpack" => Ok(ItemKind::StimPack),
        _ => Err(ParseError::UnknownItem(raw.to_owned())),
    }
}

fn parse_enemy(raw: &str) -> Result<EnemyId, ParseError> {
    EnemyId::from_str(&raw.to_ascii_lowercase())
        .map_err(|_| ParseError::UnknownEnemy(raw.to_owned()))
}
