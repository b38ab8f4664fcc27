//! Scraping of human-readable command output into structured results.
//!
//! The upstream console speaks prose, not a machine format; these parsers
//! pull the structured fields back out. A reply that does not look like
//! what the command should print is reported as a command failure, since
//! the round trip itself succeeded.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RconError, Result};
use crate::gateway::models::{PlayerInfo, PlayersInfo, UptimeResponse};

static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+hours?").expect("hours pattern"));
static MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+minutes?").expect("minutes pattern"));
static SECONDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+seconds?").expect("seconds pattern"));

/// Parse `/players` output.
///
/// Expected shape: a header line `Players (N):` followed by one indented
/// line per player, with `(online)` appended for connected players.
pub fn players(raw: &str) -> Result<PlayersInfo> {
    let mut lines = raw.lines();
    let header = lines
        .next()
        .ok_or_else(|| RconError::Command("empty player list reply".to_string()))?;

    let count = header
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .and_then(|(count, _)| count.parse::<usize>().ok())
        .ok_or_else(|| {
            RconError::Command(format!("unrecognized player list header: {header:?}"))
        })?;

    let mut players = std::collections::BTreeMap::new();
    for line in lines {
        if let Some(player) = roster_line(line) {
            players.insert(player.name.clone(), player);
        }
    }

    Ok(PlayersInfo { count, players })
}

/// Parse `/admins` output: one line per admin, same shape as the player
/// roster but without a header.
pub fn admins(raw: &str) -> Vec<PlayerInfo> {
    raw.lines().filter_map(roster_line).collect()
}

fn roster_line(line: &str) -> Option<PlayerInfo> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?.to_string();
    let online = line.contains("(online)");
    Some(PlayerInfo { name, online })
}

/// Parse `/seed` output as an integer.
pub fn seed(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| RconError::Command(format!("seed reply is not an integer: {:?}", raw.trim())))
}

/// Parse `/time` output into hour/minute/second components.
///
/// The server phrases uptime as prose ("5 hours and 3 minutes", "1
/// second"); each unit is extracted independently and absent units stay
/// `None`.
pub fn uptime(raw: &str) -> UptimeResponse {
    let capture = |re: &Regex| {
        re.captures(raw)
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
    };

    UptimeResponse {
        hours: capture(&HOURS_RE),
        minutes: capture(&MINUTES_RE),
        seconds: capture(&SECONDS_RE),
    }
}

/// Parse `/save` output, returning the saved map filename.
///
/// A successful save reply starts with `Saving map` and ends with the
/// target filename; anything else means the save did not happen.
pub fn save_result(raw: &str) -> Result<String> {
    let reply = raw.trim();
    if !reply.starts_with("Saving map") {
        return Err(RconError::Command(format!(
            "unexpected save reply: {reply:?}"
        )));
    }
    reply
        .split_whitespace()
        .last()
        .map(str::to_string)
        .ok_or_else(|| RconError::Command("save reply names no file".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_roster() {
        let raw = "Players (2):\n  alice (online)\n  bob\n";
        let info = players(raw).expect("parse");
        assert_eq!(info.count, 2);
        assert!(info.players["alice"].online);
        assert!(!info.players["bob"].online);
    }

    #[test]
    fn players_empty_roster() {
        let info = players("Players (0):\n").expect("parse");
        assert_eq!(info.count, 0);
        assert!(info.players.is_empty());
    }

    #[test]
    fn players_malformed_header_is_command_error() {
        assert!(matches!(
            players("no such command"),
            Err(RconError::Command(_))
        ));
        assert!(matches!(players(""), Err(RconError::Command(_))));
    }

    #[test]
    fn admins_listing() {
        let list = admins("carol (online)\ndave\n\n");
        assert_eq!(
            list,
            vec![
                PlayerInfo {
                    name: "carol".to_string(),
                    online: true
                },
                PlayerInfo {
                    name: "dave".to_string(),
                    online: false
                },
            ]
        );
    }

    #[test]
    fn seed_parses_integer() {
        assert_eq!(seed(" 3735928559 \n").expect("parse"), 3735928559);
        assert!(matches!(seed("unknown"), Err(RconError::Command(_))));
    }

    #[test]
    fn uptime_units_extracted_independently() {
        let parsed = uptime("5 hours and 1 minute");
        assert_eq!(parsed.hours, Some(5));
        assert_eq!(parsed.minutes, Some(1));
        assert_eq!(parsed.seconds, None);

        let parsed = uptime("42 seconds");
        assert_eq!(
            parsed,
            UptimeResponse {
                hours: None,
                minutes: None,
                seconds: Some(42),
            }
        );
    }

    #[test]
    fn save_reply_yields_filename() {
        assert_eq!(
            save_result("Saving map as _autosave1.zip\n").expect("parse"),
            "_autosave1.zip"
        );
        assert!(matches!(
            save_result("Cannot save right now"),
            Err(RconError::Command(_))
        ));
    }
}
