//! Player roster files.
//!
//! A roster is CSV with one `name,figure` row per player:
//!
//! ```text
//! # Friday night
//! name,figure
//! Alice,hat
//! Bob,car
//! ```
//!
//! The header row and `#` comments are optional. Players get ids in file
//! order, starting at 0.

use std::path::Path;

use crate::core::{Figure, Player, PlayerId, UnknownFigure};

use super::error::{RepositoryError, Result};

/// Parse roster CSV into unplaced players.
pub fn parse_roster(input: &str) -> Result<Vec<Player>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut players = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);

        if record.len() != 2 {
            return Err(RepositoryError::Roster {
                line,
                reason: format!("expected 2 fields, found {}", record.len()),
            });
        }
        let (name, figure) = (&record[0], &record[1]);

        if players.is_empty() && is_header(name, figure) {
            continue;
        }
        if name.is_empty() {
            return Err(RepositoryError::Roster {
                line,
                reason: "empty player name".to_string(),
            });
        }
        let figure: Figure = figure.parse().map_err(|e: UnknownFigure| {
            RepositoryError::Roster {
                line,
                reason: e.to_string(),
            }
        })?;
        let id = u8::try_from(players.len()).map_err(|_| RepositoryError::Roster {
            line,
            reason: "too many players".to_string(),
        })?;

        players.push(Player::new(PlayerId::new(id), name, figure));
    }

    tracing::debug!(players = players.len(), "parsed roster");
    Ok(players)
}

/// Read and parse a roster file.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Player>> {
    let input = std::fs::read_to_string(path)?;
    parse_roster(&input)
}

fn is_header(name: &str, figure: &str) -> bool {
    name.eq_ignore_ascii_case("name") && figure.eq_ignore_ascii_case("figure")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_header_and_comments() {
        let players = parse_roster("# league night\nname,figure\nAlice, hat\n\nBob,Car\n").unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name(), "Alice");
        assert_eq!(players[0].figure(), Figure::Hat);
        assert_eq!(players[1].id(), PlayerId::new(1));
        assert_eq!(players[1].figure(), Figure::Car);
        assert_eq!(players[1].position(), None);
    }

    #[test]
    fn test_parse_without_header() {
        let players = parse_roster("Cleo,ship").unwrap();
        assert_eq!(players[0].id(), PlayerId::new(0));
    }

    #[test]
    fn test_unknown_figure() {
        let err = parse_roster("name,figure\nAlice,hat\nBob,meeple\n").unwrap_err();
        match err {
            RepositoryError::Roster { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("meeple"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(matches!(
            parse_roster("Alice,hat,extra"),
            Err(RepositoryError::Roster { line: 1, .. })
        ));
    }

    #[test]
    fn test_load_roster_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.csv");
        std::fs::write(&path, "Dana,dog\nEli,boot\n").unwrap();

        let players = load_roster(&path).unwrap();
        assert_eq!(players.len(), 2);
        assert!(matches!(load_roster(dir.path().join("missing.csv")), Err(RepositoryError::Io(_))));
    }
}
