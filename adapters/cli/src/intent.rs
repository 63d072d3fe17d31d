//! Line-oriented player intents.

use ghost_catcher_core::Position;
use thiserror::Error;

/// One line of shell input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Intent {
    Start,
    Place(Position),
    Pause,
    Resume,
    Retry,
    Reset,
    Advance,
    Menu,
    Show,
    Difficulty(u32),
    Quit,
}

/// Reasons a line could not be understood.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum IntentError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    Arity {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{value}` is not a valid {what}")]
    InvalidNumber { what: &'static str, value: String },
}

/// Parses a line, returning `None` for blank lines and `#` comments.
pub(crate) fn parse_line(line: &str) -> Result<Option<Intent>, IntentError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let arguments: Vec<&str> = words.collect();

    let intent = match command.to_ascii_lowercase().as_str() {
        "place" => match arguments.as_slice() {
            [column, row] => Intent::Place(Position::new(
                parse_number(column, "column")?,
                parse_number(row, "row")?,
            )),
            _ => {
                return Err(IntentError::Arity {
                    command: "place",
                    expected: "<column> <row>",
                })
            }
        },
        "difficulty" => match arguments.as_slice() {
            [level] => Intent::Difficulty(parse_number(level, "level")?),
            _ => {
                return Err(IntentError::Arity {
                    command: "difficulty",
                    expected: "<level>",
                })
            }
        },
        other => {
            let intent = match other {
                "start" => Intent::Start,
                "pause" => Intent::Pause,
                "resume" => Intent::Resume,
                "retry" => Intent::Retry,
                "reset" => Intent::Reset,
                "advance" => Intent::Advance,
                "menu" => Intent::Menu,
                "show" => Intent::Show,
                "quit" | "exit" => Intent::Quit,
                _ => return Err(IntentError::Unknown(command.to_owned())),
            };
            if !arguments.is_empty() {
                return Err(IntentError::Arity {
                    command: keyword(intent),
                    expected: "no arguments",
                });
            }
            intent
        }
    };

    Ok(Some(intent))
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &'static str) -> Result<T, IntentError> {
    value.parse().map_err(|_| IntentError::InvalidNumber {
        what,
        value: value.to_owned(),
    })
}

fn keyword(intent: Intent) -> &'static str {
    match intent {
        Intent::Start => "start",
        Intent::Place(_) => "place",
        Intent::Pause => "pause",
        Intent::Resume => "resume",
        Intent::Retry => "retry",
        Intent::Reset => "reset",
        Intent::Advance => "advance",
        Intent::Menu => "menu",
        Intent::Show => "show",
        Intent::Difficulty(_) => "difficulty",
        Intent::Quit => "quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# herd the ghost west"), Ok(None));
    }

    #[test]
    fn keywords_map_to_intents() {
        assert_eq!(parse_line("start"), Ok(Some(Intent::Start)));
        assert_eq!(parse_line("  RESET "), Ok(Some(Intent::Reset)));
        assert_eq!(parse_line("menu"), Ok(Some(Intent::Menu)));
        assert_eq!(parse_line("exit"), Ok(Some(Intent::Quit)));
    }

    #[test]
    fn place_reads_signed_coordinates() {
        assert_eq!(
            parse_line("place 4 17"),
            Ok(Some(Intent::Place(Position::new(4, 17))))
        );
        assert_eq!(
            parse_line("place -1 3"),
            Ok(Some(Intent::Place(Position::new(-1, 3))))
        );
    }

    #[test]
    fn malformed_lines_are_reported() {
        assert_eq!(
            parse_line("jump"),
            Err(IntentError::Unknown("jump".to_owned()))
        );
        assert!(matches!(
            parse_line("place 3"),
            Err(IntentError::Arity { command: "place", .. })
        ));
        assert!(matches!(
            parse_line("place x 3"),
            Err(IntentError::InvalidNumber { what: "column", .. })
        ));
        assert!(matches!(
            parse_line("difficulty -2"),
            Err(IntentError::InvalidNumber { what: "level", .. })
        ));
        assert!(matches!(
            parse_line("pause now"),
            Err(IntentError::Arity { command: "pause", .. })
        ));
    }

    #[test]
    fn difficulty_reads_a_level() {
        assert_eq!(parse_line("difficulty 61"), Ok(Some(Intent::Difficulty(61))));
    }
}
