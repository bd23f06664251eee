//! Parsing of the line-oriented text protocol. Each line holds a single command
//! followed by its arguments, separated by whitespace.

use crate::turn::Policy;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    /// `position startpos` (`notation` is `None`) or `position <notation>`.
    SetPosition {
        notation: Option<String>,
    },
    /// `squares <marker> ... <marker>`: the board as 64 rendered markers in
    /// row-major order.
    SetSquares {
        markers: Vec<String>,
    },
    Moves,
    /// `next <landing>`: continuation of a capture chain.
    Next {
        landing: String,
    },
    Forward,
    Fingerprint,
    Play {
        policy: Policy,
    },
    Restart,
    Display,
    Quit,
    Unknown(String),
}

fn parse_position(parts: &[&str]) -> Command {
    match parts {
        [_, "startpos"] => Command::SetPosition { notation: None },
        [_, notation] => Command::SetPosition {
            notation: Some((*notation).to_string()),
        },
        _ => Command::Unknown(parts.join(" ")),
    }
}

fn parse_play(parts: &[&str]) -> Command {
    match parts {
        [_] => Command::Play {
            policy: Policy::default(),
        },
        [_, policy] => Policy::try_from(*policy).map_or_else(
            |_| Command::Unknown(parts.join(" ")),
            |policy| Command::Play { policy },
        ),
        _ => Command::Unknown(parts.join(" ")),
    }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() {
            return Self::Unknown(input.trim().to_string());
        }

        match parts[0] {
            "position" => parse_position(&parts),
            "squares" => Self::SetSquares {
                markers: parts[1..].iter().map(|s| (*s).to_string()).collect(),
            },
            "moves" => Self::Moves,
            "next" if parts.len() == 2 => Self::Next {
                landing: parts[1].to_string(),
            },
            "forward" => Self::Forward,
            "fingerprint" => Self::Fingerprint,
            "play" => parse_play(&parts),
            "restart" => Self::Restart,
            "d" => Self::Display,
            "quit" => Self::Quit,
            _ => Self::Unknown(input.trim().to_string()),
        }
    }
}
