use circular_seekbar::{CircularSeekBar, ScrollMode};
use std::str::FromStr;
use std::time::Instant;
use strum::EnumString;
use thiserror::Error;

/// A setter sent over the control socket, one per line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Progress(i32),
    Animate(i32),
    Min(i32),
    Max(i32),
    Start(f64),
    Sweep(f64),
    Mode(ScrollMode),
    TouchInside(bool),
    Enabled(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
enum Keyword {
    Progress,
    Animate,
    Min,
    Max,
    Start,
    Sweep,
    Mode,
    TouchInside,
    Enabled,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Command '{0}' needs a value")]
    MissingValue(String),
    #[error("Unexpected trailing input '{0}'")]
    Trailing(String),
    #[error("Invalid value '{value}' for '{keyword}'")]
    InvalidValue { keyword: String, value: String },
}

fn value<T: FromStr>(keyword: &str, raw: &str) -> Result<T, CommandParseError> {
    raw.parse().map_err(|_| CommandParseError::InvalidValue {
        keyword: keyword.to_string(),
        value: raw.to_string(),
    })
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let word = words.next().ok_or(CommandParseError::Empty)?;
        let keyword =
            Keyword::from_str(word).map_err(|_| CommandParseError::Unknown(word.to_string()))?;
        let raw = words
            .next()
            .ok_or_else(|| CommandParseError::MissingValue(word.to_string()))?;
        let rest: Vec<&str> = words.collect();
        if !rest.is_empty() {
            return Err(CommandParseError::Trailing(rest.join(" ")));
        }

        Ok(match keyword {
            Keyword::Progress => Command::Progress(value(word, raw)?),
            Keyword::Animate => Command::Animate(value(word, raw)?),
            Keyword::Min => Command::Min(value(word, raw)?),
            Keyword::Max => Command::Max(value(word, raw)?),
            Keyword::Start => Command::Start(value(word, raw)?),
            Keyword::Sweep => Command::Sweep(value(word, raw)?),
            Keyword::Mode => Command::Mode(value(word, raw)?),
            Keyword::TouchInside => Command::TouchInside(value(word, raw)?),
            Keyword::Enabled => Command::Enabled(value(word, raw)?),
        })
    }
}

impl Command {
    pub fn apply(self, bar: &mut CircularSeekBar, now: Instant) {
        match self {
            Command::Progress(p) => bar.set_progress(p),
            Command::Animate(p) => bar.set_progress_animated(p, now),
            Command::Min(min) => bar.set_min(min),
            Command::Max(max) => bar.set_max(max),
            Command::Start(angle) => bar.set_start_angle(angle),
            Command::Sweep(angle) => bar.set_sweep_angle(angle),
            Command::Mode(mode) => bar.set_scroll_mode(mode, now),
            Command::TouchInside(inside) => bar.set_touch_inside(inside),
            Command::Enabled(enabled) => bar.set_enabled(enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circular_seekbar::{SeekBarConfig, Theme};

    #[test]
    fn test_parse_commands() {
        let cases = vec![
            ("progress 42", Command::Progress(42)),
            ("  animate   -3 ", Command::Animate(-3)),
            ("MIN 5", Command::Min(5)),
            ("max 200", Command::Max(200)),
            ("start 135", Command::Start(135.0)),
            ("sweep 270.5", Command::Sweep(270.5)),
            ("mode Gravity", Command::Mode(ScrollMode::Gravity)),
            ("mode 2", Command::Mode(ScrollMode::Snap)),
            ("touch-inside false", Command::TouchInside(false)),
            ("enabled true", Command::Enabled(true)),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>(), Ok(expected), "{}", line);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandParseError::Empty));
        assert_eq!(
            "show".parse::<Command>(),
            Err(CommandParseError::Unknown("show".to_string()))
        );
        assert_eq!(
            "progress".parse::<Command>(),
            Err(CommandParseError::MissingValue("progress".to_string()))
        );
        assert_eq!(
            "progress 1 2".parse::<Command>(),
            Err(CommandParseError::Trailing("2".to_string()))
        );
        assert!(matches!(
            "mode spring".parse::<Command>(),
            Err(CommandParseError::InvalidValue { .. })
        ));
        assert!("enabled yes".parse::<Command>().is_err());
    }

    #[test]
    fn test_apply_setters() {
        let now = Instant::now();
        let mut bar = CircularSeekBar::new(&SeekBarConfig::default(), &Theme::default(), 1.0);

        Command::Max(50).apply(&mut bar, now);
        Command::Progress(80).apply(&mut bar, now);
        assert_eq!(bar.max(), 50);
        assert_eq!(bar.progress(), 50);

        Command::Min(60).apply(&mut bar, now);
        assert_eq!(bar.min(), 50);

        Command::Start(-90.0).apply(&mut bar, now);
        assert_eq!(bar.start_angle(), 270.0);

        Command::Mode(ScrollMode::Snap).apply(&mut bar, now);
        assert_eq!(bar.scroll_mode(), ScrollMode::Snap);

        Command::Enabled(false).apply(&mut bar, now);
        Command::TouchInside(false).apply(&mut bar, now);
        assert!(!bar.is_enabled());
        assert!(!bar.has_touch_inside());
    }
}
