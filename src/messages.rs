//! User-facing response texts.
//!
//! The scoreboard front end is Georgian, so [`Locale::Georgian`] is the
//! default. English is available via `MESSAGE_LOCALE=en`.

use std::str::FromStr;

use crate::domain::RoundNumber;
use crate::error::LedgerError;

/// Language for success and failure messages returned by `POST /round`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Georgian (`ka`).
    #[default]
    Georgian,
    /// English (`en`).
    English,
}

impl Locale {
    /// Message for a round stored for the first time.
    #[must_use]
    pub fn round_created(self, round: RoundNumber) -> String {
        match self {
            Self::Georgian => format!("ტური {round} წარმატებით დაემატა"),
            Self::English => format!("Round {round} added successfully"),
        }
    }

    /// Message for a round whose scores were replaced.
    #[must_use]
    pub fn round_updated(self, round: RoundNumber) -> String {
        match self {
            Self::Georgian => format!("ტური {round} წარმატებით განახლდა"),
            Self::English => format!("Round {round} updated successfully"),
        }
    }

    /// Headline for a failed write.
    #[must_use]
    pub const fn write_failed(self) -> &'static str {
        match self {
            Self::Georgian => "შეცდომა",
            Self::English => "Error",
        }
    }
}

impl FromStr for Locale {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ka" | "ka-ge" | "georgian" => Ok(Self::Georgian),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::English),
            other => Err(LedgerError::Config(format!("unsupported locale: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn georgian_is_default() {
        assert_eq!(Locale::default(), Locale::Georgian);
        assert_eq!(
            Locale::default().round_created(RoundNumber::new(3)),
            "ტური 3 წარმატებით დაემატა"
        );
        assert_eq!(
            Locale::default().round_updated(RoundNumber::new(3)),
            "ტური 3 წარმატებით განახლდა"
        );
    }

    #[test]
    fn parses_locale_codes() {
        assert_eq!("EN".parse::<Locale>().ok(), Some(Locale::English));
        assert_eq!("ka".parse::<Locale>().ok(), Some(Locale::Georgian));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn english_texts() {
        let en = Locale::English;
        assert_eq!(en.round_created(RoundNumber::new(1)), "Round 1 added successfully");
        assert_eq!(en.write_failed(), "Error");
    }
}
