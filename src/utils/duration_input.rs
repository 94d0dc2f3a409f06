//! Duration input validation
//!
//! Everything a user types or posts is checked here, so the engine only ever
//! sees a positive millisecond count.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// A countdown duration as entered by a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationInput {
    #[serde(default)]
    pub hours: u64,
    #[serde(default)]
    pub minutes: u64,
    #[serde(default)]
    pub seconds: u64,
}

impl DurationInput {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Total duration in milliseconds; zero and overflowing values are rejected
    pub fn total_ms(&self) -> Result<i64, InputError> {
        let seconds = self
            .hours
            .checked_mul(3600)
            .and_then(|h| self.minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(self.seconds))
            .ok_or(InputError::TooLarge)?;

        let ms = seconds.checked_mul(1000).ok_or(InputError::TooLarge)?;
        if ms == 0 {
            return Err(InputError::Zero);
        }
        i64::try_from(ms).map_err(|_| InputError::TooLarge)
    }
}

impl FromStr for DurationInput {
    type Err = InputError;

    /// Accepts `H:MM:SS`, `MM:SS`, unit form (`1h30m`, `45s`) or bare seconds
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InputError::Empty);
        }

        let input = if s.contains(':') {
            parse_clock_form(s)?
        } else if s.chars().all(|c| c.is_ascii_digit()) {
            DurationInput::new(0, 0, parse_number(s, s)?)
        } else {
            parse_unit_form(s)?
        };

        // Surface zero/overflow at parse time so clap reports it with the argument
        input.total_ms()?;
        Ok(input)
    }
}

fn parse_number(part: &str, whole: &str) -> Result<u64, InputError> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::Unparsable(whole.to_string()));
    }
    part.parse::<u64>().map_err(|_| InputError::TooLarge)
}

fn parse_clock_form(s: &str) -> Result<DurationInput, InputError> {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [m, sec] => Ok(DurationInput::new(0, parse_number(m, s)?, parse_number(sec, s)?)),
        [h, m, sec] => Ok(DurationInput::new(
            parse_number(h, s)?,
            parse_number(m, s)?,
            parse_number(sec, s)?,
        )),
        _ => Err(InputError::Unparsable(s.to_string())),
    }
}

fn parse_unit_form(s: &str) -> Result<DurationInput, InputError> {
    let mut input = DurationInput::default();
    let mut digits = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if c.is_whitespace() && digits.is_empty() {
            continue;
        }

        let value = parse_number(&digits, s)?;
        let slot = match c.to_ascii_lowercase() {
            'h' => &mut input.hours,
            'm' => &mut input.minutes,
            's' => &mut input.seconds,
            _ => return Err(InputError::Unparsable(s.to_string())),
        };
        *slot = slot.checked_add(value).ok_or(InputError::TooLarge)?;
        digits.clear();
    }

    if !digits.is_empty() {
        return Err(InputError::Unparsable(s.to_string()));
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_supported_forms() {
        assert_eq!("90".parse::<DurationInput>(), Ok(DurationInput::new(0, 0, 90)));
        assert_eq!("5:00".parse::<DurationInput>(), Ok(DurationInput::new(0, 5, 0)));
        assert_eq!("1:02:03".parse::<DurationInput>(), Ok(DurationInput::new(1, 2, 3)));
        assert_eq!("1h30m".parse::<DurationInput>(), Ok(DurationInput::new(1, 30, 0)));
        assert_eq!("2M 15S".parse::<DurationInput>(), Ok(DurationInput::new(0, 2, 15)));
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!("".parse::<DurationInput>(), Err(InputError::Empty));
        assert!(matches!("1h30".parse::<DurationInput>(), Err(InputError::Unparsable(_))));
        assert!(matches!("ten".parse::<DurationInput>(), Err(InputError::Unparsable(_))));
        assert!(matches!("1:2:3:4".parse::<DurationInput>(), Err(InputError::Unparsable(_))));
        assert!(matches!("-5".parse::<DurationInput>(), Err(InputError::Unparsable(_))));
    }

    #[test]
    fn rejects_zero_duration() {
        assert_eq!("0".parse::<DurationInput>(), Err(InputError::Zero));
        assert_eq!("00:00".parse::<DurationInput>(), Err(InputError::Zero));
        assert_eq!(DurationInput::default().total_ms(), Err(InputError::Zero));
    }

    #[test]
    fn total_ms_combines_fields() {
        assert_eq!(DurationInput::new(1, 1, 1).total_ms(), Ok(3_661_000));
        assert_eq!(DurationInput::new(0, 0, 90).total_ms(), Ok(90_000));
    }

    #[test]
    fn total_ms_rejects_overflow() {
        assert_eq!(DurationInput::new(u64::MAX, 0, 0).total_ms(), Err(InputError::TooLarge));
        assert_eq!(DurationInput::new(0, 0, u64::MAX / 10).total_ms(), Err(InputError::TooLarge));
    }
}
