//! Minimal text grammar for provider output.
//!
//! Only the first non-blank line is read, case-insensitively. Within it the
//! parser looks for either a `CHALLENGE` word or a `BID <int> <int>` token
//! sequence; surrounding words are ignored, so `Player 1: BID 3 4 for three
//! 4's` is a bid. When a line holds both, whichever comes first wins. A line
//! with neither is a parse failure. Numbers are not range checked here; that
//! is a legality concern.

use std::str::FromStr;

use lazy_regex::regex;

use super::action::Action;
use crate::errors::domain::DomainError;

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = first_line(s);
        let challenge_at = regex!(r"\bCHALLENGE\b"i).find(line).map(|m| m.start());
        let bid = regex!(r"\bBID\s+(\d+)\s+(\d+)\b"i)
            .captures(line)
            .and_then(|c| Some((c.get(0)?.start(), c.get(1)?.as_str(), c.get(2)?.as_str())));

        match (challenge_at, bid) {
            (Some(at), Some((bid_at, _, _))) if at < bid_at => Ok(Action::Challenge),
            (Some(_), None) => Ok(Action::Challenge),
            (_, Some((_, quantity, face))) => parse_bid(quantity, face),
            (None, None) => Err(DomainError::parse(format!("unrecognised action: {line:?}"))),
        }
    }
}

fn parse_bid(quantity: &str, face: &str) -> Result<Action, DomainError> {
    let quantity = quantity
        .parse::<u32>()
        .map_err(|e| DomainError::parse(format!("bad quantity {quantity:?}: {e}")))?;
    let face = face
        .parse::<u8>()
        .map_err(|e| DomainError::parse(format!("bad face {face:?}: {e}")))?;
    Ok(Action::bid(quantity, face))
}

/// First line of `text` after skipping leading blank lines, trimmed.
pub fn first_line(text: &str) -> &str {
    text.trim_start().lines().next().unwrap_or("").trim()
}
