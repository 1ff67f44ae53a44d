//! # Session Scripts
//!
//! One checkout session driven from text, one step per line.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  toggle <item>     pick or un-pick an item (clears the selection)      │
//! │  add <item>        add an item             (clears the selection)      │
//! │  remove <item>     remove an item          (clears the selection)      │
//! │  clear             empty cart and selection                            │
//! │  cart              show the cart                                       │
//! │  select <promo>    choose a promotion, one per group                   │
//! │  deselect <promo>  drop a promotion                                    │
//! │  promos            list promotions with their flags                    │
//! │  quote             price the cart                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("Unknown step: {0}")]
    Unknown(String),

    #[error("`{0}` needs an id")]
    MissingId(&'static str),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Unexpected input after step: {0}")]
    Trailing(String),
}

/// One session action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Toggle(u32),
    Add(u32),
    Remove(u32),
    Clear,
    Cart,
    Select(u32),
    Deselect(u32),
    Promos,
    Quote,
}

impl Step {
    /// Parses one script line. `Ok(None)` for blanks and comments.
    pub fn parse_line(line: &str) -> Result<Option<Step>, StepError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default();

        let step = match name.to_lowercase().as_str() {
            "toggle" => Step::Toggle(id_arg("toggle", words.next())?),
            "add" => Step::Add(id_arg("add", words.next())?),
            "remove" => Step::Remove(id_arg("remove", words.next())?),
            "select" => Step::Select(id_arg("select", words.next())?),
            "deselect" => Step::Deselect(id_arg("deselect", words.next())?),
            "clear" => Step::Clear,
            "cart" => Step::Cart,
            "promos" => Step::Promos,
            "quote" => Step::Quote,
            _ => return Err(StepError::Unknown(name.to_string())),
        };

        match words.next() {
            Some(extra) => Err(StepError::Trailing(extra.to_string())),
            None => Ok(step),
        }
    }
}

fn id_arg(step: &'static str, word: Option<&str>) -> Result<u32, StepError> {
    let word = word.ok_or(StepError::MissingId(step))?;
    word.parse()
        .map_err(|_| StepError::InvalidId(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        assert_eq!(Step::parse_line("toggle 3"), Ok(Some(Step::Toggle(3))));
        assert_eq!(Step::parse_line("  Select 2 "), Ok(Some(Step::Select(2))));
        assert_eq!(Step::parse_line("quote"), Ok(Some(Step::Quote)));
        assert_eq!(Step::parse_line("deselect 5"), Ok(Some(Step::Deselect(5))));
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        assert_eq!(Step::parse_line(""), Ok(None));
        assert_eq!(Step::parse_line("   "), Ok(None));
        assert_eq!(Step::parse_line("# build the cart"), Ok(None));
    }

    #[test]
    fn test_malformed_steps() {
        assert_eq!(
            Step::parse_line("checkout"),
            Err(StepError::Unknown("checkout".into()))
        );
        assert_eq!(Step::parse_line("add"), Err(StepError::MissingId("add")));
        assert_eq!(
            Step::parse_line("remove -1"),
            Err(StepError::InvalidId("-1".into()))
        );
        assert_eq!(
            Step::parse_line("quote now"),
            Err(StepError::Trailing("now".into()))
        );
    }
}
