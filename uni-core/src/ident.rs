//! Classification and expansion of `print` identifiers.
//!
//! A token is classified into exactly one [`Ident`] shape, checked in
//! this order:
//!
//!   all  ->  category name  ->  block name  ->  literal  ->  codepoint / range
//!
//! A literal is any single character, so `a` names U+0061 rather than the
//! hex value 0xA. Anything left over is [`Ident::Invalid`].

use tracing::debug;

use crate::category::{GeneralCategory, canonicalize, find_category};
use crate::codepoint::{Block, Codepoint};
use crate::error::CoreError;
use crate::repository::Repository;

/// The shape of a single identifier token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ident<'a> {
    /// `all`: every record in the repository.
    All,
    /// A general category by any of its spellings.
    Category(GeneralCategory),
    /// A named block.
    Block(&'a Block),
    /// `U+2042`, `2042`, `U+2042..U+2050`; bounds are inclusive.
    Range { start: u64, end: u64 },
    /// A single literal character such as `⁂`.
    Literal(char),
    /// A hex value too wide for `u64`; holds its significant digits.
    Unrepresentable(String),
    Invalid,
}

impl<'a> Ident<'a> {
    pub fn classify(repo: &'a Repository, token: &str) -> Ident<'a> {
        let canon = canonicalize(token);

        if canon == "all" {
            return Ident::All;
        }
        if let Some(category) = find_category(&canon) {
            return Ident::Category(category);
        }
        if let Some(block) = repo.block(&canon) {
            return Ident::Block(block);
        }
        let mut chars = token.trim().chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ident::Literal(c);
        }
        if is_numeric_shape(&canon) {
            return parse_range(&canon).unwrap_or(Ident::Invalid);
        }
        Ident::Invalid
    }
}

/// Resolve one token into the records it names.
///
/// Blocks skip unassigned codepoints silently; an explicit numeric range
/// fails on the first unassigned value instead.
pub fn resolve<'a>(repo: &'a Repository, token: &str) -> Result<Vec<&'a Codepoint>, CoreError> {
    let ident = Ident::classify(repo, token);
    debug!(token, ?ident, "classified identifier");

    match ident {
        Ident::All => Ok(repo.codepoints().iter().collect()),
        Ident::Category(category) => Ok(repo.by_category(category).collect()),
        Ident::Block(block) => Ok(repo.range(block.start, block.end).iter().collect()),
        Ident::Range { start, end } => (start..=end)
            .map(|code| lookup(repo, code))
            .collect(),
        Ident::Literal(c) => lookup(repo, u64::from(c)).map(|record| vec![record]),
        Ident::Unrepresentable(hex) => Err(CoreError::UnknownCodepoint { hex }),
        Ident::Invalid => Err(CoreError::parse(token)),
    }
}

fn lookup(repo: &Repository, code: u64) -> Result<&Codepoint, CoreError> {
    u32::try_from(code)
        .ok()
        .and_then(|code| repo.find(code))
        .ok_or_else(|| CoreError::unknown_codepoint(code))
}

/// `u`-prefixed, containing `..`, or made only of hex digits.
fn is_numeric_shape(canon: &str) -> bool {
    canon.starts_with('u')
        || canon.contains("..")
        || (!canon.is_empty() && canon.chars().all(|c| c.is_ascii_hexdigit()))
}

enum Hex {
    Value(u64),
    Overflow(String),
}

fn parse_range<'a>(canon: &str) -> Option<Ident<'a>> {
    let mut halves = canon.split("..");
    let start = parse_hex(halves.next()?)?;
    let end = match halves.next() {
        Some(half) => Some(parse_hex(half)?),
        None => None,
    };
    if halves.next().is_some() {
        return None;
    }

    Some(match (start, end) {
        (Hex::Overflow(hex), _) => Ident::Unrepresentable(hex),
        (Hex::Value(start), None) => Ident::Range { start, end: start },
        (Hex::Value(start), Some(Hex::Value(end))) => Ident::Range { start, end },
        // Expansion stops at the first unassigned value, well below any bound.
        (Hex::Value(start), Some(Hex::Overflow(_))) => Ident::Range {
            start,
            end: u64::MAX,
        },
    })
}

fn parse_hex(half: &str) -> Option<Hex> {
    let half = half.strip_prefix('u').unwrap_or(half);
    let half = half.strip_prefix('+').unwrap_or(half);
    if half.is_empty() || !half.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(match u64::from_str_radix(half, 16) {
        Ok(value) => Hex::Value(value),
        // Only digits are left, so the value is too large.
        Err(_) => {
            let digits = half.trim_start_matches('0').to_ascii_uppercase();
            Hex::Overflow(format!("{digits:0>4}"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> &'static Repository {
        Repository::bundled().expect("bundled data parses")
    }

    fn codes(records: &[&Codepoint]) -> Vec<u32> {
        records.iter().map(|record| record.code).collect()
    }

    #[test]
    fn classifies_every_shape() {
        let repo = repo();
        assert_eq!(Ident::classify(repo, "ALL"), Ident::All);
        assert_eq!(
            Ident::classify(repo, "Punctuation, Other"),
            Ident::Category(GeneralCategory::OtherPunctuation)
        );
        assert!(matches!(
            Ident::classify(repo, "general_punctuation"),
            Ident::Block(block) if &*block.name == "General Punctuation"
        ));
        assert_eq!(
            Ident::classify(repo, "U+2042..2044"),
            Ident::Range {
                start: 0x2042,
                end: 0x2044
            }
        );
        assert_eq!(Ident::classify(repo, "\u{2042}"), Ident::Literal('\u{2042}'));
        assert_eq!(Ident::classify(repo, "nonsense"), Ident::Invalid);
    }

    #[test]
    fn single_characters_are_literals() {
        let repo = repo();
        for c in ['a', '5', 'u', '!', 'g', '\u{416}'] {
            assert_eq!(Ident::classify(repo, &c.to_string()), Ident::Literal(c), "{c}");
        }
        assert_eq!(codes(&resolve(repo, "a").unwrap()), [0x61]);
        assert_eq!(codes(&resolve(repo, "5").unwrap()), [0x35]);
        assert_eq!(codes(&resolve(repo, "0a").unwrap()), [0x0A]);
    }

    #[test]
    fn names_win_over_hex() {
        // `Cc` and `Cf` are valid hex but name categories first.
        assert_eq!(
            Ident::classify(repo(), "Cc"),
            Ident::Category(GeneralCategory::Control)
        );
        assert_eq!(
            Ident::classify(repo(), "cf"),
            Ident::Category(GeneralCategory::Format)
        );
    }

    #[test]
    fn resolves_range_in_ascending_order() {
        let records = resolve(repo(), "2042..2044").expect("range");
        assert_eq!(codes(&records), [0x2042, 0x2043, 0x2044]);
        assert_eq!(records[0].name, "ASTERISM");
    }

    #[test]
    fn numeric_spellings_are_equivalent() {
        let expected = codes(&resolve(repo(), "U+2042").unwrap());
        for token in ["2042", "u+2042", "U2042", " U+2042 "] {
            assert_eq!(codes(&resolve(repo(), token).unwrap()), expected, "{token}");
        }
        let range = codes(&resolve(repo(), "U+2042..U+2044").unwrap());
        for token in ["2042..2044", "U+2042..2044", "2042..U+2044"] {
            assert_eq!(codes(&resolve(repo(), token).unwrap()), range, "{token}");
        }
    }

    #[test]
    fn category_spellings_are_equivalent() {
        let po = resolve(repo(), "Po").unwrap();
        assert_eq!(po.len(), 605);
        for token in ["po", "OtherPunctuation", "Punctuation, Other", "Punctuation_Other"] {
            assert_eq!(resolve(repo(), token).unwrap(), po, "{token}");
        }
        assert!(po.windows(2).all(|pair| pair[0].code < pair[1].code));
    }

    #[test]
    fn block_skips_unassigned_codepoints() {
        let records = resolve(repo(), "GeneralPunctuation").unwrap();
        assert_eq!(records.len(), 111);
        assert!(records.iter().all(|r| (0x2000..=0x206F).contains(&r.code)));
    }

    #[test]
    fn all_returns_every_record_ascending() {
        let records = resolve(repo(), "all").unwrap();
        assert_eq!(records.len(), repo().codepoints().len());
        assert!(records.windows(2).all(|pair| pair[0].code < pair[1].code));
    }

    #[test]
    fn range_fails_on_first_unassigned_value() {
        let err = resolve(repo(), "0376..037A").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCodepoint { ref hex } if hex == "0378"));
    }

    #[test]
    fn out_of_range_value_is_unknown_codepoint() {
        let err = resolve(repo(), "9999999999").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCodepoint { ref hex } if hex == "9999999999"));
        assert_eq!(err.to_string(), "unknown codepoint: U+9999999999");
        assert_eq!(
            resolve(repo(), "U+110000").unwrap_err().to_string(),
            "unknown codepoint: U+110000"
        );
    }

    #[test]
    fn values_wider_than_u64_are_unknown_codepoints() {
        let err = resolve(repo(), "10000000000000000").unwrap_err();
        assert_eq!(err.to_string(), "unknown codepoint: U+10000000000000000");

        let err = resolve(repo(), "u+000fffffffffffffffff").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCodepoint { ref hex } if hex == "FFFFFFFFFFFFFFFFF"));

        let err = resolve(repo(), "0376..10000000000000000").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCodepoint { ref hex } if hex == "0378"));
    }

    #[test]
    fn malformed_tokens_are_parse_errors() {
        for token in ["", "nonsense", "2042..xxx", "xxx..xxx", "1..2..3", "U+", "u++2042"] {
            let err = resolve(repo(), token).unwrap_err();
            assert!(
                matches!(err, CoreError::ParseError { token: ref t } if t == token),
                "{token}: {err}"
            );
        }
        assert_eq!(
            resolve(repo(), "nonsense").unwrap_err().to_string(),
            r#"unknown identifier: "nonsense""#
        );
    }

    #[test]
    fn reversed_range_is_empty() {
        assert!(resolve(repo(), "2044..2042").unwrap().is_empty());
    }

    #[test]
    fn resolution_is_idempotent() {
        let first = resolve(repo(), "Dingbats").unwrap();
        let second = resolve(repo(), "Dingbats").unwrap();
        assert_eq!(first, second);
    }
}
