//! The `identify`, `search` and `print` queries.
//!
//! Each query is a pure function from its input to a result set that
//! borrows from the repository. Multi-token queries are fail-fast: the
//! first failing token aborts the query with no partial result.

use tracing::debug;

use crate::codepoint::Codepoint;
use crate::error::CoreError;
use crate::ident::resolve;
use crate::repository::Repository;

/// One record per character of `text`, in input order.
pub fn identify<'a>(repo: &'a Repository, text: &str) -> Result<Vec<&'a Codepoint>, CoreError> {
    text.chars()
        .map(|c| {
            repo.find(u32::from(c))
                .ok_or_else(|| CoreError::unknown_codepoint(u64::from(c)))
        })
        .collect()
}

/// Records whose name contains every word, case-insensitively.
pub fn search<'a, S: AsRef<str>>(
    repo: &'a Repository,
    words: &[S],
) -> Result<Vec<&'a Codepoint>, CoreError> {
    let words: Vec<String> = words
        .iter()
        .map(|word| word.as_ref())
        .filter(|word| !word.is_empty())
        .map(str::to_uppercase)
        .collect();
    if words.is_empty() {
        return Err(CoreError::NoSearchTerm);
    }

    let matches: Vec<_> = repo
        .codepoints()
        .iter()
        .filter(|record| words.iter().all(|word| record.name.contains(word.as_str())))
        .collect();
    debug!(?words, matches = matches.len(), "search finished");

    if matches.is_empty() {
        return Err(CoreError::NoMatches);
    }
    Ok(matches)
}

/// Resolve every identifier and sort the union by codepoint.
///
/// The sort is stable and duplicates from overlapping identifiers are
/// kept.
pub fn print<'a, S: AsRef<str>>(
    repo: &'a Repository,
    tokens: &[S],
) -> Result<Vec<&'a Codepoint>, CoreError> {
    let mut out = Vec::new();
    for token in tokens {
        out.extend(resolve(repo, token.as_ref())?);
    }
    if out.is_empty() {
        return Err(CoreError::NoMatches);
    }
    out.sort_by_key(|record| record.code);
    Ok(out)
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
    fn identifies_characters_in_input_order() {
        let records = identify(repo(), "a\u{2042}a").expect("identify");
        assert_eq!(codes(&records), [0x61, 0x2042, 0x61]);
        assert_eq!(records[0].name, "LATIN SMALL LETTER A");
        assert!(identify(repo(), "").unwrap().is_empty());
    }

    #[test]
    fn identify_reports_unknown_character() {
        let err = identify(repo(), "a\u{0378}").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCodepoint { ref hex } if hex == "0378"));
    }

    #[test]
    fn search_requires_every_word() {
        let records = search(repo(), &["asterism"]).expect("search");
        assert_eq!(codes(&records), [0x2042]);

        let floral = search(repo(), &["floral"]).unwrap();
        let bullet = search(repo(), &["floral", "bullet"]).unwrap();
        assert!(bullet.len() < floral.len());
        assert!(bullet.iter().all(|r| r.name.contains("FLORAL") && r.name.contains("BULLET")));
    }

    #[test]
    fn search_errors() {
        let empty: [&str; 2] = ["", ""];
        assert!(matches!(search(repo(), &empty), Err(CoreError::NoSearchTerm)));
        assert!(matches!(
            search(repo(), &["nomatch_nomatch"]),
            Err(CoreError::NoMatches)
        ));
    }

    #[test]
    fn print_sorts_across_tokens() {
        let records = print(repo(), &["U+2044", "Dingbats", "Po", "0041"]).expect("print");
        assert!(records.windows(2).all(|pair| pair[0].code <= pair[1].code));
        assert_eq!(records.first().map(|r| r.code), Some(0x21));
    }

    #[test]
    fn print_keeps_duplicates_from_overlaps() {
        let records = print(repo(), &["2042..2044", "2043..2045"]).unwrap();
        assert_eq!(codes(&records), [0x2042, 0x2043, 0x2043, 0x2044, 0x2044, 0x2045]);
    }

    #[test]
    fn print_fails_fast() {
        let err = print(repo(), &["2042", "nonsense", "9999999999"]).unwrap_err();
        assert!(matches!(err, CoreError::ParseError { ref token } if token == "nonsense"));
    }

    #[test]
    fn print_empty_result_is_no_matches() {
        assert!(matches!(print(repo(), &["Cn"]), Err(CoreError::NoMatches)));
    }
}
