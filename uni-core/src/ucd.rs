//! Parsers for the Unicode Character Database text formats.
//!
//! Three files are understood: `UnicodeData.txt`, `Blocks.txt` and
//! `emoji-test.txt`. Parsing is line based; every error carries the file
//! name and the 1-based line number.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use crate::category::GeneralCategory;
use crate::codepoint::{Block, Codepoint, MAX_CODEPOINT};
use crate::emoji::{Emoji, EmojiGroup, Tone};
use crate::error::CoreError;

pub const UNICODE_DATA: &str = "UnicodeData.txt";
pub const BLOCKS: &str = "Blocks.txt";
pub const EMOJI_TEST: &str = "emoji-test.txt";

/// Parse `Blocks.txt` into blocks sorted by start codepoint.
pub fn parse_blocks(source: &str) -> Result<Vec<Block>, CoreError> {
    let mut blocks = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }

        let (range, name) = line
            .split_once(';')
            .ok_or_else(|| CoreError::format(BLOCKS, line_no, "expected `START..END; Name`"))?;
        let (start, end) = range
            .trim()
            .split_once("..")
            .ok_or_else(|| CoreError::format(BLOCKS, line_no, "expected `START..END` range"))?;
        let start = parse_code(BLOCKS, line_no, start)?;
        let end = parse_code(BLOCKS, line_no, end)?;
        if start > end {
            return Err(CoreError::format(BLOCKS, line_no, "block range is reversed"));
        }

        blocks.push(Block {
            name: Arc::from(name.trim()),
            start,
            end,
        });
    }
    blocks.sort_by_key(|block| block.start);
    Ok(blocks)
}

/// Parse `UnicodeData.txt` into records sorted by codepoint.
///
/// `<Name, First>` / `<Name, Last>` pairs are expanded into one record per
/// codepoint named `<Name>`. `blocks` must be sorted by start codepoint.
pub fn parse_unicode_data(source: &str, blocks: &[Block]) -> Result<Vec<Codepoint>, CoreError> {
    let mut records = Vec::new();
    let mut pending_range: Option<(u32, String, GeneralCategory)> = None;

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(';');
        let (Some(code), Some(name), Some(category)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(CoreError::format(
                UNICODE_DATA,
                line_no,
                "expected at least three `;` separated fields",
            ));
        };
        let code = parse_code(UNICODE_DATA, line_no, code)?;
        let category = GeneralCategory::from_code(category.trim()).ok_or_else(|| {
            CoreError::format(UNICODE_DATA, line_no, format!("unknown category {category:?}"))
        })?;
        let name = name.trim();

        if let Some(base) = range_name(name, ", First>") {
            pending_range = Some((code, base.to_string(), category));
            continue;
        }
        if let Some(base) = range_name(name, ", Last>") {
            let Some((start, first_base, category)) = pending_range.take() else {
                return Err(CoreError::format(UNICODE_DATA, line_no, "range end without start"));
            };
            if first_base != base || start > code {
                return Err(CoreError::format(UNICODE_DATA, line_no, "mismatched range end"));
            }
            trace!(start, end = code, name = base, "expanding codepoint range");
            let display = format!("<{base}>");
            for cp in start..=code {
                records.push(Codepoint {
                    code: cp,
                    name: display.clone(),
                    category,
                    block: block_name(blocks, cp),
                });
            }
            continue;
        }
        if pending_range.is_some() {
            return Err(CoreError::format(UNICODE_DATA, line_no, "unterminated range"));
        }

        records.push(Codepoint {
            code,
            name: name.to_string(),
            category,
            block: block_name(blocks, code),
        });
    }

    if pending_range.is_some() {
        return Err(CoreError::format(UNICODE_DATA, source.lines().count(), "unterminated range"));
    }
    records.sort_by_key(|record| record.code);
    Ok(records)
}

/// Parse `emoji-test.txt` into fully-qualified entries and the group table.
///
/// Entries whose sequence carries a skin-tone modifier are not emitted;
/// they mark the matching base entry as supporting skin tones.
pub fn parse_emoji_test(source: &str) -> Result<(Vec<Emoji>, Vec<EmojiGroup>), CoreError> {
    let mut emojis = Vec::new();
    let mut groups: Vec<EmojiGroup> = Vec::new();
    let mut toned = HashSet::new();

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if let Some(group) = comment.strip_prefix("group:") {
                groups.push(EmojiGroup {
                    name: Arc::from(group.trim()),
                    subgroups: Vec::new(),
                });
            } else if let Some(subgroup) = comment.strip_prefix("subgroup:") {
                let group = groups.last_mut().ok_or_else(|| {
                    CoreError::format(EMOJI_TEST, line_no, "subgroup outside of a group")
                })?;
                group.subgroups.push(Arc::from(subgroup.trim()));
            }
            continue;
        }

        let (codes, rest) = line
            .split_once(';')
            .ok_or_else(|| CoreError::format(EMOJI_TEST, line_no, "expected `codes ; status`"))?;
        let (status, comment) = rest.split_once('#').unwrap_or((rest, ""));
        if status.trim() != "fully-qualified" {
            continue;
        }

        let sequence = codes
            .split_whitespace()
            .map(|code| parse_code(EMOJI_TEST, line_no, code))
            .collect::<Result<Vec<_>, _>>()?;
        if sequence.is_empty() {
            return Err(CoreError::format(EMOJI_TEST, line_no, "empty codepoint sequence"));
        }

        if sequence.iter().any(|&cp| Tone::is_modifier(cp)) {
            trace!(line = line_no, "skin tone variant");
            toned.insert(tone_key(&sequence));
            continue;
        }

        let (group, subgroup) = groups
            .last()
            .and_then(|group| Some((group.name.clone(), group.subgroups.last()?.clone())))
            .ok_or_else(|| CoreError::format(EMOJI_TEST, line_no, "entry outside of a subgroup"))?;

        emojis.push(Emoji {
            sequence,
            name: emoji_name(comment),
            group,
            subgroup,
            supports_skin_tone: false,
        });
    }

    for emoji in &mut emojis {
        emoji.supports_skin_tone = toned.contains(&tone_key(&emoji.sequence));
    }
    Ok((emojis, groups))
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(before, _)| before).trim()
}

fn parse_code(file: &'static str, line: usize, text: &str) -> Result<u32, CoreError> {
    let text = text.trim();
    u32::from_str_radix(text, 16)
        .ok()
        .filter(|&code| code <= MAX_CODEPOINT)
        .ok_or_else(|| CoreError::format(file, line, format!("invalid codepoint {text:?}")))
}

fn range_name<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    name.strip_prefix('<')?.strip_suffix(suffix)
}

fn block_name(blocks: &[Block], code: u32) -> Option<Arc<str>> {
    let index = blocks.partition_point(|block| block.start <= code);
    let block = blocks.get(index.checked_sub(1)?)?;
    block.contains(code).then(|| block.name.clone())
}

/// Sequence with tone modifiers and variation selectors removed, used to
/// pair tone variants with their base entry.
fn tone_key(sequence: &[u32]) -> Vec<u32> {
    sequence
        .iter()
        .copied()
        .filter(|&cp| !Tone::is_modifier(cp) && cp != 0xFE0F)
        .collect()
}

/// Extract the name from a `# <glyph> E<version> <name>` comment.
fn emoji_name(comment: &str) -> String {
    let mut parts = comment.trim().splitn(3, ' ');
    let _glyph = parts.next();
    match (parts.next(), parts.next()) {
        (Some(version), Some(name)) if is_emoji_version(version) => name.trim().to_string(),
        (Some(first), Some(rest)) => format!("{first} {}", rest.trim()),
        (Some(name), None) => name.to_string(),
        (None, _) => String::new(),
    }
}

fn is_emoji_version(token: &str) -> bool {
    token
        .strip_prefix('E')
        .is_some_and(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit() || c == '.'))
}
