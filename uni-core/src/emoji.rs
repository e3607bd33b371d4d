//! Emoji records, skin-tone modifiers and group/subgroup selection.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::error::CoreError;
use crate::repository::Repository;

/// Zero width joiner placed between a base sequence and its tone modifier.
pub const ZWJ: char = '\u{200D}';

/// A single entry of the emoji table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji {
    /// Codepoints forming the base glyph.
    pub sequence: Vec<u32>,
    pub name: String,
    pub group: Arc<str>,
    pub subgroup: Arc<str>,
    /// Whether the table lists skin-tone variants of this entry.
    pub supports_skin_tone: bool,
}

impl Emoji {
    /// The base sequence rendered as text.
    pub fn base(&self) -> String {
        self.sequence.iter().filter_map(|&cp| char::from_u32(cp)).collect()
    }

    /// Render the sequence with an optional tone modifier.
    ///
    /// The modifier is appended after a ZWJ only when the entry supports
    /// skin tones; otherwise the base sequence is returned unchanged.
    pub fn compose(&self, tone: Option<Tone>) -> String {
        let mut glyph = self.base();
        if let Some(tone) = tone.filter(|_| self.supports_skin_tone) {
            glyph.push(ZWJ);
            glyph.push(tone.modifier());
        }
        glyph
    }

    fn matches(&self, needle: &str) -> bool {
        self.group.to_lowercase().contains(needle) || self.subgroup.to_lowercase().contains(needle)
    }
}

/// An emoji group with its subgroups, in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiGroup {
    pub name: Arc<str>,
    pub subgroups: Vec<Arc<str>>,
}

/// Fitzpatrick skin-tone modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Light,
        Tone::MediumLight,
        Tone::Medium,
        Tone::MediumDark,
        Tone::Dark,
    ];

    /// The modifier codepoint, U+1F3FB through U+1F3FF.
    pub fn modifier(self) -> char {
        match self {
            Tone::Light => '\u{1F3FB}',
            Tone::MediumLight => '\u{1F3FC}',
            Tone::Medium => '\u{1F3FD}',
            Tone::MediumDark => '\u{1F3FE}',
            Tone::Dark => '\u{1F3FF}',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tone::Light => "light",
            Tone::MediumLight => "mediumlight",
            Tone::Medium => "medium",
            Tone::MediumDark => "mediumdark",
            Tone::Dark => "dark",
        }
    }

    pub fn is_modifier(cp: u32) -> bool {
        (0x1F3FB..=0x1F3FF).contains(&cp)
    }
}

impl FromStr for Tone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.name() == lower)
            .ok_or_else(|| CoreError::InvalidTone {
                tone: s.to_string(),
            })
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a single emoji query token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiQuery {
    /// List group and subgroup names instead of emoji.
    Groups,
    /// Every entry in the table.
    All,
    /// Entries whose group or subgroup contains the (lowercase) needle.
    Matching(String),
}

impl EmojiQuery {
    pub fn parse(token: &str) -> EmojiQuery {
        let lower = token.to_lowercase();
        match lower.as_str() {
            "groups" => EmojiQuery::Groups,
            "all" => EmojiQuery::All,
            _ => EmojiQuery::Matching(lower),
        }
    }
}

/// A matched emoji with its composed display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiRow<'a> {
    pub glyph: String,
    pub emoji: &'a Emoji,
}

/// Outcome of an emoji query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiSelection<'a> {
    /// A `groups` token was seen; callers list the group table instead.
    Groups,
    Rows(Vec<EmojiRow<'a>>),
}

/// Select emoji for every token, in token order.
///
/// Rows from different tokens are concatenated without deduplication. A
/// token that matches nothing fails the whole query.
pub fn select_emoji<'a, S: AsRef<str>>(
    repo: &'a Repository,
    tokens: &[S],
    tone: Option<Tone>,
) -> Result<EmojiSelection<'a>, CoreError> {
    let mut rows = Vec::new();
    for token in tokens {
        let token = token.as_ref();
        let needle = match EmojiQuery::parse(token) {
            EmojiQuery::Groups => return Ok(EmojiSelection::Groups),
            EmojiQuery::All => String::new(),
            EmojiQuery::Matching(needle) => needle,
        };

        let before = rows.len();
        rows.extend(
            repo.emojis()
                .iter()
                .filter(|emoji| emoji.matches(&needle))
                .map(|emoji| EmojiRow {
                    glyph: emoji.compose(tone),
                    emoji,
                }),
        );
        debug!(token, matched = rows.len() - before, "selected emoji");

        if rows.len() == before {
            return Err(CoreError::UnknownGroup {
                token: token.to_string(),
            });
        }
    }
    Ok(EmojiSelection::Rows(rows))
}
