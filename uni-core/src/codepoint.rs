//! Codepoint and block records held by the repository.

use std::sync::Arc;

use crate::category::GeneralCategory;

/// Highest valid Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// A single assigned codepoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codepoint {
    pub code: u32,
    /// Canonical uppercase name, e.g. `ASTERISM`.
    pub name: String,
    pub category: GeneralCategory,
    /// Name of the owning block, if the block table covers this codepoint.
    pub block: Option<Arc<str>>,
}

impl Codepoint {
    /// The codepoint as a `char`; `None` for surrogates.
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.code)
    }

    /// `U+` notation, zero-padded to at least four digits.
    pub fn notation(&self) -> String {
        format!("U+{:04X}", self.code)
    }

    pub fn is_combining(&self) -> bool {
        self.category.is_combining()
    }

    pub fn is_control(&self) -> bool {
        self.category.is_control()
    }

    pub fn is_printable(&self) -> bool {
        self.category.is_printable()
    }

    /// UTF-8 encoding as space separated lowercase hex bytes.
    pub fn utf8_hex(&self) -> String {
        let Some(c) = self.as_char() else {
            return "-".to_string();
        };
        let mut buf = [0u8; 4];
        c.encode_utf8(&mut buf)
            .bytes()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A named, inclusive range of codepoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: Arc<str>,
    pub start: u32,
    pub end: u32,
}

impl Block {
    pub fn contains(&self, code: u32) -> bool {
        (self.start..=self.end).contains(&code)
    }
}
