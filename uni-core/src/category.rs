//! Unicode general categories and name canonicalization.
//!
//! Every category is known under three spellings: the two-letter code
//! used in `UnicodeData.txt` (`Po`), the property value alias
//! (`Other_Punctuation`) and the descriptive form used in the Unicode
//! standard (`Punctuation, Other`). All three canonicalize into keys of
//! the same category map.

/// The 30 Unicode general categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneralCategory {
    UppercaseLetter,
    LowercaseLetter,
    TitlecaseLetter,
    ModifierLetter,
    OtherLetter,
    NonspacingMark,
    SpacingMark,
    EnclosingMark,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    ConnectorPunctuation,
    DashPunctuation,
    OpenPunctuation,
    ClosePunctuation,
    InitialPunctuation,
    FinalPunctuation,
    OtherPunctuation,
    MathSymbol,
    CurrencySymbol,
    ModifierSymbol,
    OtherSymbol,
    SpaceSeparator,
    LineSeparator,
    ParagraphSeparator,
    Control,
    Format,
    Surrogate,
    PrivateUse,
    Unassigned,
}

/// Spellings of a single general category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub category: GeneralCategory,
    /// Two-letter code, e.g. `Po`.
    pub code: &'static str,
    /// Property value alias, e.g. `Other_Punctuation`.
    pub long_name: &'static str,
    /// Descriptive name, e.g. `Punctuation, Other`.
    pub description: &'static str,
}

macro_rules! category {
    ($variant:ident, $code:literal, $long:literal, $desc:literal) => {
        CategoryDescriptor {
            category: GeneralCategory::$variant,
            code: $code,
            long_name: $long,
            description: $desc,
        }
    };
}

/// The complete category table, in the order the Unicode standard lists it.
pub const CATEGORIES: &[CategoryDescriptor] = &[
    category!(UppercaseLetter, "Lu", "Uppercase_Letter", "Letter, Uppercase"),
    category!(LowercaseLetter, "Ll", "Lowercase_Letter", "Letter, Lowercase"),
    category!(TitlecaseLetter, "Lt", "Titlecase_Letter", "Letter, Titlecase"),
    category!(ModifierLetter, "Lm", "Modifier_Letter", "Letter, Modifier"),
    category!(OtherLetter, "Lo", "Other_Letter", "Letter, Other"),
    category!(NonspacingMark, "Mn", "Nonspacing_Mark", "Mark, Nonspacing"),
    category!(SpacingMark, "Mc", "Spacing_Mark", "Mark, Spacing Combining"),
    category!(EnclosingMark, "Me", "Enclosing_Mark", "Mark, Enclosing"),
    category!(DecimalNumber, "Nd", "Decimal_Number", "Number, Decimal Digit"),
    category!(LetterNumber, "Nl", "Letter_Number", "Number, Letter"),
    category!(OtherNumber, "No", "Other_Number", "Number, Other"),
    category!(ConnectorPunctuation, "Pc", "Connector_Punctuation", "Punctuation, Connector"),
    category!(DashPunctuation, "Pd", "Dash_Punctuation", "Punctuation, Dash"),
    category!(OpenPunctuation, "Ps", "Open_Punctuation", "Punctuation, Open"),
    category!(ClosePunctuation, "Pe", "Close_Punctuation", "Punctuation, Close"),
    category!(InitialPunctuation, "Pi", "Initial_Punctuation", "Punctuation, Initial quote"),
    category!(FinalPunctuation, "Pf", "Final_Punctuation", "Punctuation, Final quote"),
    category!(OtherPunctuation, "Po", "Other_Punctuation", "Punctuation, Other"),
    category!(MathSymbol, "Sm", "Math_Symbol", "Symbol, Math"),
    category!(CurrencySymbol, "Sc", "Currency_Symbol", "Symbol, Currency"),
    category!(ModifierSymbol, "Sk", "Modifier_Symbol", "Symbol, Modifier"),
    category!(OtherSymbol, "So", "Other_Symbol", "Symbol, Other"),
    category!(SpaceSeparator, "Zs", "Space_Separator", "Separator, Space"),
    category!(LineSeparator, "Zl", "Line_Separator", "Separator, Line"),
    category!(ParagraphSeparator, "Zp", "Paragraph_Separator", "Separator, Paragraph"),
    category!(Control, "Cc", "Control", "Other, Control"),
    category!(Format, "Cf", "Format", "Other, Format"),
    category!(Surrogate, "Cs", "Surrogate", "Other, Surrogate"),
    category!(PrivateUse, "Co", "Private_Use", "Other, Private Use"),
    category!(Unassigned, "Cn", "Unassigned", "Other, Not Assigned"),
];

impl GeneralCategory {
    pub fn descriptor(self) -> &'static CategoryDescriptor {
        // Every variant has exactly one row and the table is in declaration order.
        &CATEGORIES[self as usize]
    }

    pub fn long_name(self) -> &'static str {
        self.descriptor().long_name
    }

    /// Parse the two-letter code found in `UnicodeData.txt`.
    pub fn from_code(code: &str) -> Option<GeneralCategory> {
        CATEGORIES
            .iter()
            .find(|desc| desc.code == code)
            .map(|desc| desc.category)
    }

    /// Mn, Mc and Me.
    pub fn is_combining(self) -> bool {
        matches!(
            self,
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
        )
    }

    pub fn is_control(self) -> bool {
        self == GeneralCategory::Control
    }

    /// Letters, marks, numbers, punctuation, symbols and space separators.
    pub fn is_printable(self) -> bool {
        !matches!(
            self,
            GeneralCategory::Control
                | GeneralCategory::Format
                | GeneralCategory::Surrogate
                | GeneralCategory::PrivateUse
                | GeneralCategory::Unassigned
                | GeneralCategory::LineSeparator
                | GeneralCategory::ParagraphSeparator
        )
    }
}

/// Normalize a user-supplied category or block name into a lookup key.
///
/// Lowercases and drops spaces, underscores and commas, so that
/// `"Punctuation, Other"`, `"Punctuation_Other"` and `"punctuationother"`
/// all produce the same key.
pub fn canonicalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | ','))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Look up a category by an already canonicalized key.
///
/// The search is linear over `CATEGORIES`; the table is small and the
/// lookup runs once per token.
pub fn find_category(canon: &str) -> Option<GeneralCategory> {
    CATEGORIES
        .iter()
        .find(|desc| {
            canonicalize(desc.code) == canon
                || canonicalize(desc.long_name) == canon
                || canonicalize(desc.description) == canon
        })
        .map(|desc| desc.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_declaration_order() {
        for (index, desc) in CATEGORIES.iter().enumerate() {
            assert_eq!(desc.category as usize, index, "{} out of order", desc.code);
        }
        assert_eq!(CATEGORIES.len(), 30);
    }

    #[test]
    fn canonicalizes_surface_spellings() {
        assert_eq!(canonicalize("  Punctuation, Other "), "punctuationother");
        assert_eq!(canonicalize("Punctuation_Other"), "punctuationother");
        assert_eq!(canonicalize("General Punctuation"), "generalpunctuation");
        assert_eq!(canonicalize("U+2042..U+2044"), "u+2042..u+2044");
    }

    #[test]
    fn finds_category_by_every_spelling() {
        for spelling in [
            "Po",
            "po",
            "OtherPunctuation",
            "Other_Punctuation",
            "Punctuation, Other",
            "punctuation_OTHER",
        ] {
            assert_eq!(
                find_category(&canonicalize(spelling)),
                Some(GeneralCategory::OtherPunctuation),
                "{spelling}"
            );
        }
        assert_eq!(find_category("nonsense"), None);
    }

    #[test]
    fn derives_presentation_classes() {
        assert!(GeneralCategory::NonspacingMark.is_combining());
        assert!(!GeneralCategory::OtherPunctuation.is_combining());
        assert!(GeneralCategory::Control.is_control());
        assert!(GeneralCategory::SpaceSeparator.is_printable());
        assert!(!GeneralCategory::Format.is_printable());
        assert!(!GeneralCategory::LineSeparator.is_printable());
        assert_eq!(GeneralCategory::from_code("Mc"), Some(GeneralCategory::SpacingMark));
        assert_eq!(GeneralCategory::from_code("Xx"), None);
    }
}
