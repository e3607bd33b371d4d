//! Rendering of result sets as aligned text rows.
//!
//! Every function writes to a caller supplied `io::Write`; nothing here
//! touches process-wide output handles or decides exit codes.

use std::io::{self, Write};

use crate::codepoint::Codepoint;
use crate::emoji::{EmojiGroup, EmojiRow};
use crate::entity::html_reference;

const DOTTED_CIRCLE: char = '\u{25CC}';
const SYMBOL_FOR_DELETE: char = '\u{2421}';
const REPLACEMENT: char = '\u{FFFD}';

/// Output switches shared by every listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Only data rows: no header, no summary.
    pub quiet: bool,
    /// Write characters as-is, without display substitutions. Control
    /// characters may then garble the terminal.
    pub raw: bool,
}

/// Display form of a single codepoint.
///
/// Combining marks are shown on a dotted circle, C0 controls and DEL as
/// their Control Pictures symbol, and other invisible codepoints (except
/// the soft hyphen) as U+FFFD.
pub fn fmt_char(record: &Codepoint, raw: bool) -> String {
    let Some(c) = record.as_char() else {
        return REPLACEMENT.to_string();
    };
    if raw {
        return c.to_string();
    }
    if record.is_combining() {
        return format!("{DOTTED_CIRCLE}{c}");
    }

    let shown = if record.is_control() {
        match record.code {
            code @ 0x00..=0x1F => char::from_u32(code + 0x2400).unwrap_or(REPLACEMENT),
            0x7F => SYMBOL_FOR_DELETE,
            // C1 has no control pictures.
            _ => REPLACEMENT,
        }
    } else if record.is_printable() || record.code == 0xAD {
        c
    } else {
        REPLACEMENT
    };
    shown.to_string()
}

/// Write codepoint rows, one per record, in the given order.
pub fn write_codepoints<W: Write>(
    out: &mut W,
    records: &[&Codepoint],
    options: RenderOptions,
) -> io::Result<()> {
    let mut rows: Vec<[String; 4]> = records
        .iter()
        .map(|record| {
            [
                record.notation(),
                record.code.to_string(),
                record.utf8_hex(),
                html_reference(record.code),
            ]
        })
        .collect();
    if !options.quiet {
        rows.insert(0, ["cpoint", "dec", "utf-8", "html"].map(String::from));
    }
    let widths = column_widths(rows.iter().map(|row| row.as_slice()));

    let mut rows = rows.into_iter();
    if !options.quiet {
        if let Some(header) = rows.next() {
            write!(out, "     ")?;
            write_cells(out, &header, &widths)?;
            writeln!(out, "name (cat)")?;
        }
    }
    for (record, row) in records.iter().zip(rows) {
        write!(out, "'{}'  ", fmt_char(record, options.raw))?;
        write_cells(out, &row, &widths)?;
        writeln!(out, "{} ({})", record.name, record.category.long_name())?;
    }

    if !options.quiet {
        let noun = if records.len() == 1 { "codepoint" } else { "codepoints" };
        writeln!(out, "{} {noun}", records.len())?;
    }
    Ok(())
}

/// Write emoji rows: the glyph, then name, group and subgroup columns.
pub fn write_emoji<W: Write>(
    out: &mut W,
    rows: &[EmojiRow<'_>],
    options: RenderOptions,
) -> io::Result<()> {
    let mut cells: Vec<[&str; 3]> = rows
        .iter()
        .map(|row| [&*row.emoji.name, &*row.emoji.group, &*row.emoji.subgroup])
        .collect();
    if !options.quiet {
        cells.insert(0, ["name", "group", "subgroup"]);
    }
    let widths = column_widths(cells.iter().map(|row| row.as_slice()));

    let mut cells = cells.into_iter();
    if !options.quiet {
        if let Some(header) = cells.next() {
            write!(out, "   ")?;
            write_cells(out, &header, &widths)?;
            writeln!(out)?;
        }
    }
    for (row, cell) in rows.iter().zip(cells) {
        write!(out, "{} ", row.glyph)?;
        write_cells(out, &cell, &widths)?;
        writeln!(out)?;
    }

    if !options.quiet {
        writeln!(out, "{} emoji", rows.len())?;
    }
    Ok(())
}

/// Write every group name followed by its subgroups, indented.
pub fn write_groups<W: Write>(out: &mut W, groups: &[EmojiGroup]) -> io::Result<()> {
    for group in groups {
        writeln!(out, "{}", group.name)?;
        for subgroup in &group.subgroups {
            writeln!(out, "    {subgroup}")?;
        }
    }
    Ok(())
}

/// Maximum character count per column across all rows.
fn column_widths<'r, S, I>(rows: I) -> Vec<usize>
where
    S: AsRef<str> + 'r,
    I: Iterator<Item = &'r [S]>,
{
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        if widths.len() < row.len() {
            widths.resize(row.len(), 0);
        }
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.as_ref().chars().count());
        }
    }
    widths
}

fn write_cells<W: Write, S: AsRef<str>>(
    out: &mut W,
    cells: &[S],
    widths: &[usize],
) -> io::Result<()> {
    for (cell, width) in cells.iter().zip(widths) {
        write!(out, "{}", fill(cell.as_ref(), width + 2))?;
    }
    Ok(())
}

/// Pad `s` with spaces up to `width` characters.
fn fill(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut padded = String::with_capacity(s.len() + width.saturating_sub(len));
    padded.push_str(s);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emoji::{EmojiSelection, Tone, select_emoji};
    use crate::query::print;
    use crate::repository::Repository;

    fn repo() -> &'static Repository {
        Repository::bundled().expect("bundled data parses")
    }

    fn record(code: u32) -> &'static Codepoint {
        repo().find(code).expect("assigned")
    }

    fn render(records: &[&Codepoint], options: RenderOptions) -> String {
        let mut out = Vec::new();
        write_codepoints(&mut out, records, options).expect("write");
        String::from_utf8(out).expect("utf-8")
    }

    #[test]
    fn substitutes_invisible_characters() {
        assert_eq!(fmt_char(record(0x00), false), "\u{2400}");
        assert_eq!(fmt_char(record(0x1B), false), "\u{241B}");
        assert_eq!(fmt_char(record(0x7F), false), "\u{2421}");
        assert_eq!(fmt_char(record(0x85), false), "\u{FFFD}");
        assert_eq!(fmt_char(record(0x200B), false), "\u{FFFD}");
        assert_eq!(fmt_char(record(0x2028), false), "\u{FFFD}");
        assert_eq!(fmt_char(record(0x0301), false), "\u{25CC}\u{0301}");
    }

    #[test]
    fn keeps_visible_characters() {
        assert_eq!(fmt_char(record(0xAD), false), "\u{AD}");
        assert_eq!(fmt_char(record(0x20), false), " ");
        assert_eq!(fmt_char(record(0xA0), false), "\u{A0}");
        assert_eq!(fmt_char(record(0x2042), false), "\u{2042}");
    }

    #[test]
    fn raw_mode_bypasses_substitution() {
        assert_eq!(fmt_char(record(0x1B), true), "\u{1B}");
        assert_eq!(fmt_char(record(0x0301), true), "\u{0301}");
    }

    #[test]
    fn quiet_output_has_only_rows() {
        let records = print(repo(), &["2042..2044"]).unwrap();
        let text = render(&records, RenderOptions { quiet: true, raw: false });
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("'\u{2042}'  U+2042  8258  e2 81 82  &#x2042;  "));
        assert!(lines[0].ends_with("ASTERISM (Other_Punctuation)"));
        assert!(lines[2].contains("&frasl;"));
    }

    #[test]
    fn normal_output_adds_header_and_summary() {
        let records = print(repo(), &["22"]).unwrap();
        let text = render(&records, RenderOptions::default());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("     cpoint  "));
        assert!(lines[0].ends_with("name (cat)"));
        assert!(lines[1].contains("&quot;"));
        assert_eq!(lines[2], "1 codepoint");
    }

    #[test]
    fn aligns_codepoint_columns() {
        let records = print(repo(), &["41", "1F44B"]).unwrap();
        let text = render(&records, RenderOptions { quiet: true, raw: false });
        let lines: Vec<_> = text.lines().collect();
        let name_column = |line: &str, name: &str| {
            line[..line.find(name).expect("name present")].chars().count()
        };
        assert_eq!(name_column(lines[0], "LATIN"), name_column(lines[1], "WAVING"));
    }

    #[test]
    fn pads_emoji_columns_to_widest_cell() {
        let EmojiSelection::Rows(rows) = select_emoji(repo(), &["hands"], Some(Tone::Light)).unwrap()
        else {
            panic!("expected rows");
        };
        let mut out = Vec::new();
        write_emoji(&mut out, &rows, RenderOptions { quiet: true, raw: false }).unwrap();
        let text = String::from_utf8(out).unwrap();

        let widest = "palms up together".len() + 2;
        let first = text.lines().next().unwrap();
        let name_cell: String = first.chars().skip_while(|c| *c != ' ').skip(1).take(widest).collect();
        assert_eq!(name_cell, fill("clapping hands", widest));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn lists_groups_with_indented_subgroups() {
        let mut out = Vec::new();
        write_groups(&mut out, repo().emoji_groups()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Smileys & Emotion"));
        assert_eq!(lines.next(), Some("    face-smiling"));
        assert!(text.contains("People & Body\n    hand-fingers-open\n"));
    }

    #[test]
    fn fill_counts_characters_not_bytes() {
        assert_eq!(fill("é", 3), "é  ");
        assert_eq!(fill("long", 2), "long");
    }
}
