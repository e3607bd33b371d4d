//! Read-only Unicode and emoji lookup tables.
//!
//! A `Repository` is built once per process, either from the data
//! compiled into this crate or from a directory of UCD files, and is then
//! shared by reference with every query.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use tracing::debug;

use crate::category::{GeneralCategory, canonicalize};
use crate::codepoint::{Block, Codepoint};
use crate::datafiles::{DataFiles, load_data_files};
use crate::emoji::{Emoji, EmojiGroup};
use crate::error::CoreError;
use crate::ucd;

const BUNDLED_UNICODE_DATA: &str = include_str!("../data/UnicodeData.txt");
const BUNDLED_BLOCKS: &str = include_str!("../data/Blocks.txt");
const BUNDLED_EMOJI_TEST: &str = include_str!("../data/emoji-test.txt");

static BUNDLED: OnceLock<Repository> = OnceLock::new();

#[derive(Debug)]
pub struct Repository {
    /// Ascending by codepoint.
    codepoints: Vec<Codepoint>,
    /// Ascending by start codepoint.
    blocks: Vec<Block>,
    /// Canonicalized block name -> index into `blocks`.
    block_index: HashMap<String, usize>,
    emojis: Vec<Emoji>,
    groups: Vec<EmojiGroup>,
}

impl Repository {
    /// The repository compiled into the library, parsed on first use.
    pub fn bundled() -> Result<&'static Repository, CoreError> {
        if let Some(repo) = BUNDLED.get() {
            return Ok(repo);
        }
        let repo = Repository::from_sources(BUNDLED_UNICODE_DATA, BUNDLED_BLOCKS, BUNDLED_EMOJI_TEST)?;
        Ok(BUNDLED.get_or_init(|| repo))
    }

    /// Build from the UCD files found below `root`.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Repository, CoreError> {
        let files = load_data_files(root)?;
        Repository::from_files(&files)
    }

    pub fn from_files(files: &DataFiles) -> Result<Repository, CoreError> {
        Repository::from_sources(&files.unicode_data, &files.blocks, &files.emoji_test)
    }

    pub fn from_sources(
        unicode_data: &str,
        blocks: &str,
        emoji_test: &str,
    ) -> Result<Repository, CoreError> {
        let blocks = ucd::parse_blocks(blocks)?;
        let codepoints = ucd::parse_unicode_data(unicode_data, &blocks)?;
        let (emojis, groups) = ucd::parse_emoji_test(emoji_test)?;

        let block_index = blocks
            .iter()
            .enumerate()
            .map(|(index, block)| (canonicalize(&block.name), index))
            .collect();

        debug!(
            codepoints = codepoints.len(),
            blocks = blocks.len(),
            emojis = emojis.len(),
            groups = groups.len(),
            "built repository"
        );
        Ok(Repository {
            codepoints,
            blocks,
            block_index,
            emojis,
            groups,
        })
    }

    pub fn find(&self, code: u32) -> Option<&Codepoint> {
        self.codepoints
            .binary_search_by_key(&code, |record| record.code)
            .ok()
            .map(|index| &self.codepoints[index])
    }

    /// Every record, ascending by codepoint.
    pub fn codepoints(&self) -> &[Codepoint] {
        &self.codepoints
    }

    pub fn by_category(&self, category: GeneralCategory) -> impl Iterator<Item = &Codepoint> {
        self.codepoints
            .iter()
            .filter(move |record| record.category == category)
    }

    /// Look up a block by an already canonicalized name.
    pub fn block(&self, canon: &str) -> Option<&Block> {
        self.block_index.get(canon).map(|&index| &self.blocks[index])
    }

    /// Assigned records within `start..=end`; unassigned values are absent.
    pub fn range(&self, start: u32, end: u32) -> &[Codepoint] {
        let lo = self.codepoints.partition_point(|record| record.code < start);
        let hi = self.codepoints.partition_point(|record| record.code <= end);
        &self.codepoints[lo..hi.max(lo)]
    }

    pub fn emojis(&self) -> &[Emoji] {
        &self.emojis
    }

    pub fn emoji_groups(&self) -> &[EmojiGroup] {
        &self.groups
    }
}
