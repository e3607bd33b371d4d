use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::CoreError;
use crate::ucd::{BLOCKS, EMOJI_TEST, UNICODE_DATA};

/// Contents of the three UCD files a repository is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub unicode_data: String,
    pub blocks: String,
    pub emoji_test: String,
}

/// Locate and read `UnicodeData.txt`, `Blocks.txt` and `emoji-test.txt`
/// anywhere below `root`.
///
/// The first file found for each name wins; directories are visited in
/// file-name order so the choice is stable.
pub fn load_data_files(root: impl AsRef<Path>) -> Result<DataFiles, CoreError> {
    let root = root.as_ref();
    let mut found: [Option<PathBuf>; 3] = [None, None, None];
    let names = [UNICODE_DATA, BLOCKS, EMOJI_TEST];

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(slot) = names.iter().position(|&name| name == file_name) {
            if found[slot].is_none() {
                debug!(path = %path.display(), "found data file");
                found[slot] = Some(path.to_path_buf());
            }
        }
    }

    let [unicode_data, blocks, emoji_test] = found;
    Ok(DataFiles {
        unicode_data: read(root, UNICODE_DATA, unicode_data)?,
        blocks: read(root, BLOCKS, blocks)?,
        emoji_test: read(root, EMOJI_TEST, emoji_test)?,
    })
}

fn read(root: &Path, name: &'static str, path: Option<PathBuf>) -> Result<String, CoreError> {
    let path = path.ok_or_else(|| CoreError::MissingDataFile {
        name,
        root: root.to_path_buf(),
    })?;
    fs::read_to_string(&path).map_err(|source| CoreError::DataIo { path, source })
}
