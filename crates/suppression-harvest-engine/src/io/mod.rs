use regex::Regex;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::scan::{CLOSE, OPEN};
use crate::suppression::{Candidate, Label, Name, Suppression};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid label prefix {0:?}: {1}")]
    InvalidPrefix(String, regex::Error),
}

/// Read a whole log into memory as lines, keeping their terminators.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_log(path: &Path) -> Result<Vec<String>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    let lines = split_lines(&String::from_utf8_lossy(&bytes));
    log::debug!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Create (or truncate) the suppression file, creating parent directories.
pub fn create_output(path: &Path) -> Result<BufWriter<File>, IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Recognizes generated label lines such as `  new12`.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    prefix: String,
    re: Regex,
}

impl LabelPattern {
    pub fn new(prefix: &str) -> Result<Self, IoError> {
        let re = Regex::new(&format!(r"^\s*{}(\d+)\s*$", regex::escape(prefix)))
            .map_err(|e| IoError::InvalidPrefix(prefix.to_string(), e))?;
        Ok(Self {
            prefix: prefix.to_string(),
            re,
        })
    }

    pub fn parse(&self, line: &str) -> Option<Label> {
        let caps = self.re.captures(line)?;
        let number = caps[1].parse().ok()?;
        Some(Label::new(self.prefix.clone(), number))
    }
}

/// A suppression file committed by earlier runs.
///
/// Keeps the original bytes so the file can be carried forward untouched
/// when new blocks are harvested into the same path.
#[derive(Debug, Clone, Default)]
pub struct ExistingFile {
    raw: Vec<u8>,
    blocks: Vec<Suppression>,
}

impl ExistingFile {
    /// Load and parse an existing suppression file.
    ///
    /// A missing file is empty. Name lines that look like generated labels
    /// keep their number; anything else is kept as a verbatim name. A block
    /// cut off before its closing delimiter is ignored. Bytes that are not
    /// valid UTF-8 are replaced for parsing, the same as [`read_log`].
    pub fn load(path: &Path, labels: &LabelPattern) -> Result<Self, IoError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read(path)?;
        let blocks = parse_suppressions(&String::from_utf8_lossy(&raw), labels);
        log::debug!("Loaded {} suppressions from {}", blocks.len(), path.display());
        Ok(Self { raw, blocks })
    }

    pub fn blocks(&self) -> &[Suppression] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Suppression> {
        self.blocks
    }

    /// Writes the original file contents byte for byte, adding a final
    /// newline if the file lacked one so appended blocks start on a new line.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.raw)?;
        if self.raw.last().is_some_and(|&b| b != b'\n') {
            w.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Load only the blocks of an existing suppression file.
pub fn read_suppressions(path: &Path, labels: &LabelPattern) -> Result<Vec<Suppression>, IoError> {
    Ok(ExistingFile::load(path, labels)?.into_blocks())
}

/// Whether two paths name the same file. Falls back to comparing the paths
/// themselves when either one cannot be resolved (e.g. does not exist yet).
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

pub fn parse_suppressions(text: &str, labels: &LabelPattern) -> Vec<Suppression> {
    let mut out = Vec::new();
    let mut lines = text.split_inclusive('\n');

    while let Some(line) = lines.next() {
        if !line.contains(OPEN) {
            continue;
        }
        let Some(name_line) = lines.next() else {
            break;
        };

        let mut rule = Vec::new();
        let closing = loop {
            match lines.next() {
                Some(l) if l.contains(CLOSE) => break Some(l),
                Some(l) => rule.push(l.to_string()),
                None => break None,
            }
        };
        let Some(closing) = closing else {
            break;
        };

        let name = match labels.parse(name_line) {
            Some(label) => Name::Generated(label),
            None => Name::Existing(name_line.to_string()),
        };
        let candidate = Candidate {
            opening: line.to_string(),
            rule,
            closing: closing.to_string(),
        };
        out.push(candidate.into_suppression(name));
    }

    out
}

/// Label offset to continue from: the highest generated label, or the block
/// count when that is larger.
pub fn starting_offset(existing: &[Suppression]) -> u64 {
    let highest = existing
        .iter()
        .filter_map(Suppression::label_number)
        .max()
        .unwrap_or(0);
    highest.max(existing.len() as u64)
}

fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}
