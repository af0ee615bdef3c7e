//! Directory scanning - listing, filtering and sorting

use crate::{EntryType, FileEntry, FsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Sort key for scanned entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Filename,
    Mime,
    Size,
    Mtime,
    Ctime,
}

impl SortBy {
    /// Parse a column key; unknown keys yield `None` (no sort)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "filename" => Some(SortBy::Filename),
            "mime" => Some(SortBy::Mime),
            "size" => Some(SortBy::Size),
            "mtime" => Some(SortBy::Mtime),
            "ctime" => Some(SortBy::Ctime),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SortBy::Filename => "filename",
            SortBy::Mime => "mime",
            SortBy::Size => "size",
            SortBy::Mtime => "mtime",
            SortBy::Ctime => "ctime",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDir {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDir::Ascending => "asc",
            SortDir::Descending => "desc",
        }
    }
}

/// Options for a directory scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Include dotfiles
    pub show_hidden: bool,
    /// Regex patterns; a file is kept if any matches its mime type
    pub mime_filter: Vec<String>,
    /// Only keep entries of this type
    pub type_filter: Option<EntryType>,
    pub sort_by: Option<SortBy>,
    pub sort_dir: SortDir,
}

/// Counters over a scan result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub size: u64,
    pub directories: usize,
    pub files: usize,
    pub hidden: usize,
}

impl ScanSummary {
    pub fn from_entries(entries: &[FileEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut summary, entry| {
            summary.size += entry.size;
            if entry.is_dir() {
                summary.directories += 1;
            } else {
                summary.files += 1;
            }
            if entry.is_hidden() {
                summary.hidden += 1;
            }
            summary
        })
    }
}

/// Compiled mime filter; invalid patterns are skipped with a warning
#[derive(Debug, Default)]
pub struct MimeFilter {
    patterns: Vec<Regex>,
}

impl MimeFilter {
    pub fn new(patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("Ignoring invalid mime filter {:?}: {}", p, e);
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Entries without a mime type always pass
    pub fn accepts(&self, mime: Option<&str>) -> bool {
        match mime {
            Some(mime) if !self.is_empty() => self.patterns.iter().any(|re| re.is_match(mime)),
            _ => true,
        }
    }
}

/// List directory contents
pub fn list_directory<P: AsRef<Path>>(path: P, options: &ScanOptions) -> Result<Vec<FileEntry>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FsError::NotFound(path.display().to_string()));
    }

    if !path.is_dir() {
        return Err(FsError::InvalidPath(format!("Not a directory: {}", path.display())));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        match FileEntry::from_path(entry.path()) {
            Ok(e) => entries.push(e),
            Err(e) => tracing::debug!("Skipping unreadable entry {:?}: {}", entry.path(), e),
        }
    }

    let mut entries = filter_entries(entries, options);
    sort_entries(&mut entries, options.sort_by, options.sort_dir);

    tracing::debug!("Scanned {} ({} entries)", path.display(), entries.len());
    Ok(entries)
}

/// Apply hidden, type and mime filters
///
/// `..` is exempt from the hidden and type filters; the mime filter only
/// applies to files.
pub fn filter_entries(entries: Vec<FileEntry>, options: &ScanOptions) -> Vec<FileEntry> {
    let mime_filter = MimeFilter::new(&options.mime_filter);

    entries
        .into_iter()
        .filter(|entry| {
            if !entry.is_parent_link() {
                if let Some(wanted) = options.type_filter {
                    if entry.entry_type != wanted {
                        return false;
                    }
                }
                if !options.show_hidden && entry.is_hidden() {
                    return false;
                }
            }

            entry.is_dir() || mime_filter.accepts(entry.mime.as_deref())
        })
        .collect()
}

/// Sort entries; directories always come first
pub fn sort_entries(entries: &mut [FileEntry], sort_by: Option<SortBy>, dir: SortDir) {
    entries.sort_by(|a, b| {
        if a.is_dir() != b.is_dir() {
            return if a.is_dir() { Ordering::Less } else { Ordering::Greater };
        }

        let Some(sort_by) = sort_by else {
            return Ordering::Equal;
        };

        let cmp = match sort_by {
            SortBy::Filename => natural_sort_key(&a.filename).cmp(&natural_sort_key(&b.filename)),
            SortBy::Mime => a.mime.cmp(&b.mime),
            SortBy::Size => a.size.cmp(&b.size),
            SortBy::Mtime => a.mtime.cmp(&b.mtime),
            SortBy::Ctime => a.ctime.cmp(&b.ctime),
        };

        match dir {
            SortDir::Ascending => cmp,
            SortDir::Descending => cmp.reverse(),
        }
    });
}

/// Natural sort key: "image2.jpg" < "image10.jpg"
///
/// Digit runs too long for `u64` still compare numerically, after every
/// run that fits.
fn natural_sort_key(s: &str) -> Vec<NaturalSortPart> {
    let mut parts = Vec::new();
    let mut rest = s;

    while let Some(first) = rest.chars().next() {
        let digits = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);

        parts.push(if digits {
            NaturalSortPart::number(run)
        } else {
            NaturalSortPart::Str(run.to_lowercase())
        });
        rest = tail;
    }

    parts
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalSortPart {
    Num(u64),
    /// Digit run past `u64::MAX`, leading zeros trimmed
    Long { len: usize, digits: String },
    Str(String),
}

impl NaturalSortPart {
    fn number(run: &str) -> Self {
        match run.parse::<u64>() {
            Ok(n) => NaturalSortPart::Num(n),
            Err(_) => {
                let digits = run.trim_start_matches('0');
                NaturalSortPart::Long {
                    len: digits.len(),
                    digits: digits.to_string(),
                }
            }
        }
    }
}

/// Check if path is a root
pub fn is_root(path: &str) -> bool {
    Path::new(path).parent().is_none()
}

/// Parent directory as a string
pub fn parent_path(path: &str) -> Option<String> {
    Path::new(path)
        .parent()
        .map(|p| p.to_string_lossy().to_string())
}
