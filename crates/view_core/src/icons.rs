//! File icon lookup

use once_cell::sync::Lazy;
use regex::Regex;
use view_fs::{EntryType, FileEntry};

/// Maps a file entry to a display icon
pub trait IconResolver: Send + Sync {
    /// `size` is a theme size such as `16x16`
    fn file_icon(&self, entry: &FileEntry, size: &str) -> String;
}

const FALLBACK_ICON: &str = "status/dialog-question.png";

static EXACT: &[(&str, &str)] = &[
    ("application/pdf", "mimetypes/gnome-mime-application-pdf.png"),
    ("application/zip", "mimetypes/folder_tar.png"),
    ("application/x-python", "mimetypes/stock_script.png"),
    ("application/x-lua", "mimetypes/stock_script.png"),
    ("application/javascript", "mimetypes/stock_script.png"),
    ("text/html", "mimetypes/stock_script.png"),
    ("text/xml", "mimetypes/stock_script.png"),
    ("text/css", "mimetypes/stock_script.png"),
];

static PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"^text/", "mimetypes/txt.png"),
        (r"^audio/", "mimetypes/sound.png"),
        (r"^video/", "mimetypes/video.png"),
        (r"^image/", "mimetypes/image.png"),
        (r"^application/", "mimetypes/binary.png"),
    ]
    .into_iter()
    .filter_map(|(pattern, icon)| Regex::new(pattern).ok().map(|re| (re, icon)))
    .collect()
});

/// Icons from a named theme: `themes/<theme>/<size>/<icon>`
#[derive(Debug, Clone)]
pub struct ThemeIcons {
    theme: String,
}

impl ThemeIcons {
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
        }
    }

    /// Theme-relative icon name for an entry
    pub fn icon_name(entry: &FileEntry) -> &'static str {
        if entry.entry_type == EntryType::Dir {
            return "places/folder.png";
        }

        let mime = entry.mime.as_deref().unwrap_or("application/octet-stream");
        EXACT
            .iter()
            .find(|(m, _)| *m == mime)
            .map(|(_, icon)| *icon)
            .or_else(|| {
                PATTERNS
                    .iter()
                    .find(|(re, _)| re.is_match(mime))
                    .map(|(_, icon)| *icon)
            })
            .unwrap_or(FALLBACK_ICON)
    }
}

impl Default for ThemeIcons {
    fn default() -> Self {
        Self::new("default")
    }
}

impl IconResolver for ThemeIcons {
    fn file_icon(&self, entry: &FileEntry, size: &str) -> String {
        format!("themes/{}/{}/{}", self.theme, size, Self::icon_name(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileEntry {
        FileEntry::new(name, &format!("/{}", name), EntryType::File)
    }

    #[test]
    fn test_icon_names() {
        assert_eq!(
            ThemeIcons::icon_name(&FileEntry::new("docs", "/docs", EntryType::Dir)),
            "places/folder.png"
        );
        assert_eq!(ThemeIcons::icon_name(&file("a.pdf")), "mimetypes/gnome-mime-application-pdf.png");
        assert_eq!(ThemeIcons::icon_name(&file("a.html")), "mimetypes/stock_script.png");
        assert_eq!(ThemeIcons::icon_name(&file("a.txt")), "mimetypes/txt.png");
        assert_eq!(ThemeIcons::icon_name(&file("a.png")), "mimetypes/image.png");
        assert_eq!(ThemeIcons::icon_name(&file("a.bin")), "mimetypes/binary.png");

        let mut odd = file("a");
        odd.mime = Some("chemical/x-pdb".to_string());
        assert_eq!(ThemeIcons::icon_name(&odd), "status/dialog-question.png");
    }

    #[test]
    fn test_theme_path() {
        let icons = ThemeIcons::new("gnome");
        assert_eq!(
            icons.file_icon(&file("a.mp3"), "32x32"),
            "themes/gnome/32x32/mimetypes/sound.png"
        );
    }
}
