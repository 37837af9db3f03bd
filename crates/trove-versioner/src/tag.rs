//! Timestamp tags and tagged file names

use chrono::{DateTime, Local};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::time::SystemTime;

/// `strftime` format of the timestamp tag (`20240105-093000`)
pub const TIME_FORMAT: &str = "%Y%m%d-%H%M%S";

const TAG_LEN: usize = 15;

/// Naming scheme of an archived copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingScheme {
    /// `{base}~{timestamp}{ext}`
    Current,
    /// `{base}{ext}~{timestamp}`, only ever read
    Legacy,
}

impl NamingScheme {
    /// Lowercase name for display
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingScheme::Current => "current",
            NamingScheme::Legacy => "legacy",
        }
    }
}

/// Format a modification time as a tag, in local time
pub fn timestamp_tag(modified: SystemTime) -> String {
    DateTime::<Local>::from(modified).format(TIME_FORMAT).to_string()
}

/// Split a file name at its final `.`, keeping the dot with the extension
///
/// `.bashrc` splits into `("", ".bashrc")` and `README` into `("README", "")`.
pub(crate) fn split_extension(name: &[u8]) -> (&[u8], &[u8]) {
    match name.iter().rposition(|b| *b == b'.') {
        Some(idx) => name.split_at(idx),
        None => (name, &[]),
    }
}

/// Insert `~{tag}` before the extension of `name`
///
/// # Examples
///
/// ```
/// use trove_versioner::tagged_filename;
///
/// assert_eq!(tagged_filename("report.txt", "20240105-093000"), "report~20240105-093000.txt");
/// assert_eq!(tagged_filename("archive.tar.gz", "x"), "archive.tar~x.gz");
/// assert_eq!(tagged_filename("Makefile", "x"), "Makefile~x");
/// ```
pub fn tagged_filename(name: &str, tag: &str) -> String {
    tagged_os_filename(OsStr::new(name), tag)
        .to_string_lossy()
        .into_owned()
}

/// [`tagged_filename`] for names that need not be valid UTF-8
pub fn tagged_os_filename(name: &OsStr, tag: &str) -> OsString {
    let path = Path::new(name);
    let mut tagged = OsString::with_capacity(name.len() + tag.len() + 1);
    match (path.file_stem(), path.extension()) {
        (Some(base), Some(ext)) => {
            tagged.push(base);
            tagged.push("~");
            tagged.push(tag);
            tagged.push(".");
            tagged.push(ext);
        }
        // `.bashrc`: the whole name is the extension.
        _ if name.as_encoded_bytes().first() == Some(&b'.') => {
            tagged.push("~");
            tagged.push(tag);
            tagged.push(name);
        }
        _ => {
            tagged.push(name);
            tagged.push("~");
            tagged.push(tag);
        }
    }
    tagged
}

/// Whether `tag` has the shape produced by [`timestamp_tag`]
pub(crate) fn is_timestamp_tag(tag: &[u8]) -> bool {
    tag.len() == TAG_LEN
        && tag.iter().enumerate().all(|(i, b)| {
            if i == 8 {
                *b == b'-'
            } else {
                b.is_ascii_digit()
            }
        })
}

/// Recover scheme and tag of an archived name for the original `name`
///
/// Works on the encoded bytes, so names that are not valid UTF-8 match too.
pub(crate) fn parse_tagged(name: &OsStr, archived: &OsStr) -> Option<(NamingScheme, String)> {
    let name = name.as_encoded_bytes();
    let archived = archived.as_encoded_bytes();
    let (base, ext) = split_extension(name);

    let current = archived
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix(b"~"))
        .and_then(|rest| rest.strip_suffix(ext))
        .filter(|tag| is_timestamp_tag(tag));
    if let Some(tag) = current {
        return Some((NamingScheme::Current, String::from_utf8_lossy(tag).into_owned()));
    }

    archived
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix(b"~"))
        .filter(|tag| is_timestamp_tag(tag))
        .map(|tag| (NamingScheme::Legacy, String::from_utf8_lossy(tag).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn legacy_tagged_filename(name: &str, tag: &str) -> String {
        format!("{name}~{tag}")
    }

    fn split(name: &str) -> (&str, &str) {
        let (base, ext) = split_extension(name.as_bytes());
        (
            std::str::from_utf8(base).unwrap(),
            std::str::from_utf8(ext).unwrap(),
        )
    }

    fn parse(name: &str, archived: &str) -> Option<(NamingScheme, String)> {
        parse_tagged(OsStr::new(name), OsStr::new(archived))
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split("report.txt"), ("report", ".txt"));
        assert_eq!(split("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split("Makefile"), ("Makefile", ""));
        assert_eq!(split(".bashrc"), ("", ".bashrc"));
        assert_eq!(split("trailing."), ("trailing", "."));
    }

    #[test]
    fn test_tagged_filename_dotfile() {
        assert_eq!(tagged_filename(".bashrc", "20240105-093000"), "~20240105-093000.bashrc");
    }

    #[test]
    fn test_tagged_names_parse_back_as_current() {
        let tag = "20240105-093000";
        for name in [".bashrc", "..profile", "trailing.", ".hidden.txt", "a.b.c", "plain"] {
            let tagged = tagged_os_filename(OsStr::new(name), tag);
            assert_eq!(
                parse_tagged(OsStr::new(name), &tagged),
                Some((NamingScheme::Current, tag.to_string())),
                "{name} tagged as {tagged:?}"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"r\xE9sum\xE9.txt");
        let tagged = tagged_os_filename(name, "20240105-093000");
        assert_eq!(tagged.as_bytes(), b"r\xE9sum\xE9~20240105-093000.txt");
        assert_eq!(
            parse_tagged(name, &tagged),
            Some((NamingScheme::Current, "20240105-093000".to_string()))
        );
    }

    #[test]
    fn test_timestamp_tag_shape() {
        let tag = timestamp_tag(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000));
        assert!(is_timestamp_tag(tag.as_bytes()), "unexpected tag {tag}");
    }

    #[test]
    fn test_timestamp_tag_sorts_with_time() {
        let earlier = timestamp_tag(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000));
        let later = timestamp_tag(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_001));
        assert!(earlier < later);
    }

    #[test]
    fn test_is_timestamp_tag() {
        assert!(is_timestamp_tag(b"20240105-093000"));
        assert!(!is_timestamp_tag(b"20240105093000"));
        assert!(!is_timestamp_tag(b"2024010-5093000"));
        assert!(!is_timestamp_tag(b"20240105-09300a"));
        assert!(!is_timestamp_tag(b""));
    }

    #[test]
    fn test_parse_tagged() {
        assert_eq!(
            parse("report.txt", "report~20240105-093000.txt"),
            Some((NamingScheme::Current, "20240105-093000".to_string()))
        );
        assert_eq!(
            parse("report.txt", "report.txt~20240105-093000"),
            Some((NamingScheme::Legacy, "20240105-093000".to_string()))
        );
        assert_eq!(parse("report.txt", "report~latest.txt"), None);
        assert_eq!(parse("report.txt", "other~20240105-093000.txt"), None);
    }

    #[test]
    fn test_parse_tagged_without_extension() {
        // Both schemes coincide; reported as current.
        assert_eq!(
            parse("Makefile", "Makefile~20240105-093000"),
            Some((NamingScheme::Current, "20240105-093000".to_string()))
        );
    }

    #[test]
    fn test_legacy_sorts_before_current() {
        let tag = "20240105-093000";
        let legacy = legacy_tagged_filename("report.txt", tag);
        let current = tagged_filename("report.txt", tag);
        assert!(legacy < current);
    }
}
