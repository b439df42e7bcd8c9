//! Internet shortcut (`.url`) parsing.
//!
//! These files are INI documents; the target lives in the `URL` key of the
//! `[InternetShortcut]` section. Other sections (`[DEFAULT]`, property
//! stores) are ignored.

use crate::error::{LaunchError, Result};
use crate::launchable::Launchable;

const SECTION: &str = "internetshortcut";

/// Build a bookmark named `name` from the contents of a `.url` file.
pub fn create_bookmark(name: &str, contents: &str) -> Result<Launchable> {
    let url = shortcut_url(contents).ok_or_else(|| LaunchError::InvalidShortcut(name.to_string()))?;
    Ok(Launchable::bookmark(name, url))
}

fn shortcut_url(contents: &str) -> Option<&str> {
    let mut in_section = false;

    for line in contents.lines().map(str::trim) {
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = header.trim().eq_ignore_ascii_case(SECTION);
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim();
            if key.trim().eq_ignore_ascii_case("url") && !value.is_empty() {
                return Some(value);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FAVOURITE: &str = "[DEFAULT]
BASEURL=http://www.google.co.in/firefox
[InternetShortcut]
URL=http://www.google.co.in/firefox
IDList=
IconFile=http://www.google.co.in/favicon.ico
IconIndex=1
[{000214A0-0000-0000-C000-000000000046}]
Prop3=19,2
";

    #[test]
    fn test_reads_a_favourite() {
        let bookmark = create_bookmark("Mozilla Firefox Start Page", FAVOURITE).unwrap();
        assert_eq!(bookmark.identity().as_str(), "http://www.google.co.in/firefox");
        assert_eq!(bookmark.name(), "Mozilla Firefox Start Page");
    }

    #[test]
    fn test_url_outside_section_ignored() {
        let contents = "[DEFAULT]\nURL=http://wrong.example\n";
        assert!(create_bookmark("x", contents).is_err());
    }

    #[test]
    fn test_section_and_key_case_insensitive() {
        let contents = "[internetshortcut]\r\nurl = https://docs.rs\r\n";
        let bookmark = create_bookmark("Docs", contents).unwrap();
        assert_eq!(bookmark.identity().as_str(), "https://docs.rs");
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = create_bookmark("Empty", "[InternetShortcut]\nURL=\n");
        assert!(matches!(result, Err(LaunchError::InvalidShortcut(_))));
    }
}
