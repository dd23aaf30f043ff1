//! Filename identity extraction
//!
//! Guesses the (year, session id) pair of a local video from its path.
//!
//! **Algorithm:**
//! 1. Normalize separators and split into parent directory and filename
//! 2. Scan the filename for an optional year (a whole 2- or 4-digit run)
//!    followed by the session id (the first whole run of 3+ digits after it)
//! 3. If the filename gave no year, take one from the parent directory name
//! 4. Expand 2-digit years to 20xx

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional year, then session id.
///
/// The greedy prefix makes the year the last 2/4-digit run that still has a
/// 3+-digit run after it; the lazy prefix makes the id the first such run.
static FILENAME_PARSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:[\s\S]*[^0-9])?([0-9]{2}|[0-9]{4})[^0-9])?(?:[\s\S]*?[^0-9])??([0-9]{3,})(?:[^0-9][\s\S]*)?$",
    )
    .expect("valid filename regex")
});

/// A whole 2- or 4-digit run anywhere in a directory name
static PARENT_DIR_PARSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[\s\S]*[^0-9])?([0-9]{2}|[0-9]{4})(?:[^0-9][\s\S]*)?$")
        .expect("valid parent directory regex")
});

/// Best guess at a session identity; either half may be unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractedIdentity {
    pub year: Option<u32>,
    pub id: Option<u64>,
}

impl ExtractedIdentity {
    /// Neither year nor id was found
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.id.is_none()
    }
}

/// Extract (year, id) from a file path
pub fn extract_identity(path: &str) -> ExtractedIdentity {
    let normalized = path.replace('\\', "/");
    let (directory, filename) = match normalized.rsplit_once('/') {
        Some((directory, filename)) => (directory, filename),
        None => ("", normalized.as_str()),
    };

    let mut identity = ExtractedIdentity::default();

    if let Some(caps) = FILENAME_PARSE_RE.captures(filename) {
        identity.year = caps.get(1).and_then(|m| parse_year(m.as_str()));
        identity.id = caps.get(2).and_then(|m| m.as_str().parse().ok());
    }

    if identity.year.is_none() {
        let parent_directory = directory
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();

        if let Some(caps) = PARENT_DIR_PARSE_RE.captures(parent_directory) {
            identity.year = caps.get(1).and_then(|m| parse_year(m.as_str()));
        }
    }

    tracing::debug!(
        path = %path,
        year = ?identity.year,
        id = ?identity.id,
        "Extracted identity from filename"
    );

    identity
}

/// Parse a 2- or 4-digit year token; 2-digit years are 2000-2099
fn parse_year(token: &str) -> Option<u32> {
    let year: u32 = token.parse().ok()?;
    Some(if year < 100 { year + 2000 } else { year })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(path: &str) -> (Option<u32>, Option<u64>) {
        let identity = extract_identity(path);
        (identity.year, identity.id)
    }

    #[test]
    fn test_four_digit_year_and_id() {
        assert_eq!(extract("WWDC2019-401_whats_new.mp4"), (Some(2019), Some(401)));
        assert_eq!(
            extract("/videos/wwdc/2018_236_whats_new_in_swift.mp4"),
            (Some(2018), Some(236))
        );
    }

    #[test]
    fn test_two_digit_year_expanded() {
        assert_eq!(extract("19-home-305.mov"), (Some(2019), Some(305)));
        assert_eq!(extract("wwdc17_102_hd.mp4"), (Some(2017), Some(102)));
    }

    #[test]
    fn test_id_only() {
        assert_eq!(extract("session-401.mp4"), (None, Some(401)));
        assert_eq!(extract("10001.mp4"), (None, Some(10001)));
    }

    #[test]
    fn test_lone_four_digit_run_is_id() {
        // No id follows it, so it cannot be the year
        assert_eq!(extract("2019.mp4"), (None, Some(2019)));
    }

    #[test]
    fn test_first_id_after_year_wins() {
        assert_eq!(extract("2019-401-555.mp4"), (Some(2019), Some(401)));
        assert_eq!(
            extract("WWDC_2019_session_401_720p.mp4"),
            (Some(2019), Some(401))
        );
    }

    #[test]
    fn test_last_year_before_id_wins() {
        assert_eq!(extract("19-2020-305.mov"), (Some(2020), Some(305)));
    }

    #[test]
    fn test_three_digit_run_is_not_a_year() {
        assert_eq!(extract("a123_456.mp4"), (None, Some(123)));
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(extract("keynote.mp4"), (None, None));
        assert_eq!(extract("/media/talks/keynote.mp4"), (None, None));
        assert!(extract_identity("keynote.mp4").is_empty());
    }

    #[test]
    fn test_parent_directory_year_fallback() {
        assert_eq!(extract("/media/WWDC 2019/401.mp4"), (Some(2019), Some(401)));
        assert_eq!(extract("/media/wwdc18/session_707.mov"), (Some(2018), Some(707)));
    }

    #[test]
    fn test_parent_directory_only_used_without_filename_year() {
        assert_eq!(extract("/media/2017/2019-401.mp4"), (Some(2019), Some(401)));
    }

    #[test]
    fn test_parent_directory_year_without_id() {
        assert_eq!(extract("/media/2019/keynote.mp4"), (Some(2019), None));
    }

    #[test]
    fn test_grandparent_directory_ignored() {
        assert_eq!(extract("/media/2019/talks/401.mp4"), (None, Some(401)));
    }

    #[test]
    fn test_filename_without_directory_skips_fallback() {
        assert_eq!(extract("401.mp4"), (None, Some(401)));
    }

    #[test]
    fn test_windows_separators() {
        assert_eq!(extract("C:\\Videos\\WWDC 2016\\402.mp4"), (Some(2016), Some(402)));
    }

    #[test]
    fn test_id_wider_than_u32() {
        assert_eq!(
            extract("wwdc2020-10000000000.mp4"),
            (Some(2020), Some(10_000_000_000))
        );
        // Past u64 the id is unknown
        assert_eq!(
            extract("2019-99999999999999999999999.mp4"),
            (Some(2019), None)
        );
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("19"), Some(2019));
        assert_eq!(parse_year("00"), Some(2000));
        assert_eq!(parse_year("2021"), Some(2021));
    }
}
