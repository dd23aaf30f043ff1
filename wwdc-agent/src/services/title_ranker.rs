//! Title overlap ranking
//!
//! Length-weighted bag-of-words containment: the share of the candidate
//! title's characters that belong to words also present in the query.
//! Words are compared by exact equality after normalization, without
//! stemming or fuzzy comparison.

/// Score how well `candidate` is covered by `query`
///
/// # Returns
/// Score in 0.0-1.0; 0.0 when either side is absent or the candidate has no
/// word characters
pub fn rank_match(query: Option<&str>, candidate: Option<&str>) -> f64 {
    let (Some(query), Some(candidate)) = (query, candidate) else {
        return 0.0;
    };

    let query_clean = clean_title(query);
    let candidate_clean = clean_title(candidate);
    let query_words: Vec<&str> = query_clean.split(' ').collect();

    let mut candidate_length = 0usize;
    let mut match_length = 0usize;
    // Empty words from repeated spaces are kept; they add nothing
    for word in candidate_clean.split(' ') {
        let len = word.chars().count();
        candidate_length += len;
        if query_words.contains(&word) {
            match_length += len;
        }
    }

    if candidate_length == 0 {
        return 0.0;
    }

    match_length as f64 / candidate_length as f64
}

/// Lowercase and drop everything except `a-z`, `0-9` and space
fn clean_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect()
}
