//! Catalog matching
//!
//! Scores every catalog session against a target (year, id, title) and keeps
//! either the positively scored ones or the exact identity matches.
//!
//! **Scoring (0-100):**
//! - +30 when the year matches
//! - +70 when the session id matches
//! - while below 100, title overlap fills a share of the remaining points

use crate::models::{CatalogRecord, RawCatalog};
use crate::services::title_ranker::rank_match;

pub const YEAR_MATCH_SCORE: u32 = 30;
pub const ID_MATCH_SCORE: u32 = 70;
pub const MAX_SCORE: u32 = 100;

/// Which sessions a match pass keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every session scoring above zero
    Ranked,
    /// Only sessions whose year and id both equal the target
    Exact,
}

/// What the caller is looking for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchTarget<'a> {
    pub year: Option<u32>,
    pub id: Option<u64>,
    pub title: Option<&'a str>,
}

impl<'a> MatchTarget<'a> {
    pub fn new(year: Option<u32>, id: Option<u64>, title: Option<&'a str>) -> Self {
        Self { year, id, title }
    }

    fn year_matches(&self, record: &CatalogRecord) -> bool {
        // Unknown never equals anything, not even another unknown
        self.year.is_some() && self.year == record.year
    }

    fn id_matches(&self, record: &CatalogRecord) -> bool {
        self.id.is_some() && self.id == record.id
    }
}

/// Score one record against the target
pub fn score_record(record: &CatalogRecord, target: &MatchTarget<'_>) -> u32 {
    let mut score = 0;

    if target.year_matches(record) {
        score += YEAR_MATCH_SCORE;
    }

    if target.id_matches(record) {
        score += ID_MATCH_SCORE;
    }

    if score < MAX_SCORE && target.title.is_some() {
        let rank = rank_match(target.title, record.title.as_deref());
        score += (f64::from(MAX_SCORE - score) * rank).floor() as u32;
    }

    score
}

/// Match the target against every session in the catalog
///
/// Output keeps catalog order; callers wanting best-first sort the search
/// results with [`sort_best_first`](crate::models::sort_best_first).
pub fn match_sessions(
    catalog: &RawCatalog,
    target: &MatchTarget<'_>,
    mode: MatchMode,
) -> Vec<CatalogRecord> {
    let tracks = catalog.track_names();
    let mut result = Vec::new();
    let mut skipped = 0usize;

    for entry in &catalog.contents {
        let Some(mut record) = CatalogRecord::from_catalog_entry(entry, &tracks) else {
            skipped += 1;
            continue;
        };

        record.score = score_record(&record, target);

        let keep = match mode {
            MatchMode::Exact => target.year_matches(&record) && target.id_matches(&record),
            MatchMode::Ranked => record.score > 0,
        };

        if keep {
            result.push(record);
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Skipped catalog entries without a usable content id");
    }

    tracing::debug!(
        year = ?target.year,
        id = ?target.id,
        title = ?target.title,
        mode = ?mode,
        matches = result.len(),
        "Catalog matching complete"
    );

    result
}
