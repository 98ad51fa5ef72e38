use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::STANDARD};
use url::Url;

use crate::types::Track;

/// Minimum score for a candidate to count as the same song.
pub const CLEAN_MATCH_THRESHOLD: f64 = 0.7;

pub fn basic_auth_header(user: &str, password: &str) -> String {
    let credentials = format!("{}:{}", user, password);
    format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
}

/// Outcome of reading the query of an authorization redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    Code(String),
    Denied(String),
    Missing,
}

pub fn parse_redirect(redirect: &str) -> RedirectOutcome {
    let Ok(url) = Url::parse(redirect) else {
        return RedirectOutcome::Missing;
    };

    let mut denied = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" if !value.is_empty() => return RedirectOutcome::Code(value.into_owned()),
            "error" => denied = Some(value.into_owned()),
            _ => {}
        }
    }

    match denied {
        Some(reason) => RedirectOutcome::Denied(reason),
        None => RedirectOutcome::Missing,
    }
}

/// Lowercases a title and drops bracketed and `feat.` suffixes.
pub fn normalize_title(title: &str) -> String {
    let lower = title.to_lowercase();
    let mut cut = lower.len();
    for marker in ["(", "[", " - ", " feat.", " ft.", " featuring "] {
        if let Some(idx) = lower.find(marker) {
            if idx > 0 {
                cut = cut.min(idx);
            }
        }
    }
    lower[..cut].trim().to_string()
}

pub fn title_similarity(a: &str, b: &str) -> f64 {
    let (a, b) = (normalize_title(a), normalize_title(b));
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        1.0
    } else if a.starts_with(&b) || b.starts_with(&a) {
        0.75
    } else {
        0.0
    }
}

/// Jaccard overlap of lowercased artist names; order does not matter.
pub fn artist_overlap(a: &Track, b: &Track) -> f64 {
    let names = |t: &Track| -> HashSet<String> {
        t.artists
            .iter()
            .map(|artist| artist.name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect()
    };
    let (left, right) = (names(a), names(b));
    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}

/// Scores `candidate` as a clean alternate of `target`.
///
/// Explicit candidates and the target itself always score zero.
pub fn clean_match_score(target: &Track, candidate: &Track) -> f64 {
    if candidate.explicit {
        return 0.0;
    }
    if candidate.id.is_some() && candidate.id == target.id {
        return 0.0;
    }
    title_similarity(&target.name, &candidate.name) * 0.6 + artist_overlap(target, candidate) * 0.4
}

pub fn best_clean_match<'a>(target: &Track, candidates: &'a [Track]) -> Option<&'a Track> {
    candidates
        .iter()
        .map(|c| (clean_match_score(target, c), c))
        .filter(|(score, _)| *score >= CLEAN_MATCH_THRESHOLD)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, c)| c)
}
