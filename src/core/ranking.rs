// src/core/ranking.rs

use crate::constants::{TAG_DEFAULT, TAG_LATEST};
use crate::models::Candidate;
use std::cmp::Ordering;

/// Ranks discovered candidates using a token precedence order and a set of
/// pre-release token names.
#[derive(Debug, Clone)]
pub struct Ranker {
    sort_order: Vec<String>,
    prerelease_tokens: Vec<String>,
}

impl Ranker {
    pub fn new(sort_order: Vec<String>, prerelease_tokens: Vec<String>) -> Self {
        Self {
            sort_order,
            prerelease_tokens,
        }
    }

    /// True if the candidate carries any token from the pre-release set.
    pub fn is_prerelease(&self, candidate: &Candidate) -> bool {
        self.prerelease_tokens
            .iter()
            .any(|token| candidate.tokens.contains_key(token))
    }

    /// Compares two candidates for rank (`Less` ranks lower).
    ///
    /// A pre-release candidate always ranks below a release candidate,
    /// regardless of its other tokens. Otherwise the configured precedence
    /// is walked most-significant first; a token missing from a candidate
    /// compares lowest. A total tie is `Equal`, which keeps discovery order
    /// under the stable sort in [`Ranker::rank`].
    pub fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        match (self.is_prerelease(a), self.is_prerelease(b)) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }

        for token in &self.sort_order {
            let ordering = a.tokens.get(token).cmp(&b.tokens.get(token));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Sorts candidates best-first. The sort is stable, so candidates that
    /// compare equal stay in discovery order.
    pub fn rank(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.sort_by(|a, b| self.compare(b, a));
        candidates
    }

    /// Tags a ranked (best-first) candidate list.
    ///
    /// The best non-pre-release candidate is tagged `latest` and, unless
    /// `default_version` pins another version, `default`. The best candidate
    /// carrying each pre-release token is tagged with that token's name.
    pub fn apply_tags(&self, ranked: &mut [Candidate], default_version: Option<&str>) {
        let mut untagged_prerelease: Vec<&str> = self
            .prerelease_tokens
            .iter()
            .map(String::as_str)
            .collect();
        let mut latest_tagged = false;
        let mut default_tagged = false;

        for candidate in ranked.iter_mut() {
            if !latest_tagged && !self.is_prerelease(candidate) {
                if default_version.is_none() {
                    candidate.tags.push(TAG_DEFAULT.to_string());
                }
                candidate.tags.push(TAG_LATEST.to_string());
                latest_tagged = true;
            }

            if let Some(pinned) = default_version
                && !default_tagged
                && candidate.version == pinned
            {
                candidate.tags.push(TAG_DEFAULT.to_string());
                default_tagged = true;
            }

            untagged_prerelease.retain(|token| {
                if candidate.tokens.contains_key(*token) {
                    candidate.tags.push((*token).to_string());
                    false
                } else {
                    true
                }
            });
        }

        if let Some(pinned) = default_version
            && !default_tagged
        {
            log::warn!("default version '{}' was not found among the matches", pinned);
        }
    }
}

/// Ranks by the rendered version string alone, best-first. This is the
/// `appwrap` behavior: no token precedence, no pre-release handling.
pub fn rank_by_version(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.version.cmp(&a.version));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenValue;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn candidate(version: &str, tokens: &[(&str, &str)]) -> Candidate {
        let tokens: HashMap<String, TokenValue> = tokens
            .iter()
            .map(|(name, raw)| (name.to_string(), TokenValue::parse(raw)))
            .collect();
        Candidate {
            path: PathBuf::from(format!("/opt/app-{version}/bin")),
            version: version.to_string(),
            tokens,
            tags: Vec::new(),
        }
    }

    fn order(sort: &[&str], pr: &[&str]) -> Ranker {
        Ranker::new(
            sort.iter().map(|s| s.to_string()).collect(),
            pr.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_major_dominates_minor() {
        let ranker = order(&["major", "minor"], &[]);
        let a = candidate("1.9", &[("major", "1"), ("minor", "9")]);
        let b = candidate("2.0", &[("major", "2"), ("minor", "0")]);
        assert_eq!(ranker.compare(&a, &b), Ordering::Less);
        assert_eq!(ranker.compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_numeric_not_lexical() {
        let ranker = order(&["major"], &[]);
        let nine = candidate("9", &[("major", "9")]);
        let ten = candidate("10", &[("major", "10")]);
        assert_eq!(ranker.compare(&nine, &ten), Ordering::Less);
    }

    #[test]
    fn test_missing_token_compares_lowest() {
        let ranker = order(&["major", "minor"], &[]);
        let bare = candidate("2", &[("major", "2")]);
        let full = candidate("2.0", &[("major", "2"), ("minor", "0")]);
        assert_eq!(ranker.compare(&bare, &full), Ordering::Less);
    }

    #[test]
    fn test_prerelease_demoted_regardless_of_tokens() {
        let ranker = order(&["major", "minor", "beta"], &["beta"]);
        let stable = candidate("1.2", &[("major", "1"), ("minor", "2")]);
        let newer_beta = candidate(
            "9.9b1",
            &[("major", "9"), ("minor", "9"), ("beta", "1")],
        );
        assert_eq!(ranker.compare(&newer_beta, &stable), Ordering::Less);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let ranker = order(&["major"], &[]);
        let first = candidate("1.0", &[("major", "1")]);
        let second = candidate("1.1", &[("major", "1")]);
        let ranked = ranker.rank(vec![first, second]);
        // Both tie on major; discovery order is preserved.
        assert_eq!(ranked[0].version, "1.0");
        assert_eq!(ranked[1].version, "1.1");
    }

    #[test]
    fn test_tags_latest_and_default() {
        let ranker = order(&["major", "minor"], &[]);
        let mut ranked = ranker.rank(vec![
            candidate("1.2", &[("major", "1"), ("minor", "2")]),
            candidate("1.5", &[("major", "1"), ("minor", "5")]),
        ]);
        ranker.apply_tags(&mut ranked, None);

        assert_eq!(ranked[0].version, "1.5");
        assert!(ranked[0].has_tag("latest"));
        assert!(ranked[0].has_tag("default"));
        assert!(ranked[1].tags.is_empty());
    }

    #[test]
    fn test_tags_with_pinned_default_version() {
        let ranker = order(&["major", "minor"], &[]);
        let mut ranked = ranker.rank(vec![
            candidate("1.2", &[("major", "1"), ("minor", "2")]),
            candidate("1.5", &[("major", "1"), ("minor", "5")]),
        ]);
        ranker.apply_tags(&mut ranked, Some("1.2"));

        assert!(ranked[0].has_tag("latest"));
        assert!(!ranked[0].has_tag("default"));
        assert!(ranked[1].has_tag("default"));
    }

    #[test]
    fn test_tags_best_candidate_per_prerelease_token() {
        let ranker = order(&["major", "beta"], &["beta"]);
        let mut ranked = ranker.rank(vec![
            candidate("2b1", &[("major", "2"), ("beta", "1")]),
            candidate("2b2", &[("major", "2"), ("beta", "2")]),
            candidate("1", &[("major", "1")]),
        ]);
        ranker.apply_tags(&mut ranked, None);

        // Release first, then betas best-first.
        assert_eq!(ranked[0].version, "1");
        assert!(ranked[0].has_tag("latest"));
        assert_eq!(ranked[1].version, "2b2");
        assert!(ranked[1].has_tag("beta"));
        assert!(!ranked[2].has_tag("beta"));
    }

    #[test]
    fn test_rank_by_version_string() {
        let ranked = rank_by_version(vec![
            candidate("11.1v3", &[]),
            candidate("12.2v1", &[]),
        ]);
        assert_eq!(ranked[0].version, "12.2v1");
    }
}
