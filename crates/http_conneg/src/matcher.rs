//! I define [`Matcher`], the engine's single externally-facing type.

use tracing::{debug, trace, warn};

use crate::{
    cache::MatcherCache,
    digest::{digest_server_types, ServerTypeDigest},
    parser::{parse_accept, MalformedAccept},
    precedence::sort_by_precedence,
    range::{MediaRange, Quality},
};

/// Matches a client's `Accept` header against a server's statically-offered
/// media types and selects the single best one, per §4.5.
///
/// Construction digests the server's media type list once; every
/// [`Self::select`] call thereafter is synchronous, allocation-light on a
/// cache hit, and safe to call concurrently from any number of threads.
pub struct Matcher {
    server_types: Vec<ServerTypeDigest>,
    cache: MatcherCache,
}

impl Matcher {
    /// Builds a matcher over `server_types`, in registration order.
    /// Registration order is semantically significant: the first entry is
    /// the default for an absent `Accept` header, and earlier entries win
    /// ties when multiple server types score equally against a header.
    ///
    /// Uses the default cache bound ([`crate::cache::DEFAULT_CAPACITY`]).
    /// See [`Self::with_cache_capacity`] to override it.
    ///
    /// # Panics
    ///
    /// Panics if `server_types` is empty — a matcher with no server types
    /// could never answer an absent-header `select` call.
    pub fn new<I, S>(server_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_cache_capacity(server_types, crate::cache::DEFAULT_CAPACITY)
    }

    /// Like [`Self::new`], with an explicit cache bound.
    ///
    /// # Panics
    ///
    /// Panics if `server_types` is empty.
    pub fn with_cache_capacity<I, S>(server_types: I, cache_capacity: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let server_types = digest_server_types(server_types);
        assert!(
            !server_types.is_empty(),
            "Matcher requires at least one server-offered media type"
        );

        Self {
            server_types,
            cache: MatcherCache::new(cache_capacity),
        }
    }

    /// The server's offered media type digests, in registration order.
    pub fn server_types(&self) -> &[ServerTypeDigest] {
        &self.server_types
    }

    /// Selects the single best server media type for `header`.
    ///
    /// `header = None` models an absent `Accept` header: the client
    /// expresses no preference, so the server's own default (the first type
    /// it registered) is returned.
    ///
    /// Returns `Ok(None)` when the header parses but no server type
    /// matches any range in it. Returns `Err` when the header itself is
    /// malformed; malformed headers are never cached, since a retried
    /// identical header would simply fail identically again.
    pub fn select(&self, header: Option<&str>) -> Result<Option<String>, MalformedAccept> {
        let Some(header) = header else {
            // Invariant: `server_types` is non-empty, enforced at construction.
            return Ok(Some(self.server_types[0].original().to_string()));
        };

        if let Some(cached) = self.cache.get(header) {
            trace!(header, "accept header cache hit");
            return Ok(cached);
        }

        debug!(header, "accept header cache miss, parsing");
        let mut ranges = parse_accept(header).map_err(|error| {
            warn!(header, %error, "malformed accept header");
            error
        })?;
        sort_by_precedence(&mut ranges);

        let result = self.best_match(&ranges);
        self.cache.insert(header, result.clone());
        Ok(result)
    }

    /// Finds, for each server digest in registration order, the
    /// highest-precedence client range that matches it; then picks the
    /// server digest whose matching range has the greatest `q`, breaking
    /// ties by registration order.
    fn best_match(&self, sorted_ranges: &[MediaRange]) -> Option<String> {
        let mut best: Option<(&ServerTypeDigest, Quality)> = None;

        for digest in &self.server_types {
            let Some(matching_range) = sorted_ranges.iter().find(|range| range_matches_digest(range, digest)) else {
                continue;
            };

            let q = matching_range.q();
            match best {
                Some((_, best_q)) if q <= best_q => {}
                _ => best = Some((digest, q)),
            }
        }

        best.map(|(digest, _)| digest.original().to_string())
    }
}

/// Whether `range` matches `digest`, per §4.5:
///
/// - `range.type == "*"`, OR
/// - `range.type == digest.type` AND (`range.subtype == "*"` OR
///   (`range.subtype == digest.subtype` AND every parameter the range
///   names is present with an equal value on the digest)).
fn range_matches_digest(range: &MediaRange, digest: &ServerTypeDigest) -> bool {
    if range.is_type_wildcard() {
        return true;
    }

    if range.r#type() != digest.r#type() {
        return false;
    }

    if range.is_subtype_wildcard() {
        return true;
    }

    range.subtype() == digest.subtype()
        && range
            .parameters()
            .iter()
            .all(|(k, v)| digest.parameters().get(k) == Some(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_types() -> Vec<&'static str> {
        vec![
            "application/json",
            "application/graphql-response+json",
            "text/html",
        ]
    }

    #[test]
    fn absent_header_returns_first_registered_type() {
        let matcher = Matcher::new(server_types());
        assert_eq!(matcher.select(None).unwrap(), Some("application/json".to_string()));
    }

    #[test]
    fn star_star_picks_first_server_type_on_tie() {
        let matcher = Matcher::new(server_types());
        assert_eq!(
            matcher.select(Some("*/*")).unwrap(),
            Some("application/json".to_string())
        );
    }

    #[test]
    fn exact_match_is_selected() {
        let matcher = Matcher::new(server_types());
        assert_eq!(matcher.select(Some("text/html")).unwrap(), Some("text/html".to_string()));
    }

    #[test]
    fn no_matching_server_type_returns_none() {
        let matcher = Matcher::new(server_types());
        assert_eq!(matcher.select(Some("application/xml")).unwrap(), None);
    }

    #[test]
    fn higher_q_wins_over_registration_order() {
        let matcher = Matcher::new(server_types());
        assert_eq!(
            matcher.select(Some("text/html;q=0.9, application/json;q=0.8")).unwrap(),
            Some("text/html".to_string())
        );
    }

    #[test]
    fn equal_q_breaks_tie_by_registration_order() {
        let matcher = Matcher::new(server_types());
        assert_eq!(
            matcher
                .select(Some("application/json;q=0.5, application/graphql-response+json;q=0.5"))
                .unwrap(),
            Some("application/json".to_string())
        );
    }

    #[test]
    fn subtype_wildcard_still_matches() {
        let matcher = Matcher::new(["application/json", "text/html"]);
        assert_eq!(
            matcher.select(Some("application/*")).unwrap(),
            Some("application/json".to_string())
        );
    }

    #[test]
    fn client_parameter_not_satisfied_by_server_digest_fails_the_match() {
        let matcher = Matcher::new(["application/json"]);
        assert_eq!(
            matcher.select(Some("application/json;charset=utf-8")).unwrap(),
            None
        );
    }

    #[test]
    fn malformed_header_surfaces_as_error_and_is_not_cached() {
        let matcher = Matcher::new(server_types());
        assert!(matcher.select(Some("not a valid header!!!")).is_err());
        assert_eq!(matcher.cache.len(), 0);
    }

    #[test]
    fn select_is_transparent_across_repeated_calls() {
        let matcher = Matcher::new(server_types());
        let header = Some("text/html;q=0.9, application/json;q=0.8");
        let first = matcher.select(header).unwrap();
        let second = matcher.select(header).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn q_zero_match_still_counts_as_a_match() {
        // §4.5 / §9: q=0 is preserved as "still a match" rather than a
        // strict RFC rejection, matching this core's documented behavior.
        let matcher = Matcher::new(["application/json"]);
        assert_eq!(
            matcher.select(Some("application/json;q=0")).unwrap(),
            Some("application/json".to_string())
        );
    }

    #[test]
    fn no_wildcard_type_is_ever_produced_by_the_digester() {
        let matcher = Matcher::new(server_types());
        assert!(matcher.server_types().iter().all(|d| d.r#type() != "*"));
    }

    #[test]
    #[should_panic]
    fn empty_server_type_list_panics() {
        let empty: Vec<String> = Vec::new();
        Matcher::new(empty);
    }
}
