//! I rank parsed [`MediaRange`]s by specificity, independent of `q`.

use crate::range::MediaRange;

/// Computes the precedence score of a media range.
///
/// ```txt
/// score(r) = (1 if r.subtype != "*" else 0) * 1_000_000
///          + (1 if r.type    != "*" else 0) * 1_000
///          + |r.parameters|
/// ```
///
/// Fully-specified ranges (`a/b`) outrank type wildcards (`a/*`) outrank the
/// full wildcard (`*/*`); among equally specific ranges, more parameters
/// indicate a stricter selection. `q` plays no part in this score — it is
/// only consulted once a winner per server type has been found.
pub fn precedence_score(range: &MediaRange) -> u64 {
    let subtype_specific = u64::from(!range.is_subtype_wildcard());
    let type_specific = u64::from(!range.is_type_wildcard());
    subtype_specific * 1_000_000 + type_specific * 1_000 + range.parameters().len() as u64
}

/// Sorts parsed ranges descending by [`precedence_score`], stable with
/// respect to their original parse order.
pub fn sort_by_precedence(ranges: &mut [MediaRange]) {
    ranges.sort_by_key(|r| std::cmp::Reverse(precedence_score(r)));
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::parser::parse_accept;

    fn range(header: &str) -> MediaRange {
        parse_accept(header).unwrap().into_iter().next().unwrap()
    }

    #[rstest]
    #[case("*/*", 0)]
    #[case("application/*", 1_000)]
    #[case("application/json", 1_001_000)]
    #[case("application/json;charset=utf-8", 1_001_001)]
    #[case("application/json;charset=utf-8;level=1", 1_001_002)]
    fn score_matches_formula(#[case] header: &str, #[case] expected: u64) {
        assert_eq!(precedence_score(&range(header)), expected);
    }

    #[test]
    fn more_specific_outranks_less_specific() {
        assert!(precedence_score(&range("application/json")) > precedence_score(&range("application/*")));
        assert!(precedence_score(&range("application/*")) > precedence_score(&range("*/*")));
        assert!(
            precedence_score(&range("text/plain;format=flowed")) > precedence_score(&range("text/plain"))
        );
    }

    #[test]
    fn sort_is_descending_and_stable_on_ties() {
        let mut ranges = parse_accept("*/*, image/png, text/*, image/jpg").unwrap();
        sort_by_precedence(&mut ranges);
        let pairs: Vec<(&str, &str)> = ranges.iter().map(|r| (r.r#type(), r.subtype())).collect();
        assert_eq!(
            pairs,
            vec![
                ("image", "png"),
                ("image", "jpg"),
                ("text", "*"),
                ("*", "*"),
            ]
        );
    }
}
