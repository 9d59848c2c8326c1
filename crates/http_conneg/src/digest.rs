//! I preprocess a server's static list of offered media types once, at
//! [`crate::Matcher`] construction.

use indexmap::IndexMap;

/// The pre-parsed form of a single server-offered media type, retained by
/// the matcher for the lifetime of that matcher.
///
/// Unlike [`MediaRange`](crate::range::MediaRange), a digest never has a
/// wildcard `type` or `subtype` — servers offer concrete representations,
/// never ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTypeDigest {
    pub(crate) r#type: String,
    pub(crate) subtype: String,
    pub(crate) parameters: IndexMap<String, String>,
    pub(crate) original: String,
}

impl ServerTypeDigest {
    /// The digest's type component.
    #[inline]
    pub fn r#type(&self) -> &str {
        &self.r#type
    }

    /// The digest's subtype component.
    #[inline]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// The digest's parameters, as supplied at construction.
    #[inline]
    pub fn parameters(&self) -> &IndexMap<String, String> {
        &self.parameters
    }

    /// The verbatim string this digest was built from — what the matcher
    /// hands back on a match.
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }
}

/// Digests a server's ordered list of offered media types.
///
/// This is lax by design (§4.4): it splits at the first `;` into spec +
/// parameters, the spec at the first `/` into type and subtype, and each
/// parameter at its first `=`. Laxness covers *parameter* parsing (servers
/// supply their own static list, not attacker-controlled input); it does not
/// extend to the `type`/`subtype` non-empty invariant from §3, which is a
/// property of the `ServerTypeDigest` type itself, not just of this parse
/// step — an entry with no `/`, or an empty component either side of it, is
/// a construction-time error, not a silently-accepted empty string.
///
/// # Panics
///
/// Panics if any entry yields an empty `type` or `subtype`.
pub fn digest_server_types<I, S>(media_types: I) -> Vec<ServerTypeDigest>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    media_types
        .into_iter()
        .map(|entry| digest_one(entry.into()))
        .collect()
}

fn digest_one(original: String) -> ServerTypeDigest {
    let mut parts = original.splitn(2, ';');
    let spec = parts.next().unwrap_or("").trim();
    let params_str = parts.next();

    let mut spec_parts = spec.splitn(2, '/');
    let r#type = spec_parts.next().unwrap_or("").trim().to_string();
    let subtype = spec_parts.next().unwrap_or("").trim().to_string();

    assert!(
        !r#type.is_empty() && !subtype.is_empty(),
        "server-offered media type {original:?} must have a non-empty type and subtype"
    );

    let mut parameters = IndexMap::new();
    if let Some(params_str) = params_str {
        for param in params_str.split(';') {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let mut kv = param.splitn(2, '=');
            let key = kv.next().unwrap_or("").trim().to_string();
            let value = kv.next().unwrap_or("").trim().to_string();
            if !key.is_empty() {
                parameters.insert(key, value);
            }
        }
    }

    ServerTypeDigest {
        r#type,
        subtype,
        parameters,
        original,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn digests_plain_type() {
        let digests = digest_server_types(["application/json"]);
        assert_eq!(digests.len(), 1);
        assert_eq!(digests[0].r#type(), "application");
        assert_eq!(digests[0].subtype(), "json");
        assert!(digests[0].parameters().is_empty());
        assert_eq!(digests[0].original(), "application/json");
    }

    #[test]
    fn digests_type_with_parameters() {
        let digests = digest_server_types(["application/json;charset=utf-8"]);
        assert_eq!(
            digests[0].parameters().get("charset").map(String::as_str),
            Some("utf-8")
        );
        assert_eq!(digests[0].original(), "application/json;charset=utf-8");
    }

    #[test]
    fn preserves_registration_order() {
        let digests = digest_server_types(["text/html", "application/json"]);
        assert_eq!(digests[0].r#type(), "text");
        assert_eq!(digests[1].r#type(), "application");
    }

    #[rstest]
    #[case("application/json; charset=utf-8 ; level=1")]
    fn tolerates_whitespace_around_parameters(#[case] entry: &str) {
        let digests = digest_server_types([entry]);
        assert_eq!(
            digests[0].parameters().get("charset").map(String::as_str),
            Some("utf-8")
        );
        assert_eq!(digests[0].parameters().get("level").map(String::as_str), Some("1"));
    }

    #[rstest]
    #[case("application")]
    #[case("application/")]
    #[case("/json")]
    #[case("")]
    #[should_panic]
    fn entry_with_empty_type_or_subtype_panics(#[case] entry: &str) {
        digest_server_types([entry]);
    }
}
