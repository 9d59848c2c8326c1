//! I define [`MediaRange`] and [`Quality`], the parser's output types.

use std::{cmp::Ordering, fmt};

use indexmap::IndexMap;

/// `q` / weight value, as used by `Accept` and other proactive negotiation
/// fields (see [RFC 9110 §12.4.2](https://www.rfc-editor.org/rfc/rfc9110.html#section-12.4.2)).
///
/// Unlike `manas_http`'s `QValue`, this is a plain finite `f64` in `[0, 1]`
/// rather than a fixed-scale decimal — the core only needs to compare and
/// order weights, never to round-trip a canonical textual scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f64);

impl Quality {
    /// Default quality, used when a media range carries no explicit `q`.
    pub const DEFAULT: Self = Self(1.0);

    /// Quality of zero — a client-declared explicit rejection.
    pub const ZERO: Self = Self(0.0);

    /// Build a `Quality`, checking that `value` is finite and in `[0, 1]`.
    #[inline]
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the underlying value.
    #[inline]
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for Quality {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Eq for Quality {}

impl PartialOrd for Quality {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quality {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // `Quality::new` guarantees finiteness, so `partial_cmp` never fails.
        self.0.partial_cmp(&other.0).expect("Quality is always finite")
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single value parsed out of an `Accept` header.
///
/// ```txt
/// media-range = ( "*/*"
///                / ( type "/" "*" )
///                / ( type "/" subtype )
///              ) parameters
/// ```
///
/// `type` and `subtype` are either `*` or a non-empty token; if `type` is
/// `*` then `subtype` is always `*` too. `parameters` never contains the `q`
/// key — it is extracted into [`Self::q`] at the moment the range is
/// committed.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    pub(crate) r#type: String,
    pub(crate) subtype: String,
    pub(crate) parameters: IndexMap<String, String>,
    pub(crate) q: Quality,
}

impl MediaRange {
    /// The range's type component (`*` or a token).
    #[inline]
    pub fn r#type(&self) -> &str {
        &self.r#type
    }

    /// The range's subtype component (`*` or a token).
    #[inline]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// The range's parameters, in the order they were parsed. Never
    /// contains a `q` entry.
    #[inline]
    pub fn parameters(&self) -> &IndexMap<String, String> {
        &self.parameters
    }

    /// The range's quality weight. Defaults to `1.0` when the header omits
    /// an explicit `q` parameter.
    #[inline]
    pub fn q(&self) -> Quality {
        self.q
    }

    /// Whether the type component is the wildcard `*`.
    #[inline]
    pub fn is_type_wildcard(&self) -> bool {
        self.r#type == "*"
    }

    /// Whether the subtype component is the wildcard `*`.
    #[inline]
    pub fn is_subtype_wildcard(&self) -> bool {
        self.subtype == "*"
    }
}
