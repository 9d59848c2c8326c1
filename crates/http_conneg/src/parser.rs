//! I implement the `Accept` header parser: a byte-level state machine per
//! [RFC 9110 §12.5.1](https://www.rfc-editor.org/rfc/rfc9110.html#section-12.5.1).

use indexmap::IndexMap;

use crate::{
    grammar::{is_lenient_whitespace, is_ows, is_token_char, BACKSLASH, COMMA, DQUOTE, EQUALS, SEMICOLON, SLASH, STAR},
    range::{MediaRange, Quality},
};

/// Error raised when an `Accept` header violates the grammar in §12.5.1.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MalformedAccept {
    /// A byte violated the state machine at the given offset.
    #[error("unexpected byte {byte:#04x} at offset {offset}")]
    UnexpectedCharacter {
        /// The offending byte.
        byte: u8,
        /// Its offset in the header.
        offset: usize,
    },

    /// Input ended while a media-range was still incomplete, or while inside
    /// a quoted parameter value immediately after a `\`.
    #[error("input ended unexpectedly")]
    UnexpectedEndOfInput,

    /// A `*` was not immediately followed by `/`, or `*/` was not
    /// immediately followed by `*`.
    #[error("'*' was not followed by '/*'")]
    ExpectedSlash,

    /// The `q` parameter did not parse to a finite number in `[0, 1]`.
    #[error("q value {0:?} is not a finite number in [0, 1]")]
    QOutOfRange(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectType,
    ContinueType,
    ExpectSlashForWildcard,
    ExpectWildcardSubtype,
    ExpectSubtype,
    ContinueSubtype,
    ExpectCommaOrSemi,
    ExpectParamName,
    ContinueParamName,
    ExpectParamValue,
    ContinueParamValue,
    ContinueQuotedParamValue,
}

#[derive(Debug, Default)]
struct InProgress {
    r#type: String,
    subtype: String,
    parameters: IndexMap<String, String>,
    param_name: String,
    param_value: String,
}

impl InProgress {
    fn reset(&mut self) {
        self.r#type.clear();
        self.subtype.clear();
        self.parameters.clear();
        self.param_name.clear();
        self.param_value.clear();
    }

    /// Insert the in-progress `(name, value)` pair into `parameters`,
    /// overwriting a prior value for the same name in place.
    fn commit_param(&mut self) {
        self.parameters
            .insert(std::mem::take(&mut self.param_name), std::mem::take(&mut self.param_value));
    }

    /// Finalize the in-progress range: extract `q` out of `parameters` (or
    /// default to `1.0`), push the range, and reset for the next one.
    fn commit_range(&mut self, ranges: &mut Vec<MediaRange>) -> Result<(), MalformedAccept> {
        let q = match self.parameters.shift_remove("q") {
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .and_then(Quality::new)
                .ok_or(MalformedAccept::QOutOfRange(raw))?,
            None => Quality::DEFAULT,
        };

        ranges.push(MediaRange {
            r#type: std::mem::take(&mut self.r#type),
            subtype: std::mem::take(&mut self.subtype),
            parameters: std::mem::take(&mut self.parameters),
            q,
        });
        self.reset();
        Ok(())
    }
}

/// Parses an `Accept` header value into an unordered list of [`MediaRange`]s.
///
/// An empty string parses to an empty list (no ranges, not an error — the
/// header is simply absent of any media range).
pub fn parse_accept(header: &str) -> Result<Vec<MediaRange>, MalformedAccept> {
    let bytes = header.as_bytes();
    let mut state = State::ExpectType;
    let mut cur = InProgress::default();
    let mut ranges = Vec::new();

    let mut i = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        match state {
            State::ExpectType => {
                if is_lenient_whitespace(b) {
                    i += 1;
                } else if b == STAR {
                    cur.r#type.push('*');
                    state = State::ExpectSlashForWildcard;
                    i += 1;
                } else if is_token_char(b) {
                    cur.r#type.push(b as char);
                    state = State::ContinueType;
                    i += 1;
                } else {
                    return Err(MalformedAccept::UnexpectedCharacter { byte: b, offset: i });
                }
            }
            State::ExpectSlashForWildcard => {
                if b == SLASH {
                    state = State::ExpectWildcardSubtype;
                    i += 1;
                } else {
                    return Err(MalformedAccept::ExpectedSlash);
                }
            }
            State::ExpectWildcardSubtype => {
                if b == STAR {
                    cur.subtype.push('*');
                    state = State::ExpectCommaOrSemi;
                    i += 1;
                } else {
                    return Err(MalformedAccept::ExpectedSlash);
                }
            }
            State::ContinueType => {
                if is_token_char(b) {
                    cur.r#type.push(b as char);
                    i += 1;
                } else if b == SLASH {
                    state = State::ExpectSubtype;
                    i += 1;
                } else {
                    return Err(MalformedAccept::UnexpectedCharacter { byte: b, offset: i });
                }
            }
            State::ExpectSubtype => {
                if is_token_char(b) {
                    cur.subtype.push(b as char);
                    state = State::ContinueSubtype;
                    i += 1;
                } else {
                    return Err(MalformedAccept::UnexpectedCharacter { byte: b, offset: i });
                }
            }
            State::ContinueSubtype => {
                if is_token_char(b) {
                    cur.subtype.push(b as char);
                    i += 1;
                } else if b == SEMICOLON {
                    state = State::ExpectParamName;
                    i += 1;
                } else if b == COMMA {
                    cur.commit_range(&mut ranges)?;
                    state = State::ExpectType;
                    i += 1;
                } else {
                    return Err(MalformedAccept::UnexpectedCharacter { byte: b, offset: i });
                }
            }
            State::ExpectCommaOrSemi => {
                if is_lenient_whitespace(b) {
                    i += 1;
                } else if b == SEMICOLON {
                    state = State::ExpectParamName;
                    i += 1;
                } else if b == COMMA {
                    cur.commit_range(&mut ranges)?;
                    state = State::ExpectType;
                    i += 1;
                } else {
                    return Err(MalformedAccept::UnexpectedCharacter { byte: b, offset: i });
                }
            }
            State::ExpectParamName => {
                if is_ows(b) {
                    i += 1;
                } else if is_token_char(b) {
                    cur.param_name.push(b as char);
                    state = State::ContinueParamName;
                    i += 1;
                } else {
                    return Err(MalformedAccept::UnexpectedCharacter { byte: b, offset: i });
                }
            }
            State::ContinueParamName => {
                if is_token_char(b) {
                    cur.param_name.push(b as char);
                    i += 1;
                } else if b == EQUALS {
                    cur.param_value.clear();
                    state = State::ExpectParamValue;
                    i += 1;
                } else {
                    return Err(MalformedAccept::UnexpectedCharacter { byte: b, offset: i });
                }
            }
            State::ExpectParamValue => {
                if b == DQUOTE {
                    state = State::ContinueQuotedParamValue;
                    i += 1;
                } else if is_token_char(b) {
                    cur.param_value.push(b as char);
                    state = State::ContinueParamValue;
                    i += 1;
                } else {
                    return Err(MalformedAccept::UnexpectedCharacter { byte: b, offset: i });
                }
            }
            State::ContinueParamValue => {
                if is_token_char(b) {
                    cur.param_value.push(b as char);
                    i += 1;
                } else if b == SEMICOLON {
                    cur.commit_param();
                    state = State::ExpectParamName;
                    i += 1;
                } else if b == COMMA {
                    cur.commit_param();
                    cur.commit_range(&mut ranges)?;
                    state = State::ExpectType;
                    i += 1;
                } else {
                    return Err(MalformedAccept::UnexpectedCharacter { byte: b, offset: i });
                }
            }
            State::ContinueQuotedParamValue => {
                if b == DQUOTE {
                    cur.commit_param();
                    state = State::ExpectCommaOrSemi;
                    i += 1;
                } else if b == BACKSLASH {
                    i += 1;
                    if i >= bytes.len() {
                        return Err(MalformedAccept::UnexpectedEndOfInput);
                    }
                    cur.param_value.push(bytes[i] as char);
                    i += 1;
                } else {
                    cur.param_value.push(b as char);
                    i += 1;
                }
            }
        }
    }

    match state {
        // Clean terminal state: header was empty, or ended right after a
        // comma, or right after a fully-closed wildcard/param value.
        State::ExpectType => {}
        // A media-range was left incomplete before a subtype was ever
        // established — this cannot be salvaged into a valid MediaRange.
        State::ContinueType
        | State::ExpectSlashForWildcard
        | State::ExpectWildcardSubtype
        | State::ExpectSubtype => {
            return Err(MalformedAccept::UnexpectedEndOfInput);
        }
        // An unquoted parameter value is self-delimiting: reaching EOF here
        // unambiguously means the value is complete.
        State::ContinueParamValue => {
            cur.commit_param();
            cur.commit_range(&mut ranges)?;
        }
        // A quoted value with no closing quote is genuinely ambiguous and is
        // dropped rather than guessed at; the range still commits with
        // whatever parameters were already finalized.
        State::ContinueQuotedParamValue
        | State::ContinueSubtype
        | State::ExpectCommaOrSemi
        | State::ExpectParamName
        | State::ContinueParamName
        | State::ExpectParamValue => {
            cur.commit_range(&mut ranges)?;
        }
    }

    Ok(ranges)
}
