//! I define character-class predicates for the `Accept` grammar.
//!
//! These follow [RFC 9110 §5.6.2](https://www.rfc-editor.org/rfc/rfc9110.html#section-5.6.2)
//! (`token`) and [§5.6.3](https://www.rfc-editor.org/rfc/rfc9110.html#section-5.6.3) (OWS).

/// Checks if given byte is a valid `token` character.
///
/// ```txt
/// token = 1*tchar
/// tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*"
///       / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
///       / DIGIT / ALPHA
/// ```
#[inline]
pub fn is_token_char(byte: u8) -> bool {
    matches!(
        byte,
        b'!' | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'\''
            | b'*'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~'
    ) || byte.is_ascii_alphanumeric()
}

/// Checks if given byte is OWS (optional whitespace): space or tab.
#[inline]
pub fn is_ows(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Checks if given byte is whitespace under the lenient superset this parser
/// accepts in OWS positions: space, or any byte in `0x09..=0x0D`
/// (tab, LF, VT, FF, CR).
#[inline]
pub fn is_lenient_whitespace(byte: u8) -> bool {
    byte == b' ' || (0x09..=0x0D).contains(&byte)
}

/// `/` sentinel.
pub const SLASH: u8 = b'/';
/// `,` sentinel.
pub const COMMA: u8 = b',';
/// `;` sentinel.
pub const SEMICOLON: u8 = b';';
/// `=` sentinel.
pub const EQUALS: u8 = b'=';
/// `"` sentinel.
pub const DQUOTE: u8 = b'"';
/// `\` sentinel.
pub const BACKSLASH: u8 = b'\\';
/// `*` sentinel.
pub const STAR: u8 = b'*';

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b'a', true)]
    #[case(b'Z', true)]
    #[case(b'0', true)]
    #[case(b'*', true)]
    #[case(b'-', true)]
    #[case(b'/', false)]
    #[case(b';', false)]
    #[case(b'"', false)]
    #[case(b' ', false)]
    #[case(b'(', false)]
    fn token_char_classification(#[case] byte: u8, #[case] expected: bool) {
        assert_eq!(is_token_char(byte), expected);
    }

    #[rstest]
    #[case(b' ', true)]
    #[case(b'\t', true)]
    #[case(b'\n', false)]
    #[case(b'a', false)]
    fn ows_classification(#[case] byte: u8, #[case] expected: bool) {
        assert_eq!(is_ows(byte), expected);
    }

    #[rstest]
    #[case(b' ', true)]
    #[case(b'\t', true)]
    #[case(b'\n', true)]
    #[case(0x0B, true)]
    #[case(0x0C, true)]
    #[case(b'\r', true)]
    #[case(b'a', false)]
    fn lenient_whitespace_classification(#[case] byte: u8, #[case] expected: bool) {
        assert_eq!(is_lenient_whitespace(byte), expected);
    }
}
