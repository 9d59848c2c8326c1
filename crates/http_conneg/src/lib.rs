//! This crate implements an `Accept`-header content-negotiation core: given
//! the media types a server is willing to produce and a client's `Accept`
//! header ([RFC 9110 §12.5.1](https://www.rfc-editor.org/rfc/rfc9110.html#section-12.5.1)),
//! it selects the single media type the server should respond with.
//!
//! The crate is a pure core: it neither performs I/O nor depends on any
//! particular concurrency model or HTTP server. Construct a [`Matcher`] once
//! per server (or per route, if different routes offer different
//! representations), and call [`Matcher::select`] per request.
//!
//! ```
//! use http_conneg::Matcher;
//!
//! let matcher = Matcher::new(["application/json", "text/html"]);
//!
//! assert_eq!(matcher.select(None).unwrap(), Some("application/json".to_string()));
//! assert_eq!(
//!     matcher.select(Some("text/html")).unwrap(),
//!     Some("text/html".to_string())
//! );
//! assert_eq!(matcher.select(Some("application/xml")).unwrap(), None);
//! ```

#![warn(missing_docs)]
#![deny(unused_qualifications)]

pub mod cache;
pub mod digest;
pub mod grammar;
pub mod matcher;
pub mod parser;
pub mod precedence;
pub mod range;

pub use cache::MatcherCache;
pub use digest::ServerTypeDigest;
pub use matcher::Matcher;
pub use parser::MalformedAccept;
pub use range::{MediaRange, Quality};
