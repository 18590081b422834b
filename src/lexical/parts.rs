//! Best-effort URL component splitting
//!
//! `url::Url::parse` rejects relative or malformed input and normalizes what it
//! accepts (an empty path becomes `/`, hosts get punycoded). Lexical features
//! must describe the string as written, so components are cut out of the raw
//! text with the generic RFC 3986 grammar, which matches every input.
//! `url::Host` is only consulted to tell IP literals from names.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;
use url::Host;

// RFC 3986 appendix B
const URI_PATTERN: &str = r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$";

// The same grammar with the scheme group removed
const SCHEMELESS_PATTERN: &str = r"(?s)^(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$";

const SCHEME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*$";

static URI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URI_PATTERN).expect("Failed to compile URI pattern - this is a bug"));

static SCHEMELESS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(SCHEMELESS_PATTERN).expect("Failed to compile scheme-less URI pattern - this is a bug")
});

static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SCHEME_PATTERN).expect("Failed to compile scheme pattern - this is a bug"));

/// Raw components of a URL string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

/// A host as it matters for feature extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedHost {
    /// A DNS name, lower-cased, without trailing dot
    Domain(String),
    /// A literal IPv4 or IPv6 address, as written
    Ip(String),
}

/// Splits a URL string into its raw components
///
/// A leading `host:port` also matches the scheme production, so a candidate
/// scheme is only kept when it reads as one. Otherwise the whole
/// string is split as a scheme-less reference.
///
/// # Examples
///
/// ```
/// use phishing_features::lexical::split_url;
///
/// let parts = split_url("https://user@Example.com:8443/a/b?x=1&y=2#top");
/// assert_eq!(parts.scheme, Some("https"));
/// assert_eq!(parts.authority, Some("user@Example.com:8443"));
/// assert_eq!(parts.path, "/a/b");
/// assert_eq!(parts.query, Some("x=1&y=2"));
/// assert_eq!(parts.fragment, Some("top"));
/// ```
pub fn split_url(url: &str) -> UrlParts<'_> {
    if let Some(captures) = URI_REGEX.captures(url) {
        let scheme = captures.get(1).map(|m| m.as_str());
        let keep = match scheme {
            Some(scheme) => is_scheme(scheme, &url[scheme.len() + 1..]),
            None => true,
        };

        if keep {
            return UrlParts {
                scheme,
                authority: captures.get(2).map(|m| m.as_str()),
                path: captures.get(3).map(|m| m.as_str()).unwrap_or(""),
                query: captures.get(4).map(|m| m.as_str()),
                fragment: captures.get(5).map(|m| m.as_str()),
            };
        }
    }

    match SCHEMELESS_REGEX.captures(url) {
        Some(captures) => UrlParts {
            scheme: None,
            authority: captures.get(1).map(|m| m.as_str()),
            path: captures.get(2).map(|m| m.as_str()).unwrap_or(""),
            query: captures.get(3).map(|m| m.as_str()),
            fragment: captures.get(4).map(|m| m.as_str()),
        },
        None => UrlParts {
            path: url,
            ..UrlParts::default()
        },
    }
}

/// Decides whether the text before the first `:` is a real scheme
///
/// `rest` is everything after that colon. A scheme followed by `//` only has
/// to be well-formed. Without `//`, a dotted name (`www.paypal.com:443/login`)
/// or a port number (`localhost:8080`) marks a scheme-less host instead.
fn is_scheme(scheme: &str, rest: &str) -> bool {
    if !SCHEME_REGEX.is_match(scheme) {
        return false;
    }
    if rest.starts_with("//") {
        return true;
    }
    if scheme.contains('.') {
        return false;
    }

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let after_port = rest[digits..].chars().next();
    !(digits > 0 && matches!(after_port, None | Some('/' | '?' | '#')))
}

impl<'a> UrlParts<'a> {
    /// Returns true if the scheme is `https` (any case)
    pub fn is_https(&self) -> bool {
        self.scheme
            .map(|s| s.eq_ignore_ascii_case("https"))
            .unwrap_or(false)
    }

    /// Extracts the host
    ///
    /// Without an authority (`example.com/login`) the first path segment is
    /// taken as the host, the way a browser address bar reads it.
    pub fn host(&self) -> Option<ParsedHost> {
        let raw = match self.authority {
            Some(authority) => host_from_authority(authority),
            None if self.scheme.is_none() => {
                host_from_authority(self.path.split('/').next().unwrap_or(""))
            }
            None => "",
        };

        let raw = raw.trim_end_matches('.');
        if raw.is_empty() {
            return None;
        }

        Some(classify_host(raw))
    }
}

/// Strips userinfo and port from an authority
fn host_from_authority(authority: &str) -> &str {
    let host_port = authority
        .rsplit_once('@')
        .map(|(_, rest)| rest)
        .unwrap_or(authority);

    if let Some(bracketed) = host_port.strip_prefix('[') {
        return bracketed.split(']').next().unwrap_or("");
    }

    host_port.split(':').next().unwrap_or("")
}

/// Tells IP literals from names; names keep their written (Unicode) form
fn classify_host(raw: &str) -> ParsedHost {
    if raw.parse::<IpAddr>().is_ok() {
        return ParsedHost::Ip(raw.to_string());
    }

    match Host::parse(raw) {
        Ok(Host::Ipv4(_)) | Ok(Host::Ipv6(_)) => ParsedHost::Ip(raw.to_string()),
        Ok(Host::Domain(_)) | Err(_) => ParsedHost::Domain(raw.to_lowercase()),
    }
}
