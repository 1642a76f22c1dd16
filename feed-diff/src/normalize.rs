//! Value normalization for field comparison.
//!
//! Two canonical forms: plain text (surrounding whitespace stripped) and
//! URLs (path and query only, so feeds served from different hosts or
//! schemes still compare equal).

use url::Url;

/// Base for resolving relative references. Only path and query survive
/// normalization, so this host never appears in output.
const RELATIVE_BASE: &str = "http://feed.invalid/";

/// Strips surrounding whitespace. Total: never fails, empty stays empty.
pub fn normalize_text(s: &str) -> String {
    s.trim().to_string()
}

/// Reduces a URL to `path`, plus `?query` when a non-empty query is present.
///
/// Scheme, host, port, credentials and fragment are discarded. Values the
/// URL parser rejects degrade to a best-effort path; this never fails.
pub fn normalize_url(s: &str) -> String {
    let s = normalize_text(s);
    if s.is_empty() {
        return String::new();
    }
    match parse_lenient(&s) {
        Some(url) => {
            let mut out = url.path().to_string();
            if let Some(query) = url.query() {
                if !query.is_empty() {
                    out.push('?');
                    out.push_str(query);
                }
            }
            out
        }
        None => salvage_path(&s),
    }
}

/// Parses absolute URLs directly; relative references (including the
/// scheme-relative `//host/p` form) resolve against a throwaway base.
fn parse_lenient(s: &str) -> Option<Url> {
    match Url::parse(s) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(RELATIVE_BASE).ok()?;
            base.join(s).ok()
        }
        Err(_) => None,
    }
}

/// Last-resort recovery for values the parser rejects outright: keep
/// everything from the first slash after any scheme marker, minus the
/// fragment.
fn salvage_path(s: &str) -> String {
    let rest = match s.find("://") {
        Some(at) => &s[at + 3..],
        None => s,
    };
    match rest.find('/') {
        Some(at) => {
            let tail = &rest[at..];
            match tail.find('#') {
                Some(frag) => tail[..frag].to_string(),
                None => tail.to_string(),
            }
        }
        None => String::new(),
    }
}
