//! Per-service query rewriting.
//!
//! Rewrites operate on the original URL text rather than on a re-serialized
//! `Url`: only the query component is touched, and retained `key=value`
//! pairs are copied byte-for-byte so percent-encoding, host case and ports
//! all survive unchanged.

use url::form_urlencoded;
use url::Url;

use crate::host::{is_youtube_short, Service};

/// Parameters that affect playback on regular YouTube links.
pub const YOUTUBE_ALLOWED_PARAMS: &[&str] = &["v", "t", "time_continue", "list", "index"];

/// Short links already carry the video id in the path; only the timestamp matters.
pub const YOUTUBE_SHORT_ALLOWED_PARAMS: &[&str] = &["t"];

/// Raw URL text split around its query component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawParts<'a> {
    /// Scheme, authority and path.
    base: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> RawParts<'a> {
    fn split(raw: &'a str) -> Self {
        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (raw, None),
        };
        let (base, query) = match rest.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (rest, None),
        };
        Self {
            base,
            query,
            fragment,
        }
    }

    /// Reassemble with `query` in place of the original. An empty query
    /// drops the `?` entirely.
    fn with_query(&self, query: &str) -> String {
        let mut out = String::with_capacity(
            self.base.len() + query.len() + self.fragment.map_or(0, |f| f.len() + 1) + 1,
        );
        out.push_str(self.base);
        if !query.is_empty() {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

/// Keep only the `key=value` pairs whose decoded key is in `allowed`,
/// preserving their order and raw encoding. With `first_only`, later
/// repeats of an already kept key are dropped.
fn retain_params(query: &str, allowed: &[&str], first_only: bool) -> String {
    let mut seen: Vec<String> = Vec::new();
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let Some((key, _)) = form_urlencoded::parse(pair.as_bytes()).next() else {
                return false;
            };
            if !allowed.iter().any(|a| *a == key) {
                return false;
            }
            if first_only {
                if seen.iter().any(|s| *s == key) {
                    return false;
                }
                seen.push(key.into_owned());
            }
            true
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn rewrite_query(raw: &str, allowed: &[&str], first_only: bool) -> String {
    let parts = RawParts::split(raw);
    match parts.query {
        Some(query) => parts.with_query(&retain_params(query, allowed, first_only)),
        None => raw.to_string(),
    }
}

/// Strip everything except playback-relevant parameters from a YouTube link.
///
/// Short links rebuild their query from a single timestamp, so only the
/// first `t` survives there.
pub fn rewrite_youtube(raw: &str, url: &Url) -> String {
    if is_youtube_short(url) {
        rewrite_query(raw, YOUTUBE_SHORT_ALLOWED_PARAMS, true)
    } else {
        rewrite_query(raw, YOUTUBE_ALLOWED_PARAMS, false)
    }
}

/// Drop the whole query string from a Twitter/X link.
pub fn rewrite_twitter(raw: &str) -> String {
    rewrite_query(raw, &[], false)
}

/// Dispatch to the rewriter for `service`. `Unknown` is returned unchanged.
pub fn rewrite(raw: &str, url: &Url, service: Service) -> String {
    match service {
        Service::YouTube => rewrite_youtube(raw, url),
        Service::Twitter => rewrite_twitter(raw),
        Service::Unknown => raw.to_string(),
    }
}
