//! Public URL normalizer.

use url::Url;

use crate::host::{classify, Service};
use crate::query;

/// Clean tracking parameters from a single URL.
///
/// Never fails: input that does not parse as an absolute URL, or whose host
/// is not a known service, comes back unchanged. Idempotent.
pub fn clean_url(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };

    match classify(&url) {
        Service::Unknown => raw.to_string(),
        service => query::rewrite(raw, &url, service),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_short_link_strips_si() {
        assert_eq!(
            clean_url("https://youtu.be/ko70cExuzZM?si=yO4tqv9f73N1pCUp"),
            "https://youtu.be/ko70cExuzZM"
        );
    }

    #[test]
    fn youtube_strips_tracking_params() {
        let cleaned = clean_url(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&si=ABC123&utm_source=foo&fbclid=XYZ",
        );
        assert_eq!(cleaned, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn youtube_preserves_timestamp_and_playlist() {
        let raw = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120&list=PL123&index=5";
        assert_eq!(clean_url(raw), raw);
    }

    #[test]
    fn youtube_keeps_time_continue() {
        assert_eq!(
            clean_url("https://youtube.com/watch?time_continue=7&v=abc&pp=xyz"),
            "https://youtube.com/watch?time_continue=7&v=abc"
        );
    }

    #[test]
    fn twitter_strips_all_params() {
        assert_eq!(
            clean_url("https://x.com/user/status/1234567890?s=20&t=ABCDEFG"),
            "https://x.com/user/status/1234567890"
        );
    }

    #[test]
    fn unsupported_hosts_are_untouched() {
        let raw = "https://example.com/page?foo=bar&utm_source=baz";
        assert_eq!(clean_url(raw), raw);
    }

    #[test]
    fn garbage_input_is_returned_as_is() {
        for raw in ["not a url at all", "", "://", "http://", "youtu.be/abc?si=1"] {
            assert_eq!(clean_url(raw), raw);
        }
    }

    #[test]
    fn host_case_and_port_are_preserved() {
        assert_eq!(
            clean_url("https://WWW.YouTube.com:443/watch?v=abc&si=1"),
            "https://WWW.YouTube.com:443/watch?v=abc"
        );
    }

    #[test]
    fn clean_url_is_idempotent() {
        for raw in [
            "https://youtu.be/ko70cExuzZM?si=yO4tqv9f73N1pCUp&t=3",
            "https://youtu.be/a?t=1&si=x&t=2",
            "https://www.youtube.com/watch?si=1&v=abc&t=120&list=PL1&index=2&feature=x",
            "https://mobile.twitter.com/a/status/1?s=20#x",
            "https://example.com/?utm_source=z",
            "plain words",
            "https://x.com/a?",
        ] {
            let once = clean_url(raw);
            assert_eq!(clean_url(&once), once, "{raw}");
        }
    }
}
