//! Host classification: which known service, if any, a URL points at.

use url::Url;

/// Hosts served by YouTube. Exact match only, no subdomain wildcarding.
pub const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be"];

/// Hosts served by Twitter/X.
pub const TWITTER_HOSTS: &[&str] = &[
    "twitter.com",
    "www.twitter.com",
    "mobile.twitter.com",
    "x.com",
    "www.x.com",
];

/// YouTube's short-link host.
pub const YOUTUBE_SHORT_HOST: &str = "youtu.be";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    YouTube,
    Twitter,
    Unknown,
}

/// Classify a parsed URL by its host. URLs without a host are `Unknown`.
pub fn classify(url: &Url) -> Service {
    url.host_str().map(classify_host).unwrap_or(Service::Unknown)
}

/// Classify a bare host name, case-insensitively.
pub fn classify_host(host: &str) -> Service {
    let host = host.to_ascii_lowercase();
    if YOUTUBE_HOSTS.contains(&host.as_str()) {
        Service::YouTube
    } else if TWITTER_HOSTS.contains(&host.as_str()) {
        Service::Twitter
    } else {
        Service::Unknown
    }
}

/// Whether `url` uses YouTube's short-link host.
pub fn is_youtube_short(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|h| h.eq_ignore_ascii_case(YOUTUBE_SHORT_HOST))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).expect("valid test url")
    }

    #[test]
    fn youtube_variants_classify() {
        for url in [
            "https://youtube.com/watch?v=a",
            "https://www.youtube.com/watch?v=a",
            "https://m.youtube.com/watch?v=a",
            "https://youtu.be/a",
        ] {
            assert_eq!(classify(&parse(url)), Service::YouTube, "{url}");
        }
    }

    #[test]
    fn twitter_variants_classify() {
        for url in [
            "https://twitter.com/u",
            "https://www.twitter.com/u",
            "https://mobile.twitter.com/u",
            "https://x.com/u",
            "https://www.x.com/u",
        ] {
            assert_eq!(classify(&parse(url)), Service::Twitter, "{url}");
        }
    }

    #[test]
    fn host_match_is_case_insensitive() {
        assert_eq!(classify_host("WWW.YouTube.COM"), Service::YouTube);
        assert_eq!(classify_host("X.com"), Service::Twitter);
    }

    #[test]
    fn unlisted_subdomains_are_unknown() {
        assert_eq!(classify(&parse("https://music.youtube.com/watch?v=a")), Service::Unknown);
        assert_eq!(classify(&parse("https://api.x.com/2/tweets")), Service::Unknown);
        assert_eq!(classify(&parse("https://notyoutube.com/")), Service::Unknown);
    }

    #[test]
    fn hostless_url_is_unknown() {
        assert_eq!(classify(&parse("mailto:someone@example.com")), Service::Unknown);
    }

    #[test]
    fn short_host_detection() {
        assert!(is_youtube_short(&parse("https://youtu.be/abc")));
        assert!(!is_youtube_short(&parse("https://www.youtube.com/watch?v=abc")));
    }
}
