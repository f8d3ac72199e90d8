//! Browser-like request headers, rotated per attempt.
//!
//! Rotation only varies the client fingerprint the upstream sees; it is not an access mechanism.

use rand::Rng;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};

/// One complete set of presentation headers.
#[derive(Debug, PartialEq, Eq)]
pub struct HeaderProfile {
    /// Short label for logs.
    pub name: &'static str,
    pub user_agent: &'static str,
    pub accept: &'static str,
    pub accept_language: &'static str,
    pub referer: &'static str,
    pub origin: &'static str,
}

const ACCEPT_JSON: &str = "application/json, text/plain, */*";
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.9";
const SITE_REFERER: &str = "https://eaes.et/";
const SITE_ORIGIN: &str = "https://eaes.et";

/// The fixed pool every attempt draws from.
pub static HEADER_POOL: [HeaderProfile; 5] = [
    HeaderProfile {
        name: "chrome-windows",
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        accept: ACCEPT_JSON,
        accept_language: ACCEPT_LANGUAGE_EN,
        referer: SITE_REFERER,
        origin: SITE_ORIGIN,
    },
    HeaderProfile {
        name: "chrome-macos",
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        accept: ACCEPT_JSON,
        accept_language: ACCEPT_LANGUAGE_EN,
        referer: SITE_REFERER,
        origin: SITE_ORIGIN,
    },
    HeaderProfile {
        name: "chrome-linux",
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        accept: ACCEPT_JSON,
        accept_language: ACCEPT_LANGUAGE_EN,
        referer: SITE_REFERER,
        origin: SITE_ORIGIN,
    },
    HeaderProfile {
        name: "firefox-windows",
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
        accept: ACCEPT_JSON,
        accept_language: ACCEPT_LANGUAGE_EN,
        referer: SITE_REFERER,
        origin: SITE_ORIGIN,
    },
    HeaderProfile {
        name: "firefox-macos",
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:89.0) Gecko/20100101 Firefox/89.0",
        accept: ACCEPT_JSON,
        accept_language: ACCEPT_LANGUAGE_EN,
        referer: SITE_REFERER,
        origin: SITE_ORIGIN,
    },
];

/// Picks a profile uniformly at random from [`HEADER_POOL`].
pub fn choose_profile<R: Rng + ?Sized>(rng: &mut R) -> &'static HeaderProfile {
    &HEADER_POOL[rng.gen_range(0..HEADER_POOL.len())]
}

impl HeaderProfile {
    /// Headers for a JSON POST. Accept-Encoding and Connection are left to reqwest.
    pub fn header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(self.user_agent));
        headers.insert(ACCEPT, HeaderValue::from_static(self.accept));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(self.accept_language));
        headers.insert(REFERER, HeaderValue::from_static(self.referer));
        headers.insert(ORIGIN, HeaderValue::from_static(self.origin));
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_choose_profile_stays_in_pool() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..1_000 {
            let chosen = choose_profile(&mut rng);
            assert!(HEADER_POOL.iter().any(|p| std::ptr::eq(p, chosen)));
        }
    }

    #[test]
    fn test_choose_profile_covers_pool() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1_000 {
            seen.insert(choose_profile(&mut rng).name);
        }
        assert_eq!(seen.len(), HEADER_POOL.len());
    }

    #[test]
    fn test_header_map_pins_site() {
        for profile in &HEADER_POOL {
            let headers = profile.header_map();
            assert_eq!(headers[ORIGIN], "https://eaes.et");
            assert_eq!(headers[REFERER], "https://eaes.et/");
            assert_eq!(headers[CONTENT_TYPE], "application/json");
            assert_eq!(headers[USER_AGENT], profile.user_agent);
        }
    }
}
