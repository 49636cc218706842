//! Sign-in domain watchlist
//!
//! The fixed set of hostnames whose navigations are validated. Membership
//! is exact hostname equality; subdomains of a watched domain do not match.

/// Microsoft identity domains watched by default
pub const MICROSOFT_SIGNIN_DOMAINS: [&str; 4] = [
    "login.microsoftonline.com",
    "login.live.com",
    "login.windows.net",
    "account.microsoft.com",
];

/// Set of hostnames that trigger validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    domains: Vec<String>,
}

impl Watchlist {
    /// Build a watchlist from hostnames; entries are normalized to lowercase
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Check whether a hostname is watched (case-insensitive exact match)
    pub fn contains(&self, hostname: &str) -> bool {
        let hostname = hostname.to_lowercase();
        self.domains.iter().any(|d| *d == hostname)
    }

    /// Watched hostnames, in configuration order
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Number of watched hostnames
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether the watchlist is empty
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::new(MICROSOFT_SIGNIN_DOMAINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_watchlist() {
        let watchlist = Watchlist::default();
        assert_eq!(watchlist.len(), 4);
        assert!(watchlist.contains("login.microsoftonline.com"));
        assert!(watchlist.contains("account.microsoft.com"));
        assert!(!watchlist.contains("example.com"));
    }

    #[test]
    fn test_exact_match_only() {
        let watchlist = Watchlist::default();
        // Subdomains and parent domains of a watched entry do not match
        assert!(!watchlist.contains("evil.login.microsoftonline.com"));
        assert!(!watchlist.contains("microsoftonline.com"));
    }

    #[test]
    fn test_case_insensitive() {
        let watchlist = Watchlist::new(["Login.Live.com"]);
        assert!(watchlist.contains("login.live.com"));
        assert!(watchlist.contains("LOGIN.LIVE.COM"));
    }

    #[test]
    fn test_blank_entries_dropped() {
        let watchlist = Watchlist::new(["login.live.com", "", "  "]);
        assert_eq!(watchlist.len(), 1);
    }
}
