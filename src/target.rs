use std::fmt;

use crate::error::VerifyError;

/// Root address of the deployment under test, with trailing slashes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn parse(raw: &str) -> Result<Self, VerifyError> {
        if raw.trim().is_empty() {
            return Err(VerifyError::InvalidArgument("no URL provided".to_string()));
        }
        let (scheme, rest) = if let Some(rest) = raw.strip_prefix("https://") {
            ("https://", rest)
        } else if let Some(rest) = raw.strip_prefix("http://") {
            ("http://", rest)
        } else {
            return Err(VerifyError::InvalidArgument(format!(
                "URL must start with http:// or https:// (got '{raw}')"
            )));
        };
        // Only the part after the scheme is trimmed; "https://" must keep its slashes.
        let rest = rest.trim_end_matches('/');
        if rest.is_empty() {
            return Err(VerifyError::InvalidArgument(format!(
                "URL has no host (got '{raw}')"
            )));
        }
        Ok(BaseUrl(format!("{scheme}{rest}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a path (expected to begin with `/`) to the base.
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.0, path)
        } else {
            format!("{}/{}", self.0, path)
        }
    }

    pub fn is_https(&self) -> bool {
        self.0.starts_with("https://")
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let url = BaseUrl::parse("https://anime.example.com/").unwrap();
        assert_eq!(url.as_str(), "https://anime.example.com");
    }

    #[test]
    fn test_normalization_idempotent() {
        let once = BaseUrl::parse("https://anime.example.com//").unwrap();
        let twice = BaseUrl::parse(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_scheme_only_rejected() {
        for raw in ["https://", "http:///", "https:////"] {
            let err = BaseUrl::parse(raw).unwrap_err();
            assert!(err.to_string().contains("no host"), "{raw}");
        }
    }

    #[test]
    fn test_scheme_slashes_survive_normalization() {
        let once = BaseUrl::parse("https://a.example///").unwrap();
        assert_eq!(once.as_str(), "https://a.example");
        assert!(once.is_https());
        assert_eq!(BaseUrl::parse(once.as_str()).unwrap(), once);
    }

    #[test]
    fn test_leading_whitespace_rejected() {
        let err = BaseUrl::parse(" https://anime.example.com").unwrap_err();
        assert!(err.to_string().contains("http:// or https://"));
    }

    #[test]
    fn test_empty_rejected() {
        let err = BaseUrl::parse("   ").unwrap_err();
        assert!(err.to_string().contains("no URL provided"));
    }

    #[test]
    fn test_missing_scheme_rejected() {
        for raw in ["anime.example.com", "ftp://anime.example.com", "httpx://a"] {
            let err = BaseUrl::parse(raw).unwrap_err();
            assert!(err.to_string().contains("http:// or https://"), "{raw}");
        }
    }

    #[test]
    fn test_join_and_scheme() {
        let url = BaseUrl::parse("http://localhost:4173/").unwrap();
        assert_eq!(url.join("/favorites"), "http://localhost:4173/favorites");
        assert_eq!(url.join("vite.svg"), "http://localhost:4173/vite.svg");
        assert!(!url.is_https());
        assert!(BaseUrl::parse("https://a.example").unwrap().is_https());
    }
}
