//! Client configuration

use payment_form::ReturnUrls;

/// Configuration for connecting to the portal backend
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Page the provider sends the payer back to on success
    pub success_url: String,

    /// Page the provider sends the payer back to on failure
    pub fail_url: String,
}

impl PortalConfig {
    /// Create a new configuration with default return pages
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            success_url: "http://localhost:8080/payment/success".to_string(),
            fail_url: "http://localhost:8080/payment/fail".to_string(),
        }
    }

    /// Read the configuration from environment variables
    ///
    /// `PORTAL_API_URL`, `PORTAL_TIMEOUT_SECS`, `PORTAL_SUCCESS_URL` and
    /// `PORTAL_FAIL_URL`; missing variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = match std::env::var("PORTAL_API_URL") {
            Ok(url) => Self::new(url),
            Err(_) => Self::default(),
        };
        if let Ok(secs) = std::env::var("PORTAL_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse()
        {
            config.timeout = secs;
        }
        if let Ok(url) = std::env::var("PORTAL_SUCCESS_URL") {
            config.success_url = url;
        }
        if let Ok(url) = std::env::var("PORTAL_FAIL_URL") {
            config.fail_url = url;
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the pages the provider returns the payer to
    pub fn with_return_urls(
        mut self,
        success_url: impl Into<String>,
        fail_url: impl Into<String>,
    ) -> Self {
        self.success_url = success_url.into();
        self.fail_url = fail_url.into();
        self
    }

    /// Return URLs in the shape the form engine takes
    pub fn return_urls(&self) -> ReturnUrls {
        ReturnUrls::new(self.success_url.clone(), self.fail_url.clone())
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_builders() {
        let config = PortalConfig::new("https://portal.example.com/api")
            .with_timeout(5)
            .with_return_urls("https://p/ok", "https://p/fail");

        assert_eq!(config.timeout, 5);
        let urls = config.return_urls();
        assert_eq!(urls.success_url, "https://p/ok");
        assert_eq!(urls.fail_url, "https://p/fail");
    }
}
