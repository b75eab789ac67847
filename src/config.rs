use std::env;

/// Fallback API address on the internal compose network.
pub const DEFAULT_SERVER_API_URL: &str = "http://gateway:8080/api";
/// Fallback API address reachable from the host machine.
pub const DEFAULT_BROWSER_API_URL: &str = "http://localhost:8080/api";

/// Execution context a resolved API base URL is meant for.
///
/// Server-side rendering talks to the gateway over the internal network;
/// anything handed to a browser has to use a host-reachable address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderContext {
    Server,
    Browser,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    // Empty/unset means "use the well-known default for that context".
    pub api_url: Option<String>,
    pub public_api_url: Option<String>,
    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);

        let api_url = env::var("API_URL").ok().filter(|v| !v.is_empty());
        let public_api_url = env::var("PUBLIC_API_URL").ok().filter(|v| !v.is_empty());

        let request_timeout_seconds = env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);

        Self {
            host,
            port,
            api_url,
            public_api_url,
            request_timeout_seconds,
        }
    }

    /// Resolve the API base URL for an execution context.
    ///
    /// The two contexts are independent: changing the browser-facing URL
    /// never affects what server-side rendering connects to, and vice versa.
    pub fn base_url(&self, ctx: RenderContext) -> String {
        match ctx {
            RenderContext::Server => self
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_SERVER_API_URL.to_string()),
            RenderContext::Browser => self
                .public_api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BROWSER_API_URL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: Option<&str>, public_api_url: Option<&str>) -> Config {
        Config {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_url: api_url.map(str::to_string),
            public_api_url: public_api_url.map(str::to_string),
            request_timeout_seconds: 10,
        }
    }

    #[test]
    fn unset_urls_resolve_to_defaults() {
        let cfg = config(None, None);
        assert_eq!(cfg.base_url(RenderContext::Server), DEFAULT_SERVER_API_URL);
        assert_eq!(cfg.base_url(RenderContext::Browser), DEFAULT_BROWSER_API_URL);
    }

    #[test]
    fn contexts_resolve_independently() {
        let cfg = config(Some("http://gateway.internal:9000/api"), None);
        assert_eq!(
            cfg.base_url(RenderContext::Server),
            "http://gateway.internal:9000/api"
        );
        assert_eq!(cfg.base_url(RenderContext::Browser), DEFAULT_BROWSER_API_URL);

        let cfg = config(None, Some("http://example.test:8080/api"));
        assert_eq!(cfg.base_url(RenderContext::Server), DEFAULT_SERVER_API_URL);
        assert_eq!(
            cfg.base_url(RenderContext::Browser),
            "http://example.test:8080/api"
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let cfg = config(Some("http://gw:1/api"), Some("http://pub:2/api"));
        assert_eq!(
            cfg.base_url(RenderContext::Server),
            cfg.base_url(RenderContext::Server)
        );
        assert_eq!(
            cfg.base_url(RenderContext::Browser),
            cfg.base_url(RenderContext::Browser)
        );
    }

    #[test]
    fn from_env_treats_empty_as_unset() {
        std::env::set_var("API_URL", "");
        std::env::remove_var("PUBLIC_API_URL");
        let cfg = Config::from_env();
        assert_eq!(cfg.api_url, None);
        assert_eq!(cfg.public_api_url, None);
        assert_eq!(cfg.base_url(RenderContext::Server), DEFAULT_SERVER_API_URL);
        std::env::remove_var("API_URL");
    }
}
