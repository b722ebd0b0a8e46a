//! Request descriptors handed to the outbound transport.

use serde::Serialize;
use serde_json::Value;

use super::endpoint::EndpointConfig;

/// Header carrying the Dolibarr API key.
pub const API_KEY_HEADER: &str = "DOLAPIKEY";

/// Client identifier sent with every request.
pub const USER_AGENT: &str = concat!("dolibarr-mcp/", env!("CARGO_PKG_VERSION"));

/// HTTP methods the Dolibarr REST API is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Parse a method name, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Whether a JSON body may be attached to this method.
    pub fn accepts_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// What a successful response body is expected to look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// Any JSON value (or raw text).
    #[default]
    Any,
    /// A JSON array; anything else is reported as an empty list.
    List,
}

/// A fully-built HTTP request against the Dolibarr API.
#[derive(Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Endpoint segment relative to the API root (e.g. `thirdparties/4`).
    pub path: String,
    /// Absolute URL without the query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    #[serde(skip_serializing)]
    pub headers: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    pub shape: ResponseShape,
}

impl RequestDescriptor {
    /// Start a request for `endpoint`, with the standard header set.
    pub fn new(method: HttpMethod, endpoint: &str, config: &EndpointConfig) -> Self {
        let path = endpoint.trim_start_matches('/').to_string();
        Self {
            method,
            url: config.url_for(&path),
            path,
            query: Vec::new(),
            headers: standard_headers(config),
            body: None,
            shape: ResponseShape::Any,
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body. Ignored for methods that do not carry one.
    pub fn with_body(mut self, body: Value) -> Self {
        if self.method.accepts_body() {
            self.body = Some(body);
        }
        self
    }

    pub fn with_shape(mut self, shape: ResponseShape) -> Self {
        self.shape = shape;
        self
    }

    /// Look up a header value, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// URL including the encoded query string, for logging.
    pub fn display_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        match serde_urlencoded::to_string(&self.query) {
            Ok(qs) => format!("{}?{}", self.url, qs),
            Err(_) => self.url.clone(),
        }
    }
}

impl std::fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("RequestDescriptor")
            .field("method", &self.method)
            .field("url", &self.display_url())
            .field("headers", &header_names)
            .field("body", &self.body)
            .field("shape", &self.shape)
            .finish()
    }
}

fn standard_headers(config: &EndpointConfig) -> Vec<(String, String)> {
    vec![
        (API_KEY_HEADER.to_string(), config.api_key().to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
        ("User-Agent".to_string(), USER_AGENT.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint() -> EndpointConfig {
        EndpointConfig::resolve("https://erp.example.com", "0123456789abcdef").unwrap()
    }

    #[test]
    fn test_method_parse() {
        assert_eq!(HttpMethod::parse("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse(" Delete "), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::parse("PATCH"), None);
    }

    #[test]
    fn test_descriptor_carries_standard_headers() {
        let req = RequestDescriptor::new(HttpMethod::Get, "/users", &endpoint());
        assert_eq!(req.path, "users");
        assert_eq!(req.url, "https://erp.example.com/api/index.php/users");
        assert_eq!(req.header("dolapikey"), Some("0123456789abcdef"));
        assert_eq!(req.header("Accept"), Some("application/json"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert!(req.header("User-Agent").unwrap().starts_with("dolibarr-mcp/"));
    }

    #[test]
    fn test_body_only_for_post_and_put() {
        let get = RequestDescriptor::new(HttpMethod::Get, "users", &endpoint())
            .with_body(json!({"a": 1}));
        assert!(get.body.is_none());

        let put = RequestDescriptor::new(HttpMethod::Put, "users/1", &endpoint())
            .with_body(json!({"a": 1}));
        assert_eq!(put.body, Some(json!({"a": 1})));
    }

    #[test]
    fn test_display_url_encodes_query() {
        let req = RequestDescriptor::new(HttpMethod::Get, "products", &endpoint())
            .with_query("limit", 5)
            .with_query("sqlfilters", "(t.ref:like:'A%')");
        let url = req.display_url();
        assert!(url.starts_with("https://erp.example.com/api/index.php/products?limit=5&sqlfilters="));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let req = RequestDescriptor::new(HttpMethod::Get, "users", &endpoint());
        let debug_str = format!("{:?}", req);
        assert!(debug_str.contains("DOLAPIKEY"));
        assert!(!debug_str.contains("0123456789abcdef"));
    }
}
