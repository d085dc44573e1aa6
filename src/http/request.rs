use std::collections::HashMap;

/// HTTP request methods.
///
/// The server routes GET and POST; every other token on the request line is
/// preserved as `Other` and falls through to the not-found handler rather
/// than failing the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// Any other method token, kept verbatim
    Other(String),
}

impl Method {
    /// Parses an HTTP method token (case-sensitive, as received on the wire).
    ///
    /// # Example
    ///
    /// ```
    /// # use minnow::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Contains all information extracted from the request line, headers, and
/// any Content-Length-delimited body.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, or anything else verbatim)
    pub method: Method,
    /// The request path (e.g. "/echo/abc"), not percent-decoded
    pub path: String,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Request headers as key-value pairs, case-sensitive as received
    pub headers: HashMap<String, String>,
    /// Request body, empty unless Content-Length declared one
    pub body: Vec<u8>,
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// Lookup is case-sensitive; headers are stored exactly as received.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}
