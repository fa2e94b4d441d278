//! HTTP request carrying a form submission.
//!
//! [`HttpRequest`] keeps only what form binding needs: the method, path,
//! query-string parameters and the urlencoded POST body.

use http::{Method, Request};

use crate::querydict::QueryDict;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// A submitted HTTP request.
///
/// # Examples
///
/// ```
/// use formx_http::HttpRequest;
///
/// let request = HttpRequest::builder()
///     .method(http::Method::POST)
///     .path("/signup")
///     .content_type("application/x-www-form-urlencoded")
///     .body(b"Name=Ann&Agree=on".to_vec())
///     .build();
///
/// assert_eq!(request.post().get("Name"), Some("Ann"));
/// assert_eq!(request.form_value("Agree"), Some("on"));
/// ```
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    path: String,
    query_string: String,
    content_type: Option<String>,
    get: QueryDict,
    post: QueryDict,
}

impl HttpRequest {
    /// Creates a new [`HttpRequestBuilder`].
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    /// Creates an `HttpRequest` from an `http::Request` whose body has
    /// already been collected.
    pub fn from_http(request: Request<Vec<u8>>) -> Self {
        let (parts, body) = request.into_parts();
        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let mut builder = Self::builder()
            .method(parts.method)
            .path(parts.uri.path())
            .query_string(parts.uri.query().unwrap_or(""))
            .body(body);
        if let Some(ct) = content_type {
            builder = builder.content_type(&ct);
        }
        builder.build()
    }

    /// Returns the HTTP method.
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string.
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Returns the content type, if one was sent.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the query-string parameters.
    pub const fn get(&self) -> &QueryDict {
        &self.get
    }

    /// Returns the urlencoded POST parameters.
    pub const fn post(&self) -> &QueryDict {
        &self.post
    }

    /// Returns the first value for `key`, preferring the POST body over the
    /// query string.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.post.get(key).or_else(|| self.get.get(key))
    }

    /// Returns every value for `key`: POST values first, then query values.
    pub fn form_values(&self, key: &str) -> Vec<String> {
        let mut values = self.post.get_list(key);
        values.extend(self.get.get_list(key));
        values
    }
}

/// Builder for [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: Method,
    path: String,
    query_string: String,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Default for HttpRequestBuilder {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query_string: String::new(),
            content_type: None,
            body: Vec::new(),
        }
    }
}

impl HttpRequestBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Sets the query string (without leading `?`).
    #[must_use]
    pub fn query_string(mut self, qs: &str) -> Self {
        self.query_string = qs.to_string();
        self
    }

    /// Sets the content type.
    #[must_use]
    pub fn content_type(mut self, ct: &str) -> Self {
        self.content_type = Some(ct.to_string());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the [`HttpRequest`], decoding the body when it is urlencoded.
    pub fn build(self) -> HttpRequest {
        let get = QueryDict::parse(&self.query_string);

        let post = if self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with(FORM_URLENCODED))
        {
            QueryDict::parse(&String::from_utf8_lossy(&self.body))
        } else {
            if !self.body.is_empty() {
                tracing::debug!(
                    content_type = ?self.content_type,
                    "request body is not urlencoded; POST data left empty"
                );
            }
            QueryDict::new()
        };

        HttpRequest {
            method: self.method,
            path: self.path,
            query_string: self.query_string,
            content_type: self.content_type,
            get,
            post,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let req = HttpRequest::builder().build();
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(req.path(), "/");
        assert!(req.post().is_empty());
    }

    #[test]
    fn test_post_body_requires_urlencoded_content_type() {
        let req = HttpRequest::builder()
            .method(Method::POST)
            .body(b"Name=Ann".to_vec())
            .build();
        assert!(req.post().is_empty());

        let req = HttpRequest::builder()
            .method(Method::POST)
            .content_type("application/x-www-form-urlencoded; charset=utf-8")
            .body(b"Name=Ann".to_vec())
            .build();
        assert_eq!(req.post().get("Name"), Some("Ann"));
    }

    #[test]
    fn test_form_value_prefers_post() {
        let req = HttpRequest::builder()
            .method(Method::POST)
            .query_string("Name=Query&Page=2")
            .content_type(FORM_URLENCODED)
            .body(b"Name=Body".to_vec())
            .build();
        assert_eq!(req.form_value("Name"), Some("Body"));
        assert_eq!(req.form_value("Page"), Some("2"));
        assert_eq!(req.form_values("Name"), vec!["Body", "Query"]);
    }

    #[test]
    fn test_from_http() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/signup?ref=home")
            .header(http::header::CONTENT_TYPE, FORM_URLENCODED)
            .body(b"Name=Ann".to_vec())
            .unwrap();
        let req = HttpRequest::from_http(request);
        assert_eq!(req.path(), "/signup");
        assert_eq!(req.query_string(), "ref=home");
        assert_eq!(req.get().get("ref"), Some("home"));
        assert_eq!(req.post().get("Name"), Some("Ann"));
        assert_eq!(req.content_type(), Some(FORM_URLENCODED));
    }
}
