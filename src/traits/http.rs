use anyhow::{Context, Result};
use serde_json::Value;

/// HTTP verbs the API collaborator needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Status code and raw body of an HTTP exchange
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client trait for testing
pub trait HttpClient: Send + Sync {
    /// Send a request, optionally with a JSON body
    fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<HttpResponse>;
}

/// Real HTTP client using reqwest
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
    credentials: Option<(String, String)>,
}

impl ReqwestClient {
    pub fn new(username: Option<String>, password: Option<String>, verify_ssl: bool) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(!verify_ssl)
            .build()
            .context("Failed to build HTTP client")?;

        let credentials = username.map(|user| (user, password.unwrap_or_default()));

        Ok(Self { client, credentials })
    }
}

impl HttpClient for ReqwestClient {
    fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<HttpResponse> {
        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };

        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        log::debug!("{:?} {}", method, url);

        let response = request
            .send()
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .with_context(|| format!("Failed to read response body from: {}", url))?;

        log::debug!("{:?} {} -> {}", method, url, status);

        Ok(HttpResponse { status, body })
    }
}

/// Mock HTTP client answering canned responses by URL suffix
#[cfg(test)]
pub struct MockHttpClient {
    routes: std::sync::Mutex<Vec<MockRoute>>,
    requests: std::sync::Mutex<Vec<MockRequest>>,
}

#[cfg(test)]
#[derive(Clone, Debug)]
pub struct MockRoute {
    pub method: Method,
    pub url_suffix: String,
    pub status: u16,
    pub body: String,
}

#[cfg(test)]
#[derive(Clone, Debug)]
pub struct MockRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            routes: std::sync::Mutex::new(Vec::new()),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Answer `method` on URLs ending with `url_suffix`
    pub fn route(self, method: Method, url_suffix: &str, status: u16, body: Value) -> Self {
        self.routes.lock().unwrap().push(MockRoute {
            method,
            url_suffix: url_suffix.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl HttpClient for MockHttpClient {
    fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(MockRequest {
            method,
            url: url.to_string(),
            body: body.cloned(),
        });

        let routes = self.routes.lock().unwrap();
        // Later routes override earlier ones
        match routes
            .iter()
            .rev()
            .find(|r| r.method == method && url.ends_with(&r.url_suffix))
        {
            Some(route) => Ok(HttpResponse {
                status: route.status,
                body: route.body.clone(),
            }),
            // Default: not found
            None => Ok(HttpResponse {
                status: 404,
                body: serde_json::json!({"message": format!("no route for {}", url)}).to_string(),
            }),
        }
    }
}
