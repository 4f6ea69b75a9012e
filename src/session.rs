use crate::cookies::session_id_from_cookies;
use crate::error::{AuthFailure, Error, Result};
use crate::interfaces::response::drop_nulls;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, COOKIE, SET_COOKIE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub const BASE_URL: &str = "https://www.classcharts.com";

/// How long a session id stays usable after a ping, in milliseconds.
pub const PING_INTERVAL_MS: i64 = 3 * 60 * 1000;

/// Revalidate this long before the interval runs out, to absorb latency.
pub const PING_SAFETY_MARGIN_MS: i64 = 5 * 1000;

/// The two kinds of account, each with its own API base and login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Parent,
    Student,
}

impl Role {
    fn api_prefix(&self) -> &'static str {
        match self {
            Role::Parent => "apiv2parent",
            Role::Student => "apiv2student",
        }
    }

    fn login_path(&self) -> &'static str {
        match self {
            Role::Parent => "/parent/login",
            Role::Student => "/student/login",
        }
    }

    /// Name of the cookie carrying `{"session_id": ...}` after login.
    pub(crate) fn credentials_cookie(&self) -> &'static str {
        match self {
            Role::Parent => "parent_session_credentials",
            Role::Student => "student_session_credentials",
        }
    }
}

/// Transport settings shared by both account kinds.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the remote service, without trailing slash.
    pub base_url: String,
    pub user_agent: String,
    /// `None` keeps reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: concat!("classcharts-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

/// Body of an authenticated request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

/// One call against the role's API base.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
    headers: HeaderMap,
    revalidate: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: vec![],
            body: None,
            headers: HeaderMap::new(),
            revalidate: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a query pair only when the value is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.body = Some(RequestBody::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Skip the proactive revalidation check.
    pub fn without_revalidation(mut self) -> Self {
        self.revalidate = false;
        self
    }
}

/// Authentication state of one client, plus its HTTP client.
///
/// Only the login strategies and [`Session::revalidate`] write to it.
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    role: Role,
    config: ClientConfig,
    /// Empty until logged in.
    token: String,
    /// Raw cookie strings, sent verbatim in the `Cookie` header.
    cookies: Vec<String>,
    /// The student record requests are made for. 0 until known.
    subject_id: i64,
    /// Milliseconds since epoch of the last successful ping. 0 if never.
    last_revalidated_at: i64,
}

impl Session {
    pub fn new(role: Role, config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::ClientBuilder::new().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            role,
            config,
            token: String::new(),
            cookies: vec![],
            subject_id: 0,
            last_revalidated_at: 0,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn cookies(&self) -> &[String] {
        &self.cookies
    }

    pub fn subject_id(&self) -> i64 {
        self.subject_id
    }

    pub fn last_revalidated_at(&self) -> i64 {
        self.last_revalidated_at
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = token;
    }

    pub(crate) fn set_cookies(&mut self, cookies: Vec<String>) {
        self.cookies = cookies;
    }

    pub(crate) fn set_subject_id(&mut self, subject_id: i64) {
        self.subject_id = subject_id;
    }

    fn api_base(&self) -> String {
        format!("{}/{}", self.config.base_url, self.role.api_prefix())
    }

    /// Post the login form and return the raw `Set-Cookie` header.
    ///
    /// Redirects are not followed: a successful login answers with a 302
    /// carrying the credentials cookie, which is all we need.
    pub(crate) async fn login_handshake(&self, form: &[(&str, &str)]) -> Result<String> {
        let client = build_login_client(&self.config)?;
        let url = format!("{}{}", self.config.base_url, self.role.login_path());
        debug!("POST {url} (login)");

        let response = client.post(&url).form(form).send().await?;

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>();

        if status != StatusCode::FOUND || set_cookies.is_empty() {
            return Err(AuthFailure::MissingCookies { status }.into());
        }

        Ok(set_cookies.join(", "))
    }

    /// Take the session id out of the login cookies and make it the token.
    pub(crate) fn adopt_login_cookies(&mut self, raw_cookies: &str) -> Result<()> {
        let token = session_id_from_cookies(raw_cookies, self.role.credentials_cookie())?;
        self.set_token(token);
        Ok(())
    }

    /// Ask the server for a fresh session id.
    pub async fn revalidate(&mut self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::NoSession);
        }

        let ping = ApiRequest::post("/ping").form([("include_data", "true")]);
        let body = self.send(ping).await?;

        let session_id = body
            .pointer("/meta/session_id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Api("Ping response did not contain meta.session_id".into()))?;

        self.token = session_id.to_string();
        self.last_revalidated_at = now_millis();
        debug!("Session revalidated");

        Ok(())
    }

    fn needs_revalidation(&self, now: i64) -> bool {
        self.last_revalidated_at != 0
            && now - self.last_revalidated_at + PING_SAFETY_MARGIN_MS > PING_INTERVAL_MS
    }

    /// Send an authenticated request and return the JSON body.
    ///
    /// Fails with [`Error::NoSession`] without touching the network when
    /// not logged in. A body whose `success` is 0 becomes [`Error::Api`]
    /// whatever the HTTP status was.
    pub async fn authenticated_request(&mut self, request: ApiRequest) -> Result<Value> {
        if self.token.is_empty() {
            return Err(Error::NoSession);
        }

        if request.revalidate && self.needs_revalidation(now_millis()) {
            debug!("Session id is about to expire, revalidating first");
            self.revalidate().await?;
        }

        self.send(request).await
    }

    /// One round trip with the current token and cookies, no session checks.
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = format!("{}{}", self.api_base(), request.path);
        debug!("{} {url}", request.method);

        let mut builder = self
            .http
            .request(request.method, &url)
            .header(AUTHORIZATION, format!("Basic {}", self.token));
        if !self.cookies.is_empty() {
            builder = builder.header(COOKIE, self.cookies.join("; "));
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(RequestBody::Form(fields)) = &request.body {
            builder = builder.form(fields);
        }
        builder = builder.headers(request.headers);

        let text = builder.send().await?.text().await?;
        let body: Value = serde_json::from_str(&text)
            .map_err(|_| Error::Api(format!("Error parsing JSON. Returned response: {text}")))?;

        if is_failure(&body) {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            return Err(Error::Api(message.to_string()));
        }

        Ok(body)
    }

    /// [`Session::authenticated_request`], then decode into a typed response.
    ///
    /// `null` members count as missing, so they take the model's default.
    pub async fn request<T: DeserializeOwned>(&mut self, request: ApiRequest) -> Result<T> {
        let path = request.path.clone();
        let mut body = self.authenticated_request(request).await?;
        drop_nulls(&mut body);

        serde_json::from_value(body)
            .map_err(|e| Error::Api(format!("Unexpected response shape from {path}: {e}")))
    }
}

/// `success` of 0 (or false) marks a failed call.
fn is_failure(body: &Value) -> bool {
    match body.get("success") {
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Bool(ok)) => !ok,
        _ => false,
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Build the client used for the login form.
///
/// This client isn't logged in, and it must see the 302 itself.
fn build_login_client(config: &ClientConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::none());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// A session that looks logged in, pointed at the mock server.
    pub(crate) fn logged_in(server: &MockServer, role: Role) -> Session {
        let config = ClientConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        let mut session = Session::new(role, config).unwrap();
        session.token = "test_session".to_string();
        session.subject_id = 42;
        session.last_revalidated_at = now_millis();
        session
    }

    fn ok(data: Value, meta: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "success": 1,
            "data": data,
            "meta": meta,
        }))
    }

    #[tokio::test]
    async fn request_without_session_fails_before_network() {
        let server = MockServer::start().await;
        let config = ClientConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        let mut session = Session::new(Role::Student, config).unwrap();

        let err = session
            .authenticated_request(ApiRequest::get("/endpoint"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoSession));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sends_authorization_and_cookies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apiv2student/endpoint"))
            .and(header("authorization", "Basic test_session"))
            .and(header("cookie", "a=1; b=2"))
            .and(header("x-extra", "yes"))
            .and(query_param("from", "2024-01-01"))
            .respond_with(ok(json!([1, 2]), json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = logged_in(&server, Role::Student);
        session.cookies = vec!["a=1".to_string(), "b=2".to_string()];

        let body = session
            .authenticated_request(
                ApiRequest::get("/endpoint")
                    .query("from", "2024-01-01")
                    .query_opt("to", None::<String>)
                    .header(
                        HeaderName::from_static("x-extra"),
                        HeaderValue::from_static("yes"),
                    ),
            )
            .await
            .unwrap();

        assert_eq!(body["data"], json!([1, 2]));
        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.query(), Some("from=2024-01-01"));
    }

    #[tokio::test]
    async fn no_cookie_header_when_jar_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ok(json!([]), json!({})))
            .mount(&server)
            .await;

        let mut session = logged_in(&server, Role::Parent);
        session
            .authenticated_request(ApiRequest::get("/pupils"))
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.path(), "/apiv2parent/pupils");
        assert!(!received[0].headers.contains_key("cookie"));
    }

    #[tokio::test]
    async fn success_zero_is_api_error_even_with_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": 0,
                "error": "Test error message",
                "data": {},
                "meta": {},
            })))
            .mount(&server)
            .await;

        let mut session = logged_in(&server, Role::Student);
        let err = session
            .authenticated_request(ApiRequest::get("/endpoint"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ref msg) if msg == "Test error message"));
    }

    #[tokio::test]
    async fn success_zero_without_error_is_unknown_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": 0 })))
            .mount(&server)
            .await;

        let mut session = logged_in(&server, Role::Student);
        let err = session
            .authenticated_request(ApiRequest::get("/endpoint"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ref msg) if msg == "Unknown error"));
    }

    #[tokio::test]
    async fn invalid_json_is_api_error_with_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Not JSON"))
            .mount(&server)
            .await;

        let mut session = logged_in(&server, Role::Student);
        let err = session
            .authenticated_request(ApiRequest::get("/endpoint"))
            .await
            .unwrap_err();

        let Error::Api(msg) = err else {
            panic!("expected api error, got {err:?}");
        };
        assert!(msg.starts_with("Error parsing JSON"));
        assert!(msg.contains("Not JSON"));
    }

    #[tokio::test]
    async fn stale_session_revalidates_exactly_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/apiv2student/ping"))
            .and(header("authorization", "Basic test_session"))
            .and(body_string_contains("include_data=true"))
            .respond_with(ok(json!({}), json!({ "session_id": "new_session" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/apiv2student/endpoint"))
            .and(header("authorization", "Basic new_session"))
            .respond_with(ok(json!({}), json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = logged_in(&server, Role::Student);
        session.last_revalidated_at = now_millis() - 200_000;

        session
            .authenticated_request(ApiRequest::get("/endpoint"))
            .await
            .unwrap();

        assert_eq!(session.token(), "new_session");
        assert!(now_millis() - session.last_revalidated_at() < PING_INTERVAL_MS);
    }

    #[tokio::test]
    async fn fresh_session_does_not_revalidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/apiv2student/ping"))
            .respond_with(ok(json!({}), json!({ "session_id": "new_session" })))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/apiv2student/endpoint"))
            .respond_with(ok(json!({}), json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = logged_in(&server, Role::Student);
        session
            .authenticated_request(ApiRequest::get("/endpoint"))
            .await
            .unwrap();

        assert_eq!(session.token(), "test_session");
    }

    #[test]
    fn revalidation_threshold_includes_safety_margin() {
        let config = ClientConfig::default();
        let mut session = Session::new(Role::Parent, config).unwrap();
        let now = 1_000_000_000;

        assert!(!session.needs_revalidation(now), "never pinged");

        session.last_revalidated_at = now - (PING_INTERVAL_MS - PING_SAFETY_MARGIN_MS);
        assert!(!session.needs_revalidation(now));

        session.last_revalidated_at = now - (PING_INTERVAL_MS - PING_SAFETY_MARGIN_MS) - 1;
        assert!(session.needs_revalidation(now));
    }

    #[tokio::test]
    async fn revalidate_without_session_id_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/apiv2parent/ping"))
            .respond_with(ok(json!({}), json!({})))
            .mount(&server)
            .await;

        let mut session = logged_in(&server, Role::Parent);
        let err = session.revalidate().await.unwrap_err();

        assert!(matches!(err, Error::Api(_)));
        assert_eq!(session.token(), "test_session");
    }

    #[tokio::test]
    async fn typed_request_reports_shape_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ok(json!("not a list"), json!({})))
            .mount(&server)
            .await;

        #[derive(Debug, serde::Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            data: Vec<i64>,
        }

        let mut session = logged_in(&server, Role::Parent);
        let err = session
            .request::<Shape>(ApiRequest::get("/pupils"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ref msg) if msg.contains("/pupils")));
    }

    #[tokio::test]
    async fn revalidate_without_session_fails_before_network() {
        let server = MockServer::start().await;
        let config = ClientConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        let mut session = Session::new(Role::Student, config).unwrap();

        let err = session.revalidate().await.unwrap_err();
        assert!(matches!(err, Error::NoSession));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn typed_request_treats_null_as_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ok(
                json!([{ "id": 7, "name": null, "score": null, "flag": null }]),
                json!(null),
            ))
            .mount(&server)
            .await;

        #[derive(Debug, Default, serde::Deserialize)]
        #[serde(default)]
        struct Item {
            id: i64,
            name: String,
            score: i64,
            flag: bool,
        }

        let mut session = logged_in(&server, Role::Parent);
        let response = session
            .request::<crate::interfaces::response::ApiResponse<Vec<Item>>>(ApiRequest::get(
                "/items",
            ))
            .await
            .unwrap();

        let item = &response.data[0];
        assert_eq!(item.id, 7);
        assert_eq!(item.name, "");
        assert_eq!(item.score, 0);
        assert!(!item.flag);
    }

    #[test]
    fn failure_detection() {
        assert!(is_failure(&json!({ "success": 0 })));
        assert!(is_failure(&json!({ "success": false })));
        assert!(!is_failure(&json!({ "success": 1 })));
        assert!(!is_failure(&json!({ "data": [] })));
    }
}
