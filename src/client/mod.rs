//! Client layer: request dispatch, authentication, and the service façades.

mod auth;
mod cashbill;
mod fax;
mod message;

use std::error::Error as StdError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{CorpNum, Operation, Scope, UserId, ValidationError};
use crate::transport::TransportError;

pub use auth::{AuthError, BoxFuture, StaticTokenProvider, TokenProvider};
pub use cashbill::{CashbillService, MGT_KEY_NOT_FOUND};
pub use fax::FaxService;
pub use message::MessageService;

const PRODUCTION_ENDPOINT: &str = "https://popbill.linkhub.co.kr";
const TEST_ENDPOINT: &str = "https://popbill_test.linkhub.co.kr";
const API_VERSION: &str = "1.0";

const VERSION_HEADER: &str = "x-pb-version";
const USER_ID_HEADER: &str = "x-pb-userid";
const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One binary attachment of a multipart request.
struct FilePart {
    field_name: &'static str,
    file_name: String,
    data: Vec<u8>,
}

impl FilePart {
    fn attachment(path: &std::path::Path, data: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_owned());
        Self {
            field_name: "file",
            file_name,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HttpBody {
    Empty,
    Json(String),
    /// JSON metadata in a `form` text part plus one part per file.
    Multipart {
        form: String,
        files: Vec<FilePart>,
    },
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: Url,
    headers: Vec<(&'static str, String)>,
    body: HttpBody,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(request.url),
                HttpMethod::Post => self.client.post(request.url),
            };
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            builder = match request.body {
                HttpBody::Empty => builder,
                HttpBody::Json(json) => builder
                    .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
                    .body(json),
                HttpBody::Multipart { form, files } => {
                    let mut multipart = reqwest::multipart::Form::new().text("form", form);
                    for file in files {
                        let part =
                            reqwest::multipart::Part::bytes(file.data).file_name(file.file_name);
                        multipart = multipart.part(file.field_name, part);
                    }
                    builder.multipart(multipart)
                }
            };

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by the Popbill services.
///
/// Only [`PopbillError::Validation`] is raised locally; everything else comes from
/// the token provider, the network, or the Popbill response and is never retried.
pub enum PopbillError {
    /// An argument was rejected before any network call.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The token provider could not issue a session token.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Popbill answered with a non-2xx status.
    #[error("Popbill API error (HTTP {status}){}", api_detail(.code, .message))]
    Api {
        status: u16,
        code: Option<i64>,
        message: Option<String>,
    },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// A request or response body could not be (de)serialized.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// A file attachment could not be read.
    #[error("cannot read attachment {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured endpoint is not a valid base URL.
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl PopbillError {
    /// Popbill-style numeric code: the remote code for API errors, the token
    /// service's code for auth errors, and `-99999999` for validation errors.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Validation(err) => Some(err.code()),
            Self::Auth(err) => Some(err.code),
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }
}

fn api_detail(code: &Option<i64>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!(": [{code}] {message}"),
        (Some(code), None) => format!(": [{code}]"),
        (None, Some(message)) => format!(": {message}"),
        (None, None) => String::new(),
    }
}

/// Parse a base URL, forcing a trailing `/` so request paths resolve below it.
fn base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_error(err: TransportError) -> PopbillError {
    PopbillError::Parse(Box::new(err))
}

/// Per-call identity: the scopes of the calling service plus member and user.
#[derive(Debug, Clone, Copy)]
struct Call<'a> {
    scopes: &'a [Scope],
    corp_num: &'a CorpNum,
    user_id: Option<&'a UserId>,
}

impl<'a> Call<'a> {
    fn new(scopes: &'a [Scope], corp_num: &'a CorpNum, user_id: Option<&'a UserId>) -> Self {
        Self {
            scopes,
            corp_num,
            user_id,
        }
    }
}

#[derive(Clone)]
/// Builder for [`PopbillClient`].
///
/// Use this when you need the sandbox host, a custom endpoint, a timeout, or a user-agent.
pub struct PopbillClientBuilder {
    tokens: Arc<dyn TokenProvider>,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl PopbillClientBuilder {
    /// Create a builder targeting the production host.
    pub fn new(tokens: impl TokenProvider + 'static) -> Self {
        Self {
            tokens: Arc::new(tokens),
            endpoint: PRODUCTION_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Switch between the sandbox (`true`) and production (`false`) hosts.
    pub fn test_mode(mut self, test: bool) -> Self {
        self.endpoint = if test { TEST_ENDPOINT } else { PRODUCTION_ENDPOINT }.to_owned();
        self
    }

    /// Override the API host, e.g. for a proxy.
    ///
    /// A base path is kept: `https://proxy/popbill` sends fax sends to
    /// `https://proxy/popbill/FAX`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`PopbillClient`].
    pub fn build(self) -> Result<PopbillClient, PopbillError> {
        let endpoint = base_url(&self.endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| PopbillError::Transport(Box::new(err)))?;

        Ok(PopbillClient {
            endpoint,
            tokens: self.tokens,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Shared request helper behind every Popbill service.
///
/// Each call resolves a session token for the calling service's scopes, attaches it
/// as a bearer credential, sends one request, and returns the body of a 2xx answer.
/// Clones share the HTTP connection pool and the token provider.
pub struct PopbillClient {
    endpoint: Url,
    tokens: Arc<dyn TokenProvider>,
    http: Arc<dyn HttpTransport>,
}

impl PopbillClient {
    /// Create a production client.
    ///
    /// For more customization, use [`PopbillClient::builder`].
    pub fn new(tokens: impl TokenProvider + 'static) -> Result<Self, PopbillError> {
        Ok(Self {
            endpoint: base_url(PRODUCTION_ENDPOINT)?,
            tokens: Arc::new(tokens),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        })
    }

    /// Start building a client with custom settings.
    pub fn builder(tokens: impl TokenProvider + 'static) -> PopbillClientBuilder {
        PopbillClientBuilder::new(tokens)
    }

    /// Base URL every request path is resolved against.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Cash-receipt service sharing this client.
    pub fn cashbill(&self) -> CashbillService {
        CashbillService::new(self.clone())
    }

    /// Fax service sharing this client.
    pub fn fax(&self) -> FaxService {
        FaxService::new(self.clone())
    }

    /// Message service sharing this client.
    pub fn message(&self) -> MessageService {
        MessageService::new(self.clone())
    }

    async fn get(&self, call: Call<'_>, path: &str) -> Result<String, PopbillError> {
        self.dispatch(call, HttpMethod::Get, path, None, HttpBody::Empty)
            .await
    }

    async fn post(
        &self,
        call: Call<'_>,
        path: &str,
        body: Option<String>,
        operation: Option<Operation>,
    ) -> Result<String, PopbillError> {
        let body = body.map_or(HttpBody::Empty, HttpBody::Json);
        self.dispatch(call, HttpMethod::Post, path, operation, body)
            .await
    }

    async fn post_multipart(
        &self,
        call: Call<'_>,
        path: &str,
        form: String,
        files: Vec<FilePart>,
        max_files: usize,
    ) -> Result<String, PopbillError> {
        if files.is_empty() || files.len() > max_files {
            return Err(ValidationError::FileCount {
                min: 1,
                max: max_files,
                actual: files.len(),
            }
            .into());
        }
        self.dispatch(
            call,
            HttpMethod::Post,
            path,
            None,
            HttpBody::Multipart { form, files },
        )
        .await
    }

    async fn dispatch(
        &self,
        call: Call<'_>,
        method: HttpMethod,
        path: &str,
        operation: Option<Operation>,
        body: HttpBody,
    ) -> Result<String, PopbillError> {
        let token = self.tokens.token(call.scopes, call.corp_num).await?;
        let url = self.endpoint.join(path.trim_start_matches('/'))?;

        let mut headers = vec![
            ("Authorization", format!("Bearer {}", token.as_str())),
            (VERSION_HEADER, API_VERSION.to_owned()),
        ];
        if let Some(user_id) = call.user_id {
            headers.push((USER_ID_HEADER, user_id.as_str().to_owned()));
        }
        if let Some(operation) = operation {
            headers.push((METHOD_OVERRIDE_HEADER, operation.header_value().to_owned()));
        }

        let attachments = match &body {
            HttpBody::Multipart { files, .. } => files.len(),
            _ => 0,
        };
        let scopes: Vec<&str> = call.scopes.iter().map(|scope| scope.as_str()).collect();
        tracing::debug!(
            ?method,
            path,
            operation = operation.map(Operation::header_value),
            ?scopes,
            attachments,
            "dispatching Popbill request"
        );

        let response = self
            .http
            .execute(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await
            .map_err(PopbillError::Transport)?;

        tracing::debug!(status = response.status, path, "received Popbill response");

        if !(200..=299).contains(&response.status) {
            let error = crate::transport::decode_error_body(&response.body);
            return Err(PopbillError::Api {
                status: response.status,
                code: error.code,
                message: error.message,
            });
        }

        Ok(response.body)
    }
}
