//! Signed AWS JSON client
//!
//! One client talks to one AWS service. Request bodies are JSON, every request
//! is signed with Signature Version 4, and error responses are decoded into
//! [`Error::Api`].

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{AwsConfig, AwsCredentials};
use crate::TRACING_TARGET_CLIENT;
use crate::error::{Error, Result};
use crate::signing::{self, SigningRequest, SigningScope};

const JSON_RPC_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const REST_JSON_CONTENT_TYPE: &str = "application/json";
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// Identifies an AWS service on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwsService {
    /// Host prefix, e.g. `bedrock-runtime` in `bedrock-runtime.us-west-2.amazonaws.com`
    pub endpoint_prefix: &'static str,
    /// Service name used in the credential scope, e.g. `bedrock`
    pub signing_name: &'static str,
}

impl AwsService {
    /// Create a service descriptor
    pub const fn new(endpoint_prefix: &'static str, signing_name: &'static str) -> Self {
        Self {
            endpoint_prefix,
            signing_name,
        }
    }
}

/// A single API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    segments: Vec<String>,
    content_type: &'static str,
    target: Option<String>,
}

impl Operation {
    /// An `awsJson1_1` operation, dispatched by the `X-Amz-Target` header on `/`.
    pub fn json_rpc(target: impl Into<String>) -> Self {
        Self {
            segments: Vec::new(),
            content_type: JSON_RPC_CONTENT_TYPE,
            target: Some(target.into()),
        }
    }

    /// A REST-JSON operation addressed by its path segments.
    ///
    /// Segments are percent-encoded individually, so a segment may contain
    /// characters such as `:` or `/`.
    pub fn rest<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            content_type: REST_JSON_CONTENT_TYPE,
            target: None,
        }
    }

    /// The `X-Amz-Target` header value, if any.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// The encoded request path.
    pub fn path(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }

        self.segments
            .iter()
            .map(|segment| format!("/{}", signing::uri_encode(segment, true)))
            .collect()
    }

    fn url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        let base = endpoint.path().trim_end_matches('/');
        url.set_path(&format!("{base}{}", self.path()));
        url
    }
}

/// Inner client that holds the HTTP client and configuration.
struct AwsClientInner {
    http: Client,
    config: AwsConfig,
    credentials: AwsCredentials,
    service: AwsService,
    endpoint: Url,
}

impl std::fmt::Debug for AwsClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsClientInner")
            .field("config", &self.config)
            .field("service", &self.service)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

/// Signed JSON client for a single AWS service.
///
/// The client is cheap to clone and can be shared between tasks.
///
/// # Examples
///
/// ```rust,ignore
/// use glimpse_aws::{AwsClient, AwsConfig, AwsCredentials, AwsService, Operation};
///
/// let service = AwsService::new("rekognition", "rekognition");
/// let client = AwsClient::new(AwsConfig::default(), credentials, service)?;
///
/// let op = Operation::json_rpc("RekognitionService.DetectText");
/// let response: serde_json::Value = client.invoke(&op, &request).await?;
/// ```
#[derive(Clone, Debug)]
pub struct AwsClient {
    inner: Arc<AwsClientInner>,
}

impl AwsClient {
    /// Creates a new client for `service`.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are incomplete, the endpoint cannot
    /// be resolved, or the HTTP client cannot be created.
    pub fn new(config: AwsConfig, credentials: AwsCredentials, service: AwsService) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            service = service.endpoint_prefix,
            region = %config.region,
            timeout_ms = config.timeout.as_millis(),
            "Creating AWS client"
        );

        if !credentials.is_complete() {
            return Err(Error::invalid_config(
                "AWS access key id and secret access key are required",
            ));
        }

        let endpoint = config.endpoint_for(service.endpoint_prefix)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            service = service.endpoint_prefix,
            endpoint = %endpoint,
            "AWS client created successfully"
        );

        let inner = AwsClientInner {
            http,
            config,
            credentials,
            service,
            endpoint,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &AwsConfig {
        &self.inner.config
    }

    /// Gets the resolved service endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Sends a signed JSON request and decodes the JSON response.
    pub async fn invoke<Req, Resp>(&self, operation: &Operation, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let started_at = Instant::now();
        let body = serde_json::to_vec(request)?;
        let url = operation.url(&self.inner.endpoint);

        let mut headers = vec![("content-type", operation.content_type)];
        if let Some(target) = operation.target() {
            headers.push(("x-amz-target", target));
        }

        let signed = signing::sign(
            &self.inner.credentials,
            SigningScope {
                region: &self.inner.config.region,
                service: self.inner.service.signing_name,
                timestamp: jiff::Timestamp::now(),
            },
            SigningRequest {
                method: "POST",
                url: &url,
                headers: &headers,
                body: &body,
            },
        );

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            service = self.inner.service.endpoint_prefix,
            path = url.path(),
            body_bytes = body.len(),
            "Sending signed request"
        );

        let mut http_request = self.inner.http.post(url.clone());
        for (name, value) in headers.iter().copied() {
            http_request = http_request.header(name, value);
        }
        for (name, value) in signed {
            http_request = http_request.header(name, value);
        }

        let response = http_request.body(body).send().await?;
        let status = response.status();
        let error_type = error_type_header(response.headers());
        let bytes = response.bytes().await?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            service = self.inner.service.endpoint_prefix,
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Received response"
        );

        if !status.is_success() {
            let error = api_error(status.as_u16(), error_type.as_deref(), &bytes);
            tracing::warn!(
                target: TRACING_TARGET_CLIENT,
                service = self.inner.service.endpoint_prefix,
                status = status.as_u16(),
                error = %error,
                "Request rejected"
            );
            return Err(error);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

fn error_type_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ERROR_TYPE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn api_error(status: u16, header: Option<&str>, body: &[u8]) -> Error {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();

    let code = header
        .or(parsed.kind.as_deref())
        .map(error_code)
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| format!("HTTP{status}"));

    let message = parsed.message.unwrap_or_else(|| {
        let text = String::from_utf8_lossy(body);
        text.chars().take(512).collect()
    });

    Error::api_error(status, code, message)
}

/// Strips the namespace prefix and the trailing documentation link that AWS
/// adds to error codes, e.g. `aws.protocols#ThrottlingException:http://...`.
fn error_code(raw: &str) -> String {
    let code = raw.split(':').next().unwrap_or(raw);
    code.rsplit('#').next().unwrap_or(code).trim().to_string()
}
