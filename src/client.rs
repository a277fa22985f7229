//! SES async client implementation.

use crate::models::Credentials;
use crate::params::{self, ParamList};
use crate::signing;
use crate::{Error, Result, SendCommand, SendEmailInput, SendEmailOutput, SendTemplatedEmailInput};
use chrono::Utc;
use regex::Regex;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use url::Url;

/// Async client for the AWS SES v1 form API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] for custom settings
/// like a proxy or an endpoint override.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    credentials: Credentials,
    region: String,
    endpoint: Url,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new SES client for a region with the given credentials.
    ///
    /// # Examples
    /// ```no_run
    /// # use ses_client::{Client, Credentials};
    /// # fn main() -> Result<(), ses_client::Error> {
    /// let client = Client::new("eu-west-1", Credentials::new("AKID", "SECRET"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(region: impl Into<String>, credentials: Credentials) -> Result<Self> {
        ClientBuilder::new()
            .region(region)
            .credentials(credentials)
            .build()
    }

    /// The region this client sends to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Dispatch a send command to the matching operation.
    ///
    /// # Examples
    /// ```no_run
    /// # use ses_client::{Body, Client, Content, Credentials, Destination, Message,
    /// #     SendCommand, SendEmailInput};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ses_client::Error> {
    /// let client = Client::new("eu-west-1", Credentials::new("AKID", "SECRET"))?;
    /// let input = SendEmailInput::new(
    ///     "noreply@example.com",
    ///     Destination::to(["user@example.com"]),
    ///     Message {
    ///         subject: Content::new("Hello"),
    ///         body: Body { text: Some(Content::new("Hi there")), html: None },
    ///     },
    /// );
    /// let output = client.send(SendCommand::Email(input)).await?;
    /// println!("{:?}", output.message_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send(&self, command: SendCommand) -> Result<SendEmailOutput> {
        match command {
            SendCommand::Email(input) => self.send_email(&input).await,
            SendCommand::TemplatedEmail(input) => self.send_templated_email(&input).await,
        }
    }

    /// Send an email with inline subject and body content.
    pub async fn send_email(&self, input: &SendEmailInput) -> Result<SendEmailOutput> {
        self.make_request(params::send_email_params(input)).await
    }

    /// Send an email rendered from a stored SES template.
    pub async fn send_templated_email(
        &self,
        input: &SendTemplatedEmailInput,
    ) -> Result<SendEmailOutput> {
        self.make_request(params::send_templated_email_params(input))
            .await
    }

    /// Sign and POST a parameter list, then parse the XML response.
    async fn make_request(&self, params: ParamList) -> Result<SendEmailOutput> {
        let body = params.into_body();
        let signed = signing::sign_request(
            "POST",
            &self.endpoint,
            body.as_bytes(),
            &self.credentials,
            &self.region,
            SIGNING_SERVICE,
            Utc::now(),
        );

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(AUTHORIZATION, &signed.authorization)
            .header("X-Amz-Date", &signed.amz_date)
            .header("X-Amz-Content-Sha256", &signed.content_sha256);
        if let Some(token) = &signed.security_token {
            request = request.header("X-Amz-Security-Token", token);
        }

        let response = request.body(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(status = status.as_u16(), "SES response received");

        if !status.is_success() {
            return Err(parse_api_error(&text, status.as_u16()));
        }
        Ok(parse_send_response(&text))
    }
}

const SIGNING_SERVICE: &str = "email";

/// Extract the capture of the first non-greedy match, if any.
fn extract_first(body: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).unwrap();
    re.captures(body)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parse a successful send response.
///
/// A missing `MessageId` is still a success; SES reported the send but
/// returned no tracking id.
fn parse_send_response(body: &str) -> SendEmailOutput {
    SendEmailOutput {
        message_id: extract_first(body, r"<MessageId>(.*?)</MessageId>"),
    }
}

/// Parse an error response into [`Error::Api`].
///
/// First-occurrence substring extraction, not a general XML parser;
/// repeated or nested tags are not disambiguated.
fn parse_api_error(body: &str, status: u16) -> Error {
    let code =
        extract_first(body, r"<Code>(.*?)</Code>").unwrap_or_else(|| "UnknownError".to_string());
    let message = extract_first(body, r"<Message>(.*?)</Message>").unwrap_or_else(|| {
        if body.is_empty() {
            "Unknown error occurred".to_string()
        } else {
            body.to_string()
        }
    });
    let request_id = extract_first(body, r"<RequestId>(.*?)</RequestId>");

    Error::Api {
        code,
        status,
        message,
        request_id,
    }
}

/// Builder for configuring an SES client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    region: Option<String>,
    credentials: Option<Credentials>,
    endpoint: Option<String>,
    proxy: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with nothing configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region (e.g. "eu-west-1"). Required.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the credentials used to sign requests. Required.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the endpoint URL.
    ///
    /// Defaults to `https://email.<region>.amazonaws.com/`. Useful for
    /// pointing at a local mock during tests.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set a proxy URL (e.g. "http://127.0.0.1:8080") for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the client.
    ///
    /// Fails if the endpoint or proxy URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let region = self.region.unwrap_or_default();
        let credentials = self.credentials.unwrap_or_else(|| Credentials::new("", ""));

        let endpoint = match self.endpoint {
            Some(endpoint) => Url::parse(&endpoint)?,
            None => Url::parse(&format!("https://email.{region}.amazonaws.com/"))?,
        };

        let mut builder = reqwest::Client::builder();
        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        let http = builder.build()?;

        Ok(Client {
            http,
            credentials,
            region,
            endpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_message_id_from_success_response() {
        let body = "<SendEmailResponse><SendEmailResult><MessageId>abc-123</MessageId>\
                    </SendEmailResult></SendEmailResponse>";
        let output = parse_send_response(body);
        assert_eq!(output.message_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn missing_message_id_is_an_empty_result() {
        let body = "<SendEmailResponse><SendEmailResult/></SendEmailResponse>";
        let output = parse_send_response(body);
        assert_eq!(output, SendEmailOutput::default());
    }

    #[test]
    fn first_message_id_wins_on_repeated_tags() {
        let body = "<MessageId>first</MessageId><MessageId>second</MessageId>";
        let output = parse_send_response(body);
        assert_eq!(output.message_id.as_deref(), Some("first"));
    }

    #[test]
    fn parses_structured_error_response() {
        let body = "<ErrorResponse><Error><Code>MessageRejected</Code>\
                    <Message>Email address is not verified</Message></Error>\
                    <RequestId>req-1</RequestId></ErrorResponse>";
        let error = parse_api_error(body, 400);
        match error {
            Error::Api {
                code,
                status,
                message,
                request_id,
            } => {
                assert_eq!(code, "MessageRejected");
                assert_eq!(status, 400);
                assert_eq!(message, "Email address is not verified");
                assert_eq!(request_id.as_deref(), Some("req-1"));
            }
            other => panic!("expected Error::Api, got {other:?}"),
        }
    }

    #[test]
    fn malformed_error_body_falls_back_to_unknown_error() {
        let error = parse_api_error("not xml at all", 500);
        match error {
            Error::Api {
                code,
                message,
                request_id,
                ..
            } => {
                assert_eq!(code, "UnknownError");
                assert_eq!(message, "not xml at all");
                assert_eq!(request_id, None);
            }
            other => panic!("expected Error::Api, got {other:?}"),
        }
    }

    #[test]
    fn empty_error_body_gets_generic_message() {
        let error = parse_api_error("", 503);
        match error {
            Error::Api { code, message, .. } => {
                assert_eq!(code, "UnknownError");
                assert_eq!(message, "Unknown error occurred");
            }
            other => panic!("expected Error::Api, got {other:?}"),
        }
    }

    #[test]
    fn default_endpoint_is_derived_from_region() {
        let client = Client::new("eu-west-1", Credentials::new("AKID", "SECRET")).unwrap();
        assert_eq!(
            client.endpoint.as_str(),
            "https://email.eu-west-1.amazonaws.com/"
        );
    }

    #[test]
    fn endpoint_override_wins() {
        let client = Client::builder()
            .region("us-east-1")
            .credentials(Credentials::new("AKID", "SECRET"))
            .endpoint("http://127.0.0.1:5000/")
            .build()
            .unwrap();
        assert_eq!(client.endpoint.as_str(), "http://127.0.0.1:5000/");
    }
}
