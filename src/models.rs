//! Typed inputs and outputs for the SES send operations.

use serde::Serialize;
use std::fmt;

/// AWS credentials used to sign every request.
///
/// The secret access key is redacted from `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    /// Create static credentials from an access key pair.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attach a session token for temporary (STS) credentials.
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Recipient lists for a send operation.
///
/// Empty lists are treated as absent and never serialized onto the wire.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    pub to_addresses: Vec<String>,
    pub cc_addresses: Vec<String>,
    pub bcc_addresses: Vec<String>,
}

impl Destination {
    /// Destination with only To recipients.
    pub fn to(addresses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            to_addresses: addresses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// A text payload with an optional character-set label.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Content {
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
}

impl Content {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            charset: None,
        }
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }
}

/// Plain-text and/or HTML alternatives for the message body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Body {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Content>,
}

/// Subject plus body for a direct-content send.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    pub subject: Content,
    pub body: Body,
}

/// A name/value message tag, passed through to SES as
/// `Tags.member.N.Name` / `Tags.member.N.Value`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageTag {
    pub name: String,
    pub value: String,
}

impl MessageTag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Input for the `SendEmail` operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailInput {
    pub source: String,
    pub destination: Destination,
    pub message: Message,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reply_to_addresses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path_arn: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<MessageTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_set_name: Option<String>,
}

impl SendEmailInput {
    /// Input with the required fields set and every optional field empty.
    pub fn new(source: impl Into<String>, destination: Destination, message: Message) -> Self {
        Self {
            source: source.into(),
            destination,
            message,
            reply_to_addresses: Vec::new(),
            return_path: None,
            source_arn: None,
            return_path_arn: None,
            tags: Vec::new(),
            configuration_set_name: None,
        }
    }
}

/// Input for the `SendTemplatedEmail` operation.
///
/// `template_data` is the JSON document the template is rendered with,
/// already serialized to a string. Use [`SendTemplatedEmailInput::template_data`]
/// to fill it from any [`Serialize`] value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendTemplatedEmailInput {
    pub source: String,
    pub destination: Destination,
    pub template: String,
    pub template_data: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reply_to_addresses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path_arn: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<MessageTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_set_name: Option<String>,
}

impl SendTemplatedEmailInput {
    /// Input with the required fields set and every optional field empty.
    pub fn new(
        source: impl Into<String>,
        destination: Destination,
        template: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination,
            template: template.into(),
            template_data: "{}".to_string(),
            reply_to_addresses: Vec::new(),
            return_path: None,
            source_arn: None,
            return_path_arn: None,
            tags: Vec::new(),
            configuration_set_name: None,
        }
    }

    /// Serialize `data` to JSON and use it as the template data.
    pub fn template_data<T: Serialize>(mut self, data: &T) -> crate::Result<Self> {
        self.template_data = serde_json::to_string(data)?;
        Ok(self)
    }
}

/// The two send operations the client supports.
///
/// A closed enum instead of a runtime type check; there is no
/// "unrecognized command" failure mode.
#[derive(Debug, Clone)]
pub enum SendCommand {
    Email(SendEmailInput),
    TemplatedEmail(SendTemplatedEmailInput),
}

impl From<SendEmailInput> for SendCommand {
    fn from(input: SendEmailInput) -> Self {
        Self::Email(input)
    }
}

impl From<SendTemplatedEmailInput> for SendCommand {
    fn from(input: SendTemplatedEmailInput) -> Self {
        Self::TemplatedEmail(input)
    }
}

/// Result of a successful send.
///
/// SES normally returns a `MessageId`; when the success response carries
/// none, `message_id` is `None` and the send still counts as accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendEmailOutput {
    pub message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret_material() {
        let creds = Credentials::new("AKIDEXAMPLE", "top-secret").with_session_token("token");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("AKIDEXAMPLE"));
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("token\""));
    }

    #[test]
    fn template_data_serializes_value() {
        let input = SendTemplatedEmailInput::new("a@b.c", Destination::to(["d@e.f"]), "Welcome")
            .template_data(&serde_json::json!({ "name": "Ada" }))
            .unwrap();
        assert_eq!(input.template_data, r#"{"name":"Ada"}"#);
    }
}
