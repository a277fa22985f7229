//! Mapping from typed inputs to the SES form-encoded query parameters.
//!
//! The SES v1 API takes a flat `key=value` body where nested structures use
//! dotted paths (`Message.Subject.Data`) and lists use 1-based member keys
//! (`Destination.ToAddresses.member.1`). The mapping here walks the known
//! input schema directly; absent options and empty lists emit no key at all.

use crate::models::{Content, Destination, MessageTag, SendEmailInput, SendTemplatedEmailInput};
use url::form_urlencoded;

/// SES v1 API version sent with every request.
pub(crate) const API_VERSION: &str = "2010-12-01";

/// Ordered accumulator of form parameters.
///
/// Insertion order is preserved so request bodies are deterministic.
#[derive(Debug)]
pub(crate) struct ParamList {
    pairs: Vec<(String, String)>,
}

impl ParamList {
    /// Start a parameter list for the given API action.
    pub(crate) fn for_action(action: &str) -> Self {
        let mut list = Self { pairs: Vec::new() };
        list.push("Action", action);
        list.push("Version", API_VERSION);
        list
    }

    fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    fn push_opt(&mut self, key: &str, value: Option<&String>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Emit `<prefix>.member.<N>` keys, 1-based. An empty slice emits nothing.
    fn push_members(&mut self, prefix: &str, values: &[String]) {
        for (index, value) in values.iter().enumerate() {
            self.push(format!("{prefix}.member.{}", index + 1), value);
        }
    }

    /// Emit `<prefix>.Data` and, when labeled, `<prefix>.Charset`.
    fn push_content(&mut self, prefix: &str, content: &Content) {
        self.push(format!("{prefix}.Data"), &content.data);
        if let Some(charset) = &content.charset {
            self.push(format!("{prefix}.Charset"), charset);
        }
    }

    fn push_destination(&mut self, destination: &Destination) {
        self.push_members("Destination.ToAddresses", &destination.to_addresses);
        self.push_members("Destination.CcAddresses", &destination.cc_addresses);
        self.push_members("Destination.BccAddresses", &destination.bcc_addresses);
    }

    fn push_tags(&mut self, tags: &[MessageTag]) {
        for (index, tag) in tags.iter().enumerate() {
            self.push(format!("Tags.member.{}.Name", index + 1), &tag.name);
            self.push(format!("Tags.member.{}.Value", index + 1), &tag.value);
        }
    }

    /// Serialize as an `application/x-www-form-urlencoded` body.
    pub(crate) fn into_body(self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    #[cfg(test)]
    fn keys(&self) -> Vec<&str> {
        self.pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Build the parameter list for a `SendEmail` call.
pub(crate) fn send_email_params(input: &SendEmailInput) -> ParamList {
    let mut params = ParamList::for_action("SendEmail");
    params.push("Source", &input.source);
    params.push_destination(&input.destination);

    params.push_content("Message.Subject", &input.message.subject);
    if let Some(text) = &input.message.body.text {
        params.push_content("Message.Body.Text", text);
    }
    if let Some(html) = &input.message.body.html {
        params.push_content("Message.Body.Html", html);
    }

    push_optional_tail(&mut params, OptionalTail {
        reply_to_addresses: &input.reply_to_addresses,
        return_path: input.return_path.as_ref(),
        source_arn: input.source_arn.as_ref(),
        return_path_arn: input.return_path_arn.as_ref(),
        tags: &input.tags,
        configuration_set_name: input.configuration_set_name.as_ref(),
    });
    params
}

/// Build the parameter list for a `SendTemplatedEmail` call.
pub(crate) fn send_templated_email_params(input: &SendTemplatedEmailInput) -> ParamList {
    let mut params = ParamList::for_action("SendTemplatedEmail");
    params.push("Source", &input.source);
    params.push("Template", &input.template);
    params.push("TemplateData", &input.template_data);
    params.push_destination(&input.destination);

    push_optional_tail(&mut params, OptionalTail {
        reply_to_addresses: &input.reply_to_addresses,
        return_path: input.return_path.as_ref(),
        source_arn: input.source_arn.as_ref(),
        return_path_arn: input.return_path_arn.as_ref(),
        tags: &input.tags,
        configuration_set_name: input.configuration_set_name.as_ref(),
    });
    params
}

/// Optional fields shared by both send operations.
struct OptionalTail<'a> {
    reply_to_addresses: &'a [String],
    return_path: Option<&'a String>,
    source_arn: Option<&'a String>,
    return_path_arn: Option<&'a String>,
    tags: &'a [MessageTag],
    configuration_set_name: Option<&'a String>,
}

fn push_optional_tail(params: &mut ParamList, tail: OptionalTail<'_>) {
    params.push_members("ReplyToAddresses", tail.reply_to_addresses);
    params.push_opt("ReturnPath", tail.return_path);
    params.push_opt("SourceArn", tail.source_arn);
    params.push_opt("ReturnPathArn", tail.return_path_arn);
    params.push_tags(tail.tags);
    params.push_opt("ConfigurationSetName", tail.configuration_set_name);
}
