//! # SES Client
//! Asynchronous client for the AWS SES v1 ("classic") form API, covering the
//! `SendEmail` and `SendTemplatedEmail` operations with AWS Signature V4 request
//! signing, via [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust services that need to send transactional email through SES without
//! pulling in the full AWS SDK: build a [`SendEmailInput`] or
//! [`SendTemplatedEmailInput`], hand it to [`Client::send`], and get back the
//! `MessageId` SES assigned.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`, so
//! ensure the chosen Tokio features (`rt-multi-thread` or `current_thread`) are
//! available in your application.
//!
//! ## Out of scope
//! Not a general AWS SDK. No retries, batching, connection pooling beyond
//! reqwest's own, or credential refresh; timeouts belong to the caller or the
//! reqwest builder. Only the two send operations are implemented.
//!
//! ## Errors
//! Rejections reported by SES become [`Error::Api`] with the code, HTTP status,
//! message, and request id extracted from the XML body. Transport failures
//! surface as [`Error::Request`]. The crate-wide [`Result`] alias wraps these.
//!
//! ## Example
//! ```no_run
//! use ses_client::{Body, Client, Content, Credentials, Destination, Message, SendEmailInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ses_client::Error> {
//!     let client = Client::new("eu-west-1", Credentials::new("AKID", "SECRET"))?;
//!
//!     let input = SendEmailInput::new(
//!         "noreply@example.com",
//!         Destination::to(["user@example.com"]),
//!         Message {
//!             subject: Content::new("Welcome"),
//!             body: Body {
//!                 text: Some(Content::new("Thanks for signing up!")),
//!                 html: None,
//!             },
//!         },
//!     );
//!
//!     let output = client.send_email(&input).await?;
//!     println!("sent: {:?}", output.message_id);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod params;
mod signing;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::{
    Body, Content, Credentials, Destination, Message, MessageTag, SendCommand, SendEmailInput,
    SendEmailOutput, SendTemplatedEmailInput,
};

/// Result type alias for SES operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
