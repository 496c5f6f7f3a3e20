//! Typed Rust client for the Popbill cash-receipt, fax and messaging APIs.
//!
//! The crate has three layers: a domain layer of validated value types, a
//! transport layer holding the JSON wire formats, and a client layer that
//! attaches authentication headers and dispatches requests. Session tokens are
//! obtained outside this crate and supplied through a [`TokenProvider`].
//!
//! ```rust,no_run
//! use popbill::{
//!     ContactNumber, CorpNum, PopbillClient, SecurityToken, SingleMessage,
//!     StaticTokenProvider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokens = StaticTokenProvider::new(SecurityToken::new("...")?);
//!     let client = PopbillClient::builder(tokens).test_mode(true).build()?;
//!
//!     let corp = CorpNum::new("1234567890")?;
//!     let message = SingleMessage::new(
//!         ContactNumber::new("07043042991")?,
//!         ContactNumber::new("01011112222")?,
//!         "hello",
//!     );
//!     let receipt = client.message().send_sms(&corp, message, None).await?;
//!     println!("receipt: {}", receipt.as_str());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    AuthError, BoxFuture, CashbillService, FaxService, MGT_KEY_NOT_FOUND, MessageService,
    PopbillClient, PopbillClientBuilder, PopbillError, StaticTokenProvider, TokenProvider,
};
pub use domain::{
    ApiResponse, Cashbill, CashbillBox, CashbillInfo, CashbillLog, ContactNumber, CorpNum, Email,
    FaxFiles, FaxReceiver, FaxRecipients, FaxResult, MessageOptions, MessageReceiver,
    MessageResult, MessageType, MgtKey, PhoneNumber, ReceiptNum, ReserveDateTime, Scope,
    SecurityToken, SingleMessage, UnitCost, UserId, ValidationError,
};
