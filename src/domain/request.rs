use std::path::{Path, PathBuf};

use crate::domain::value::{ContactNumber, MgtKey, ReserveDateTime};

/// Maximum number of management keys accepted by bulk cash-receipt lookups.
pub const CASHBILL_MAX_BULK_KEYS: usize = 1000;
/// Maximum number of attachments per fax send.
pub const FAX_MAX_FILES: usize = 5;
/// Number of attachments an MMS send carries.
pub const MMS_FILES: usize = 1;

/// Authorization scope registered with Linkhub for a Popbill service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Cashbill,
    Sms,
    Lms,
    Mms,
    Fax,
}

impl Scope {
    /// Linkhub scope code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cashbill => "140",
            Self::Sms => "150",
            Self::Lms => "151",
            Self::Mms => "152",
            Self::Fax => "160",
        }
    }
}

/// Logical operation a POST request stands for.
///
/// Popbill only accepts `GET` and `POST`; everything else is a `POST` tagged with
/// an `X-HTTP-Method-Override` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Patch,
    Delete,
    Issue,
    CancelIssue,
    Email,
    Sms,
    Fax,
}

impl Operation {
    /// Header value sent with the emulating `POST`.
    pub fn header_value(self) -> &'static str {
        match self {
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Issue => "ISSUE",
            Self::CancelIssue => "CANCELISSUE",
            Self::Email => "EMAIL",
            Self::Sms => "SMS",
            Self::Fax => "FAX",
        }
    }
}

/// Message kind; also the path segment of the send endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// Short message (90 bytes).
    Sms,
    /// Long message with subject (2000 bytes).
    Lms,
    /// Long message with one image attachment.
    Mms,
    /// Short or long, chosen by Popbill from the content length.
    Xms,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Lms => "LMS",
            Self::Mms => "MMS",
            Self::Xms => "XMS",
        }
    }
}

/// Cash-receipt document box opened by [`crate::CashbillService::get_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashbillBox {
    /// Temporary (unissued) documents, `TBOX`.
    Temporary,
    /// Issued sales documents, `PBOX`.
    Sales,
}

impl CashbillBox {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temporary => "TBOX",
            Self::Sales => "PBOX",
        }
    }
}

/// Cash receipt payload for register/update.
///
/// Every field is optional; `None` and empty strings are left out of the request body.
/// Amounts are decimal strings as Popbill expects them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cashbill {
    pub mgt_key: Option<MgtKey>,
    /// Trade date, `yyyyMMdd`.
    pub trade_date: Option<String>,
    /// `소득공제용` (income deduction) or `지출증빙용` (expense proof).
    pub trade_usage: Option<String>,
    /// `승인거래` (approval) or `취소거래` (cancellation).
    pub trade_type: Option<String>,
    /// `과세` (taxable) or `비과세` (tax-free).
    pub taxation_type: Option<String>,
    pub supply_cost: Option<String>,
    pub tax: Option<String>,
    pub service_fee: Option<String>,
    pub total_amount: Option<String>,
    pub franchise_corp_num: Option<String>,
    pub franchise_corp_name: Option<String>,
    pub franchise_ceo_name: Option<String>,
    pub franchise_addr: Option<String>,
    pub franchise_tel: Option<String>,
    /// Customer identity: phone, card, or registration number.
    pub identity_num: Option<String>,
    pub customer_name: Option<String>,
    pub item_name: Option<String>,
    pub order_number: Option<String>,
    pub email: Option<String>,
    pub hp: Option<String>,
    pub fax: Option<String>,
    pub smssend_yn: Option<bool>,
    pub faxsend_yn: Option<bool>,
    /// Approval number of the original receipt, for cancellation receipts.
    pub org_confirm_num: Option<String>,
    pub confirm_num: Option<String>,
}

/// One fax recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaxReceiver {
    pub receive_num: ContactNumber,
    pub receive_name: Option<String>,
}

impl FaxReceiver {
    pub fn new(receive_num: ContactNumber) -> Self {
        Self {
            receive_num,
            receive_name: None,
        }
    }

    pub fn named(receive_num: ContactNumber, receive_name: impl Into<String>) -> Self {
        Self {
            receive_num,
            receive_name: Some(receive_name.into()),
        }
    }
}

/// Fax recipients: a bare number, a single receiver, or a list of receivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaxRecipients(Vec<FaxReceiver>);

impl FaxRecipients {
    pub fn as_slice(&self) -> &[FaxReceiver] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ContactNumber> for FaxRecipients {
    fn from(value: ContactNumber) -> Self {
        Self(vec![FaxReceiver::new(value)])
    }
}

impl From<FaxReceiver> for FaxRecipients {
    fn from(value: FaxReceiver) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<FaxReceiver>> for FaxRecipients {
    fn from(value: Vec<FaxReceiver>) -> Self {
        Self(value)
    }
}

/// Files attached to a fax: one path or a list of paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaxFiles(Vec<PathBuf>);

impl FaxFiles {
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<PathBuf> for FaxFiles {
    fn from(value: PathBuf) -> Self {
        Self(vec![value])
    }
}

impl From<&Path> for FaxFiles {
    fn from(value: &Path) -> Self {
        Self(vec![value.to_path_buf()])
    }
}

impl From<&str> for FaxFiles {
    fn from(value: &str) -> Self {
        Self(vec![PathBuf::from(value)])
    }
}

impl From<Vec<PathBuf>> for FaxFiles {
    fn from(value: Vec<PathBuf>) -> Self {
        Self(value)
    }
}

/// One SMS/LMS/MMS recipient with optional per-recipient overrides.
///
/// Unset overrides fall back to the values in [`MessageOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceiver {
    pub receiver: ContactNumber,
    pub receiver_name: Option<String>,
    pub sender: Option<ContactNumber>,
    pub content: Option<String>,
    pub subject: Option<String>,
}

impl MessageReceiver {
    pub fn new(receiver: ContactNumber) -> Self {
        Self {
            receiver,
            receiver_name: None,
            sender: None,
            content: None,
            subject: None,
        }
    }
}

/// Values shared by every recipient of a bulk send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOptions {
    pub sender: Option<ContactNumber>,
    pub subject: Option<String>,
    pub content: Option<String>,
    pub reserve_dt: Option<ReserveDateTime>,
}

/// A message to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleMessage {
    pub sender: ContactNumber,
    pub receiver: ContactNumber,
    pub receiver_name: Option<String>,
    /// Ignored for SMS.
    pub subject: Option<String>,
    pub content: String,
    pub reserve_dt: Option<ReserveDateTime>,
}

impl SingleMessage {
    pub fn new(sender: ContactNumber, receiver: ContactNumber, content: impl Into<String>) -> Self {
        Self {
            sender,
            receiver,
            receiver_name: None,
            subject: None,
            content: content.into(),
            reserve_dt: None,
        }
    }

    /// Split into the one-element receiver list and shared options of the bulk form.
    pub(crate) fn into_bulk(self) -> (Vec<MessageReceiver>, MessageOptions) {
        let receiver = MessageReceiver {
            receiver: self.receiver,
            receiver_name: self.receiver_name,
            sender: Some(self.sender.clone()),
            content: Some(self.content.clone()),
            subject: self.subject.clone(),
        };
        let options = MessageOptions {
            sender: Some(self.sender),
            subject: self.subject,
            content: Some(self.content),
            reserve_dt: self.reserve_dt,
        };
        (vec![receiver], options)
    }
}
