//! SMS, LMS, XMS and MMS messaging.

use std::path::Path;

use super::{Call, FilePart, PopbillClient, PopbillError, parse_error};
use crate::domain::{
    ApiResponse, CorpNum, MMS_FILES, MessageOptions, MessageReceiver, MessageResult, MessageType,
    ReceiptNum, Scope, SingleMessage, UnitCost, UserId, ValidationError,
};
use crate::transport;

const SCOPES: &[Scope] = &[Scope::Sms, Scope::Lms, Scope::Mms];

const RECEIVERS_FIELD: &str = "msgs";

#[derive(Clone)]
/// Popbill messaging API.
///
/// Every send has a single-recipient form taking a [`SingleMessage`] and a
/// bulk `_multi` form taking a receiver list plus shared [`MessageOptions`].
/// The single form builds a one-element list and goes through the bulk path,
/// so both produce the same request body.
pub struct MessageService {
    client: PopbillClient,
    scopes: &'static [Scope],
}

impl MessageService {
    pub fn new(client: PopbillClient) -> Self {
        Self {
            client,
            scopes: SCOPES,
        }
    }

    pub fn scopes(&self) -> &[Scope] {
        self.scopes
    }

    fn call<'a>(&'a self, corp_num: &'a CorpNum, user_id: Option<&'a UserId>) -> Call<'a> {
        Call::new(self.scopes, corp_num, user_id)
    }

    pub async fn get_unit_cost(
        &self,
        corp_num: &CorpNum,
        message_type: MessageType,
    ) -> Result<UnitCost, PopbillError> {
        let path = format!("/Message/UnitCost?Type={}", message_type.as_str());
        let body = self.client.get(self.call(corp_num, None), &path).await?;
        transport::decode_unit_cost(&body).map_err(parse_error)
    }

    /// Short message; any subject is dropped.
    pub async fn send_sms(
        &self,
        corp_num: &CorpNum,
        message: SingleMessage,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        let (receivers, options) = message.into_bulk();
        self.send_sms_multi(corp_num, receivers, options, user_id)
            .await
    }

    pub async fn send_sms_multi(
        &self,
        corp_num: &CorpNum,
        receivers: Vec<MessageReceiver>,
        options: MessageOptions,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        self.send(corp_num, MessageType::Sms, &receivers, &options, user_id)
            .await
    }

    /// Long message with an optional subject.
    pub async fn send_lms(
        &self,
        corp_num: &CorpNum,
        message: SingleMessage,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        let (receivers, options) = message.into_bulk();
        self.send_lms_multi(corp_num, receivers, options, user_id)
            .await
    }

    pub async fn send_lms_multi(
        &self,
        corp_num: &CorpNum,
        receivers: Vec<MessageReceiver>,
        options: MessageOptions,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        self.send(corp_num, MessageType::Lms, &receivers, &options, user_id)
            .await
    }

    /// Sent as SMS or LMS depending on the content length, decided remotely.
    pub async fn send_xms(
        &self,
        corp_num: &CorpNum,
        message: SingleMessage,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        let (receivers, options) = message.into_bulk();
        self.send_xms_multi(corp_num, receivers, options, user_id)
            .await
    }

    pub async fn send_xms_multi(
        &self,
        corp_num: &CorpNum,
        receivers: Vec<MessageReceiver>,
        options: MessageOptions,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        self.send(corp_num, MessageType::Xms, &receivers, &options, user_id)
            .await
    }

    /// Long message with one attached image.
    pub async fn send_mms(
        &self,
        corp_num: &CorpNum,
        message: SingleMessage,
        file: &Path,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        let (receivers, options) = message.into_bulk();
        self.send_mms_multi(corp_num, receivers, options, file, user_id)
            .await
    }

    /// Bulk MMS. The same file goes to every recipient.
    ///
    /// A missing or unreadable file fails with
    /// [`ValidationError::UnreadableFile`] before any request is made.
    pub async fn send_mms_multi(
        &self,
        corp_num: &CorpNum,
        receivers: Vec<MessageReceiver>,
        options: MessageOptions,
        file: &Path,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        ensure_receivers(&receivers)?;
        let data = tokio::fs::read(file)
            .await
            .map_err(|_| ValidationError::UnreadableFile {
                path: file.to_path_buf(),
            })?;

        let form = transport::encode_send_message(&receivers, &options, true).map_err(parse_error)?;
        let body = self
            .client
            .post_multipart(
                self.call(corp_num, user_id),
                "/MMS",
                form,
                vec![FilePart::attachment(file, data)],
                MMS_FILES,
            )
            .await?;
        transport::decode_receipt_num(&body).map_err(parse_error)
    }

    /// Per-recipient results of one send request.
    pub async fn get_messages(
        &self,
        corp_num: &CorpNum,
        receipt_num: &ReceiptNum,
        user_id: Option<&UserId>,
    ) -> Result<Vec<MessageResult>, PopbillError> {
        let path = format!("/Message/{}", receipt_num.as_str());
        let body = self.client.get(self.call(corp_num, user_id), &path).await?;
        transport::decode_message_results(&body).map_err(parse_error)
    }

    pub async fn cancel_reserve(
        &self,
        corp_num: &CorpNum,
        receipt_num: &ReceiptNum,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        let path = format!("/Message/{}/Cancel", receipt_num.as_str());
        let body = self.client.get(self.call(corp_num, user_id), &path).await?;
        transport::decode_api_response(&body).map_err(parse_error)
    }

    /// Login URL of the sent-message box.
    pub async fn get_url(&self, corp_num: &CorpNum, user_id: &UserId) -> Result<String, PopbillError> {
        let body = self
            .client
            .get(self.call(corp_num, Some(user_id)), "/Message/?TG=BOX")
            .await?;
        transport::decode_url(&body).map_err(parse_error)
    }

    async fn send(
        &self,
        corp_num: &CorpNum,
        message_type: MessageType,
        receivers: &[MessageReceiver],
        options: &MessageOptions,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        ensure_receivers(receivers)?;
        let include_subject = message_type != MessageType::Sms;
        let form = transport::encode_send_message(receivers, options, include_subject)
            .map_err(parse_error)?;
        let path = format!("/{}", message_type.as_str());
        let body = self
            .client
            .post(self.call(corp_num, user_id), &path, Some(form), None)
            .await?;
        transport::decode_receipt_num(&body).map_err(parse_error)
    }
}

fn ensure_receivers(receivers: &[MessageReceiver]) -> Result<(), ValidationError> {
    if receivers.is_empty() {
        return Err(ValidationError::Empty {
            field: RECEIVERS_FIELD,
        });
    }
    Ok(())
}
