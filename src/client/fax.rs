//! Fax service.

use super::{Call, FilePart, PopbillClient, PopbillError, parse_error};
use crate::domain::{
    ApiResponse, ContactNumber, CorpNum, FAX_MAX_FILES, FaxFiles, FaxReceiver, FaxRecipients,
    FaxResult, ReceiptNum, ReserveDateTime, Scope, UnitCost, UserId, ValidationError,
};
use crate::transport;

const SCOPES: &[Scope] = &[Scope::Fax];

const RECEIVERS_FIELD: &str = "rcvs";

#[derive(Clone)]
/// Popbill fax API.
pub struct FaxService {
    client: PopbillClient,
    scopes: &'static [Scope],
}

impl FaxService {
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

    /// Login URL of the transmission history box.
    pub async fn get_url(&self, corp_num: &CorpNum, user_id: &UserId) -> Result<String, PopbillError> {
        let body = self
            .client
            .get(self.call(corp_num, Some(user_id)), "/FAX/?TG=BOX")
            .await?;
        transport::decode_url(&body).map_err(parse_error)
    }

    /// Price per transmitted page.
    pub async fn get_unit_cost(&self, corp_num: &CorpNum) -> Result<UnitCost, PopbillError> {
        let body = self
            .client
            .get(self.call(corp_num, None), "/FAX/UnitCost")
            .await?;
        transport::decode_unit_cost(&body).map_err(parse_error)
    }

    /// Per-recipient results of one send request.
    pub async fn get_fax_result(
        &self,
        corp_num: &CorpNum,
        receipt_num: &ReceiptNum,
        user_id: Option<&UserId>,
    ) -> Result<Vec<FaxResult>, PopbillError> {
        let path = format!("/FAX/{}", receipt_num.as_str());
        let body = self.client.get(self.call(corp_num, user_id), &path).await?;
        transport::decode_fax_results(&body).map_err(parse_error)
    }

    /// Cancel a send that is still waiting for its reservation time.
    pub async fn cancel_reserve(
        &self,
        corp_num: &CorpNum,
        receipt_num: &ReceiptNum,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        let path = format!("/FAX/{}/Cancel", receipt_num.as_str());
        let body = self.client.get(self.call(corp_num, user_id), &path).await?;
        transport::decode_api_response(&body).map_err(parse_error)
    }

    /// Send to one recipient. See [`FaxService::send_fax_multi`].
    pub async fn send_fax(
        &self,
        corp_num: &CorpNum,
        sender: &ContactNumber,
        receiver: FaxReceiver,
        files: impl Into<FaxFiles>,
        reserve_dt: Option<&ReserveDateTime>,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        self.send_fax_multi(corp_num, sender, receiver, files, reserve_dt, user_id)
            .await
    }

    /// Send 1 to 5 files to every recipient, immediately or at `reserve_dt`.
    ///
    /// Arguments are validated before any file is opened; each file is then read
    /// completely into memory and uploaded as a multipart attachment.
    pub async fn send_fax_multi(
        &self,
        corp_num: &CorpNum,
        sender: &ContactNumber,
        receivers: impl Into<FaxRecipients>,
        files: impl Into<FaxFiles>,
        reserve_dt: Option<&ReserveDateTime>,
        user_id: Option<&UserId>,
    ) -> Result<ReceiptNum, PopbillError> {
        let receivers = receivers.into();
        let files = files.into();

        if receivers.is_empty() {
            return Err(ValidationError::Empty {
                field: RECEIVERS_FIELD,
            }
            .into());
        }
        if files.is_empty() || files.len() > FAX_MAX_FILES {
            return Err(ValidationError::FileCount {
                min: 1,
                max: FAX_MAX_FILES,
                actual: files.len(),
            }
            .into());
        }

        let form = transport::encode_send_fax_form(sender, &receivers, files.len(), reserve_dt)
            .map_err(parse_error)?;

        let mut parts = Vec::with_capacity(files.len());
        for path in files.paths() {
            let data = tokio::fs::read(path)
                .await
                .map_err(|source| PopbillError::Io {
                    path: path.clone(),
                    source,
                })?;
            parts.push(FilePart::attachment(path, data));
        }

        let body = self
            .client
            .post_multipart(self.call(corp_num, user_id), "/FAX", form, parts, FAX_MAX_FILES)
            .await?;
        transport::decode_receipt_num(&body).map_err(parse_error)
    }
}
