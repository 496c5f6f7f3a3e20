//! Cash-receipt (현금영수증) service.

use super::{Call, PopbillClient, PopbillError, parse_error};
use crate::domain::{
    ApiResponse, CASHBILL_MAX_BULK_KEYS, Cashbill, CashbillBox, CashbillInfo, CashbillLog,
    ContactNumber, CorpNum, Email, MgtKey, Operation, Scope, UnitCost, UserId, ValidationError,
};
use crate::transport;

const SCOPES: &[Scope] = &[Scope::Cashbill];

/// Error code Popbill returns when no document has the requested management key.
pub const MGT_KEY_NOT_FOUND: i64 = -14_000_003;

const MGT_KEYS_FIELD: &str = "mgtKeys";

#[derive(Clone)]
/// Popbill cash-receipt API.
///
/// Documents are addressed by the partner-assigned [`MgtKey`]. Every method performs
/// exactly one request; nothing is cached between calls.
pub struct CashbillService {
    client: PopbillClient,
    scopes: &'static [Scope],
}

impl CashbillService {
    pub fn new(client: PopbillClient) -> Self {
        Self {
            client,
            scopes: SCOPES,
        }
    }

    /// Linkhub scopes requested for every call.
    pub fn scopes(&self) -> &[Scope] {
        self.scopes
    }

    fn call<'a>(&'a self, corp_num: &'a CorpNum, user_id: Option<&'a UserId>) -> Call<'a> {
        Call::new(self.scopes, corp_num, user_id)
    }

    /// Login URL (valid for 30 seconds) of a document box.
    pub async fn get_url(
        &self,
        corp_num: &CorpNum,
        user_id: &UserId,
        target: CashbillBox,
    ) -> Result<String, PopbillError> {
        let path = format!("/Cashbill?TG={}", target.as_str());
        let body = self.client.get(self.call(corp_num, Some(user_id)), &path).await?;
        transport::decode_url(&body).map_err(parse_error)
    }

    /// Price of issuing one cash receipt.
    pub async fn get_unit_cost(&self, corp_num: &CorpNum) -> Result<UnitCost, PopbillError> {
        let body = self
            .client
            .get(self.call(corp_num, None), "/Cashbill?cfg=UNITCOST")
            .await?;
        transport::decode_unit_cost(&body).map_err(parse_error)
    }

    /// Whether a management key is already taken.
    ///
    /// A [`MGT_KEY_NOT_FOUND`] answer means the key is free and yields `Ok(false)`; every
    /// other error is returned unchanged.
    pub async fn check_mgt_key_in_use(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
    ) -> Result<bool, PopbillError> {
        let path = document_path(mgt_key);
        match self.client.get(self.call(corp_num, None), &path).await {
            Ok(body) => transport::decode_item_key_present(&body).map_err(parse_error),
            Err(PopbillError::Api {
                code: Some(MGT_KEY_NOT_FOUND),
                ..
            }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Save a new cash receipt as a temporary document.
    ///
    /// The receipt must carry a management key.
    pub async fn register(
        &self,
        corp_num: &CorpNum,
        cashbill: &Cashbill,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        if cashbill.mgt_key.is_none() {
            return Err(ValidationError::Empty {
                field: MgtKey::FIELD,
            }
            .into());
        }
        let json = transport::encode_cashbill(cashbill).map_err(parse_error)?;
        let body = self
            .client
            .post(self.call(corp_num, user_id), "/Cashbill", Some(json), None)
            .await?;
        transport::decode_api_response(&body).map_err(parse_error)
    }

    /// Replace the contents of the temporary document stored under `mgt_key`.
    pub async fn update(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        cashbill: &Cashbill,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        let json = transport::encode_cashbill(cashbill).map_err(parse_error)?;
        self.act(corp_num, mgt_key, Operation::Patch, Some(json), user_id)
            .await
    }

    /// Issue the document; a non-blank `memo` is stored with the state change.
    pub async fn issue(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        memo: Option<&str>,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        let json = transport::encode_memo(memo).map_err(parse_error)?;
        self.act(corp_num, mgt_key, Operation::Issue, Some(json), user_id)
            .await
    }

    pub async fn cancel_issue(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        memo: Option<&str>,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        let json = transport::encode_memo(memo).map_err(parse_error)?;
        self.act(corp_num, mgt_key, Operation::CancelIssue, Some(json), user_id)
            .await
    }

    pub async fn delete(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        self.act(corp_num, mgt_key, Operation::Delete, None, user_id)
            .await
    }

    /// State and summary of one document.
    pub async fn get_info(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
    ) -> Result<CashbillInfo, PopbillError> {
        let path = document_path(mgt_key);
        let body = self.client.get(self.call(corp_num, None), &path).await?;
        transport::decode_cashbill_info(&body).map_err(parse_error)
    }

    /// State and summary of up to 1000 documents.
    pub async fn get_infos(
        &self,
        corp_num: &CorpNum,
        mgt_keys: &[MgtKey],
    ) -> Result<Vec<CashbillInfo>, PopbillError> {
        check_key_list(mgt_keys)?;
        let json = transport::encode_mgt_keys(mgt_keys).map_err(parse_error)?;
        let body = self
            .client
            .post(self.call(corp_num, None), "/Cashbill/States", Some(json), None)
            .await?;
        transport::decode_cashbill_infos(&body).map_err(parse_error)
    }

    /// Full document contents.
    pub async fn get_detail_info(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
    ) -> Result<Cashbill, PopbillError> {
        let path = format!("{}?Detail", document_path(mgt_key));
        let body = self.client.get(self.call(corp_num, None), &path).await?;
        transport::decode_cashbill_detail(&body).map_err(parse_error)
    }

    /// Resend the notification e-mail.
    pub async fn send_email(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        receiver: &Email,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        let json = transport::encode_email(receiver).map_err(parse_error)?;
        self.act(corp_num, mgt_key, Operation::Email, Some(json), user_id)
            .await
    }

    /// Send a notification text message (90 bytes; longer contents are truncated by Popbill).
    pub async fn send_sms(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        sender: Option<&ContactNumber>,
        receiver: &ContactNumber,
        contents: &str,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        let json = transport::encode_sms_notice(sender, receiver, contents).map_err(parse_error)?;
        self.act(corp_num, mgt_key, Operation::Sms, Some(json), user_id)
            .await
    }

    /// Fax the document to `receiver`.
    pub async fn send_fax(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        sender: Option<&ContactNumber>,
        receiver: &ContactNumber,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        let json = transport::encode_fax_notice(sender, receiver).map_err(parse_error)?;
        self.act(corp_num, mgt_key, Operation::Fax, Some(json), user_id)
            .await
    }

    /// History of state changes.
    pub async fn get_logs(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
    ) -> Result<Vec<CashbillLog>, PopbillError> {
        let path = format!("{}/Logs", document_path(mgt_key));
        let body = self.client.get(self.call(corp_num, None), &path).await?;
        transport::decode_cashbill_logs(&body).map_err(parse_error)
    }

    /// Popup view of one document on the Popbill site.
    pub async fn get_popup_url(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        user_id: &UserId,
    ) -> Result<String, PopbillError> {
        self.document_url(corp_num, mgt_key, "POPUP", user_id).await
    }

    /// Print view for the issuer.
    pub async fn get_print_url(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        user_id: &UserId,
    ) -> Result<String, PopbillError> {
        self.document_url(corp_num, mgt_key, "PRINT", user_id).await
    }

    /// Print view for the customer.
    pub async fn get_eprint_url(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        user_id: &UserId,
    ) -> Result<String, PopbillError> {
        self.document_url(corp_num, mgt_key, "EPRINT", user_id).await
    }

    /// Link embedded in the customer's notification mail.
    pub async fn get_mail_url(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        user_id: &UserId,
    ) -> Result<String, PopbillError> {
        self.document_url(corp_num, mgt_key, "MAIL", user_id).await
    }

    /// One print view covering several documents.
    pub async fn get_mass_print_url(
        &self,
        corp_num: &CorpNum,
        mgt_keys: &[MgtKey],
        user_id: &UserId,
    ) -> Result<String, PopbillError> {
        check_key_list(mgt_keys)?;
        let json = transport::encode_mgt_keys(mgt_keys).map_err(parse_error)?;
        let body = self
            .client
            .post(
                self.call(corp_num, Some(user_id)),
                "/Cashbill/Prints",
                Some(json),
                None,
            )
            .await?;
        transport::decode_url(&body).map_err(parse_error)
    }

    async fn act(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        operation: Operation,
        json: Option<String>,
        user_id: Option<&UserId>,
    ) -> Result<ApiResponse, PopbillError> {
        let path = document_path(mgt_key);
        let body = self
            .client
            .post(self.call(corp_num, user_id), &path, json, Some(operation))
            .await?;
        transport::decode_api_response(&body).map_err(parse_error)
    }

    async fn document_url(
        &self,
        corp_num: &CorpNum,
        mgt_key: &MgtKey,
        target: &str,
        user_id: &UserId,
    ) -> Result<String, PopbillError> {
        let path = format!("{}?TG={target}", document_path(mgt_key));
        let body = self.client.get(self.call(corp_num, Some(user_id)), &path).await?;
        transport::decode_url(&body).map_err(parse_error)
    }
}

fn document_path(mgt_key: &MgtKey) -> String {
    format!("/Cashbill/{}", mgt_key.as_str())
}

fn check_key_list(mgt_keys: &[MgtKey]) -> Result<(), ValidationError> {
    if mgt_keys.is_empty() {
        return Err(ValidationError::Empty {
            field: MGT_KEYS_FIELD,
        });
    }
    if mgt_keys.len() > CASHBILL_MAX_BULK_KEYS {
        return Err(ValidationError::TooMany {
            field: MGT_KEYS_FIELD,
            max: CASHBILL_MAX_BULK_KEYS,
            actual: mgt_keys.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::*;
    use super::*;

    const OK: &str = r#"{"code":1,"message":"OK"}"#;

    fn key(raw: &str) -> MgtKey {
        MgtKey::new(raw).unwrap()
    }

    fn service(transport: &FakeTransport) -> CashbillService {
        CashbillService::new(make_client(transport.clone(), FakeTokens::default()))
    }

    #[tokio::test]
    async fn register_posts_payload_and_returns_code() {
        let transport = FakeTransport::new(200, OK);
        let cashbill = Cashbill {
            mgt_key: Some(key("20150326-01")),
            trade_type: Some("승인거래".to_owned()),
            identity_num: Some("01043245117".to_owned()),
            total_amount: Some("11000".to_owned()),
            ..Default::default()
        };

        let response = service(&transport)
            .register(&corp(), &cashbill, None)
            .await
            .unwrap();
        assert_eq!(response.code, 1);
        assert_eq!(response.message.as_deref(), Some("OK"));

        let request = transport.last_request();
        assert!(is_post(&request));
        assert_eq!(path_and_query(&request), "/Cashbill");
        assert_eq!(header(&request, "X-HTTP-Method-Override"), None);
        assert_eq!(
            json_body(&request),
            json!({
                "mgtKey": "20150326-01",
                "tradeType": "승인거래",
                "identityNum": "01043245117",
                "totalAmount": "11000"
            })
        );
    }

    #[tokio::test]
    async fn register_without_mgt_key_fails_before_network() {
        let transport = FakeTransport::new(200, OK);
        let err = service(&transport)
            .register(&corp(), &Cashbill::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PopbillError::Validation(ValidationError::Empty { field: "mgtKey" })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn issue_attaches_memo_body_and_issue_override() {
        let transport = FakeTransport::new(200, OK);
        let user = UserId::new("testkorea").unwrap();

        let response = service(&transport)
            .issue(&corp(), &key("20150326-01"), Some("issue memo"), Some(&user))
            .await
            .unwrap();
        assert_eq!(response.code, 1);

        let request = transport.last_request();
        assert!(is_post(&request));
        assert_eq!(path_and_query(&request), "/Cashbill/20150326-01");
        assert_eq!(header(&request, "X-HTTP-Method-Override"), Some("ISSUE"));
        assert_eq!(header(&request, "x-pb-userid"), Some("testkorea"));
        assert_eq!(json_body(&request), json!({"memo": "issue memo"}));
    }

    #[tokio::test]
    async fn cancel_issue_without_memo_sends_empty_object() {
        let transport = FakeTransport::new(200, OK);
        service(&transport)
            .cancel_issue(&corp(), &key("K1"), None, None)
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(header(&request, "X-HTTP-Method-Override"), Some("CANCELISSUE"));
        assert_eq!(json_body(&request), json!({}));
    }

    #[tokio::test]
    async fn update_and_delete_use_verb_overrides() {
        let transport = FakeTransport::new(200, OK);
        let svc = service(&transport);
        let cashbill = Cashbill {
            item_name: Some("coffee".to_owned()),
            ..Default::default()
        };

        svc.update(&corp(), &key("K1"), &cashbill, None).await.unwrap();
        svc.delete(&corp(), &key("K1"), None).await.unwrap();

        let requests = transport.requests();
        assert_eq!(header(&requests[0], "X-HTTP-Method-Override"), Some("PATCH"));
        assert_eq!(json_body(&requests[0]), json!({"itemName": "coffee"}));
        assert_eq!(header(&requests[1], "X-HTTP-Method-Override"), Some("DELETE"));
        assert!(has_empty_body(&requests[1]));
        assert_eq!(path_and_query(&requests[1]), "/Cashbill/K1");
    }

    #[tokio::test]
    async fn check_mgt_key_in_use_reads_item_key() {
        let transport = FakeTransport::new(200, r#"{"itemKey":"015032611000000001"}"#);
        assert!(
            service(&transport)
                .check_mgt_key_in_use(&corp(), &key("K1"))
                .await
                .unwrap()
        );
        let request = transport.last_request();
        assert!(is_get(&request));
        assert_eq!(path_and_query(&request), "/Cashbill/K1");
    }

    #[tokio::test]
    async fn check_mgt_key_in_use_maps_not_found_to_false() {
        let transport =
            FakeTransport::new(400, r#"{"code":-14000003,"message":"not found"}"#);
        let in_use = service(&transport)
            .check_mgt_key_in_use(&corp(), &key("K1"))
            .await
            .unwrap();
        assert!(!in_use);
    }

    #[tokio::test]
    async fn check_mgt_key_in_use_reraises_other_codes() {
        let transport =
            FakeTransport::new(400, r#"{"code":-11000005,"message":"invalid member"}"#);
        let err = service(&transport)
            .check_mgt_key_in_use(&corp(), &key("K1"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(-11_000_005));
    }

    #[tokio::test]
    async fn bulk_lookups_reject_empty_and_oversized_key_lists() {
        let transport = FakeTransport::new(200, "[]");
        let svc = service(&transport);
        let user = UserId::new("testkorea").unwrap();

        let err = svc.get_infos(&corp(), &[]).await.unwrap_err();
        assert!(matches!(
            err,
            PopbillError::Validation(ValidationError::Empty { field: "mgtKeys" })
        ));

        let err = svc
            .get_mass_print_url(&corp(), &[], &user)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ValidationError::CODE));

        let too_many: Vec<MgtKey> = (0..1001).map(|i| key(&format!("K{i}"))).collect();
        let err = svc.get_infos(&corp(), &too_many).await.unwrap_err();
        assert!(matches!(
            err,
            PopbillError::Validation(ValidationError::TooMany {
                max: 1000,
                actual: 1001,
                ..
            })
        ));

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn get_infos_posts_key_array() {
        let transport = FakeTransport::new(
            200,
            r#"[{"mgtKey":"K1","stateCode":100},{"mgtKey":"K2","stateCode":300}]"#,
        );
        let infos = service(&transport)
            .get_infos(&corp(), &[key("K1"), key("K2")])
            .await
            .unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[1].state_code, Some(300));

        let request = transport.last_request();
        assert_eq!(path_and_query(&request), "/Cashbill/States");
        assert_eq!(json_body(&request), json!(["K1", "K2"]));
    }

    #[tokio::test]
    async fn url_lookups_use_target_codes() {
        let transport = FakeTransport::new(200, r#"{"url":"https://popbill.invalid/view"}"#);
        let svc = service(&transport);
        let user = UserId::new("testkorea").unwrap();
        let k = key("K1");

        svc.get_url(&corp(), &user, CashbillBox::Temporary).await.unwrap();
        svc.get_url(&corp(), &user, CashbillBox::Sales).await.unwrap();
        svc.get_popup_url(&corp(), &k, &user).await.unwrap();
        svc.get_print_url(&corp(), &k, &user).await.unwrap();
        svc.get_eprint_url(&corp(), &k, &user).await.unwrap();
        let url = svc.get_mail_url(&corp(), &k, &user).await.unwrap();
        assert_eq!(url, "https://popbill.invalid/view");

        let paths: Vec<String> = transport.requests().iter().map(path_and_query).collect();
        assert_eq!(
            paths,
            vec![
                "/Cashbill?TG=TBOX",
                "/Cashbill?TG=PBOX",
                "/Cashbill/K1?TG=POPUP",
                "/Cashbill/K1?TG=PRINT",
                "/Cashbill/K1?TG=EPRINT",
                "/Cashbill/K1?TG=MAIL",
            ]
        );
        assert!(
            transport
                .requests()
                .iter()
                .all(|request| header(request, "x-pb-userid") == Some("testkorea"))
        );
    }

    #[tokio::test]
    async fn mass_print_posts_keys_and_returns_url() {
        let transport = FakeTransport::new(200, r#"{"url":"https://popbill.invalid/prints"}"#);
        let user = UserId::new("testkorea").unwrap();
        let url = service(&transport)
            .get_mass_print_url(&corp(), &[key("K1"), key("K2")], &user)
            .await
            .unwrap();
        assert_eq!(url, "https://popbill.invalid/prints");

        let request = transport.last_request();
        assert!(is_post(&request));
        assert_eq!(path_and_query(&request), "/Cashbill/Prints");
        assert_eq!(json_body(&request), json!(["K1", "K2"]));
    }

    #[tokio::test]
    async fn unit_cost_detail_and_logs_use_expected_paths() {
        let transport = FakeTransport::new(200, r#"{"unitCost":"11.0"}"#)
            .then(200, r#"{"mgtKey":"K1","itemName":"coffee"}"#)
            .then(200, r#"[{"procType":"ISSUE"}]"#);
        let svc = service(&transport);

        let cost = svc.get_unit_cost(&corp()).await.unwrap();
        assert_eq!(cost.as_f64(), Some(11.0));
        let detail = svc.get_detail_info(&corp(), &key("K1")).await.unwrap();
        assert_eq!(detail.item_name.as_deref(), Some("coffee"));
        let logs = svc.get_logs(&corp(), &key("K1")).await.unwrap();
        assert_eq!(logs[0].proc_type.as_deref(), Some("ISSUE"));

        let paths: Vec<String> = transport.requests().iter().map(path_and_query).collect();
        assert_eq!(
            paths,
            vec!["/Cashbill?cfg=UNITCOST", "/Cashbill/K1?Detail", "/Cashbill/K1/Logs"]
        );
    }

    #[tokio::test]
    async fn notifications_carry_receivers_and_overrides() {
        let transport = FakeTransport::new(200, OK);
        let svc = service(&transport);
        let sender = ContactNumber::new("07043042991").unwrap();
        let receiver = ContactNumber::new("01012345678").unwrap();

        svc.send_email(&corp(), &key("K1"), &Email::new("a@b.kr").unwrap(), None)
            .await
            .unwrap();
        svc.send_sms(&corp(), &key("K1"), Some(&sender), &receiver, "receipt issued", None)
            .await
            .unwrap();
        svc.send_fax(&corp(), &key("K1"), Some(&sender), &receiver, None)
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(header(&requests[0], "X-HTTP-Method-Override"), Some("EMAIL"));
        assert_eq!(json_body(&requests[0]), json!({"receiver": "a@b.kr"}));
        assert_eq!(header(&requests[1], "X-HTTP-Method-Override"), Some("SMS"));
        assert_eq!(
            json_body(&requests[1]),
            json!({"sender": "07043042991", "receiver": "01012345678", "contents": "receipt issued"})
        );
        assert_eq!(header(&requests[2], "X-HTTP-Method-Override"), Some("FAX"));
        assert_eq!(
            json_body(&requests[2]),
            json!({"sender": "07043042991", "receiver": "01012345678"})
        );
    }

    #[tokio::test]
    async fn requests_use_cash_receipt_scope() {
        let transport = FakeTransport::new(200, r#"{"unitCost":"11"}"#);
        let tokens = FakeTokens::default();
        let svc = CashbillService::new(make_client(transport, tokens.clone()));
        assert_eq!(svc.scopes(), &[Scope::Cashbill]);

        svc.get_unit_cost(&corp()).await.unwrap();
        assert_eq!(tokens.calls()[0].0, vec![Scope::Cashbill]);
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_parse_error() {
        let transport = FakeTransport::new(200, "not json");
        let err = service(&transport)
            .get_info(&corp(), &key("K1"))
            .await
            .unwrap_err();
        assert!(matches!(err, PopbillError::Parse(_)));
    }
}
