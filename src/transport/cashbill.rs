use serde::{Deserialize, Serialize};

use super::common::{TransportError, is_blank, is_blank_ref};
use super::text::{TransportText, text};
use crate::domain::{Cashbill, CashbillInfo, CashbillLog, ContactNumber, Email, MgtKey};

/// Wire form of [`Cashbill`], used for both request bodies and detail responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashbillJson {
    #[serde(default, skip_serializing_if = "is_blank")]
    mgt_key: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    trade_date: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    trade_usage: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    trade_type: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    taxation_type: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank", deserialize_with = "lenient")]
    supply_cost: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank", deserialize_with = "lenient")]
    tax: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank", deserialize_with = "lenient")]
    service_fee: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank", deserialize_with = "lenient")]
    total_amount: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    franchise_corp_num: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    franchise_corp_name: Option<String>,
    #[serde(
        rename = "franchiseCEOName",
        default,
        skip_serializing_if = "is_blank"
    )]
    franchise_ceo_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    franchise_addr: Option<String>,
    #[serde(rename = "franchiseTEL", default, skip_serializing_if = "is_blank")]
    franchise_tel: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    identity_num: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    item_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    order_number: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    hp: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    fax: Option<String>,
    #[serde(rename = "smssendYN", default, skip_serializing_if = "Option::is_none")]
    smssend_yn: Option<bool>,
    #[serde(rename = "faxsendYN", default, skip_serializing_if = "Option::is_none")]
    faxsend_yn: Option<bool>,
    #[serde(default, skip_serializing_if = "is_blank")]
    org_confirm_num: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    confirm_num: Option<String>,
}

fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<TransportText>::deserialize(deserializer).map(text)
}

impl From<&Cashbill> for CashbillJson {
    fn from(value: &Cashbill) -> Self {
        Self {
            mgt_key: value.mgt_key.as_ref().map(|key| key.as_str().to_owned()),
            trade_date: value.trade_date.clone(),
            trade_usage: value.trade_usage.clone(),
            trade_type: value.trade_type.clone(),
            taxation_type: value.taxation_type.clone(),
            supply_cost: value.supply_cost.clone(),
            tax: value.tax.clone(),
            service_fee: value.service_fee.clone(),
            total_amount: value.total_amount.clone(),
            franchise_corp_num: value.franchise_corp_num.clone(),
            franchise_corp_name: value.franchise_corp_name.clone(),
            franchise_ceo_name: value.franchise_ceo_name.clone(),
            franchise_addr: value.franchise_addr.clone(),
            franchise_tel: value.franchise_tel.clone(),
            identity_num: value.identity_num.clone(),
            customer_name: value.customer_name.clone(),
            item_name: value.item_name.clone(),
            order_number: value.order_number.clone(),
            email: value.email.clone(),
            hp: value.hp.clone(),
            fax: value.fax.clone(),
            smssend_yn: value.smssend_yn,
            faxsend_yn: value.faxsend_yn,
            org_confirm_num: value.org_confirm_num.clone(),
            confirm_num: value.confirm_num.clone(),
        }
    }
}

impl From<CashbillJson> for Cashbill {
    fn from(value: CashbillJson) -> Self {
        Self {
            // An echoed key that fails `MgtKey` validation is dropped.
            mgt_key: value.mgt_key.and_then(|key| MgtKey::new(key).ok()),
            trade_date: value.trade_date,
            trade_usage: value.trade_usage,
            trade_type: value.trade_type,
            taxation_type: value.taxation_type,
            supply_cost: value.supply_cost,
            tax: value.tax,
            service_fee: value.service_fee,
            total_amount: value.total_amount,
            franchise_corp_num: value.franchise_corp_num,
            franchise_corp_name: value.franchise_corp_name,
            franchise_ceo_name: value.franchise_ceo_name,
            franchise_addr: value.franchise_addr,
            franchise_tel: value.franchise_tel,
            identity_num: value.identity_num,
            customer_name: value.customer_name,
            item_name: value.item_name,
            order_number: value.order_number,
            email: value.email,
            hp: value.hp,
            fax: value.fax,
            smssend_yn: value.smssend_yn,
            faxsend_yn: value.faxsend_yn,
            org_confirm_num: value.org_confirm_num,
            confirm_num: value.confirm_num,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashbillInfoJson {
    #[serde(default)]
    item_key: Option<String>,
    #[serde(default)]
    mgt_key: Option<String>,
    #[serde(default)]
    trade_date: Option<String>,
    #[serde(rename = "issueDT", default)]
    issue_dt: Option<String>,
    #[serde(default)]
    customer_name: Option<String>,
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default)]
    identity_num: Option<String>,
    #[serde(default)]
    taxation_type: Option<String>,
    #[serde(default)]
    total_amount: Option<TransportText>,
    #[serde(default)]
    trade_usage: Option<String>,
    #[serde(default)]
    trade_type: Option<String>,
    #[serde(default)]
    state_code: Option<i64>,
    #[serde(rename = "stateDT", default)]
    state_dt: Option<String>,
    #[serde(rename = "printYN", default)]
    print_yn: Option<bool>,
    #[serde(default)]
    confirm_num: Option<String>,
    #[serde(default)]
    org_trade_date: Option<String>,
    #[serde(default)]
    org_confirm_num: Option<String>,
    #[serde(rename = "ntssendDT", default)]
    nts_send_dt: Option<String>,
    #[serde(rename = "ntsresult", default)]
    nts_result: Option<String>,
    #[serde(rename = "ntsresultDT", default)]
    nts_result_dt: Option<String>,
    #[serde(rename = "ntsresultCode", default)]
    nts_result_code: Option<TransportText>,
    #[serde(rename = "ntsresultMessage", default)]
    nts_result_message: Option<String>,
    #[serde(rename = "regDT", default)]
    reg_dt: Option<String>,
}

impl From<CashbillInfoJson> for CashbillInfo {
    fn from(value: CashbillInfoJson) -> Self {
        Self {
            item_key: value.item_key,
            mgt_key: value.mgt_key,
            trade_date: value.trade_date,
            issue_dt: value.issue_dt,
            customer_name: value.customer_name,
            item_name: value.item_name,
            identity_num: value.identity_num,
            taxation_type: value.taxation_type,
            total_amount: text(value.total_amount),
            trade_usage: value.trade_usage,
            trade_type: value.trade_type,
            state_code: value.state_code,
            state_dt: value.state_dt,
            print_yn: value.print_yn,
            confirm_num: value.confirm_num,
            org_trade_date: value.org_trade_date,
            org_confirm_num: value.org_confirm_num,
            nts_send_dt: value.nts_send_dt,
            nts_result: value.nts_result,
            nts_result_dt: value.nts_result_dt,
            nts_result_code: text(value.nts_result_code),
            nts_result_message: value.nts_result_message,
            reg_dt: value.reg_dt,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashbillLogJson {
    #[serde(default)]
    doc_log_type: Option<i64>,
    #[serde(default)]
    log: Option<String>,
    #[serde(default)]
    proc_type: Option<String>,
    #[serde(default)]
    proc_memo: Option<String>,
    #[serde(rename = "regDT", default)]
    reg_dt: Option<String>,
    #[serde(default)]
    ip: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct MemoJson<'a> {
    #[serde(skip_serializing_if = "is_blank_ref")]
    memo: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
struct EmailJson<'a> {
    receiver: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct NoticeJson<'a> {
    #[serde(skip_serializing_if = "is_blank_ref")]
    sender: Option<&'a str>,
    receiver: &'a str,
    #[serde(skip_serializing_if = "is_blank_ref")]
    contents: Option<&'a str>,
}

pub fn encode_cashbill(cashbill: &Cashbill) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&CashbillJson::from(cashbill))?)
}

/// Body of issue / cancel-issue: `{"memo": ..}`, or `{}` when the memo is blank.
pub fn encode_memo(memo: Option<&str>) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&MemoJson { memo })?)
}

pub fn encode_mgt_keys(keys: &[MgtKey]) -> Result<String, TransportError> {
    let keys: Vec<&str> = keys.iter().map(MgtKey::as_str).collect();
    Ok(serde_json::to_string(&keys)?)
}

pub fn encode_email(receiver: &Email) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&EmailJson {
        receiver: receiver.as_str(),
    })?)
}

pub fn encode_sms_notice(
    sender: Option<&ContactNumber>,
    receiver: &ContactNumber,
    contents: &str,
) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&NoticeJson {
        sender: sender.map(ContactNumber::raw),
        receiver: receiver.raw(),
        contents: Some(contents),
    })?)
}

pub fn encode_fax_notice(
    sender: Option<&ContactNumber>,
    receiver: &ContactNumber,
) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&NoticeJson {
        sender: sender.map(ContactNumber::raw),
        receiver: receiver.raw(),
        contents: None,
    })?)
}

/// `true` when the summary response names an item key.
pub fn decode_item_key_present(json: &str) -> Result<bool, TransportError> {
    let parsed: CashbillInfoJson = serde_json::from_str(json)?;
    Ok(parsed.item_key.is_some_and(|key| !key.is_empty()))
}

pub fn decode_cashbill_info(json: &str) -> Result<CashbillInfo, TransportError> {
    let parsed: CashbillInfoJson = serde_json::from_str(json)?;
    Ok(parsed.into())
}

pub fn decode_cashbill_infos(json: &str) -> Result<Vec<CashbillInfo>, TransportError> {
    let parsed: Vec<CashbillInfoJson> = serde_json::from_str(json)?;
    Ok(parsed.into_iter().map(CashbillInfo::from).collect())
}

pub fn decode_cashbill_detail(json: &str) -> Result<Cashbill, TransportError> {
    let parsed: CashbillJson = serde_json::from_str(json)?;
    Ok(parsed.into())
}

pub fn decode_cashbill_logs(json: &str) -> Result<Vec<CashbillLog>, TransportError> {
    let parsed: Vec<CashbillLogJson> = serde_json::from_str(json)?;
    Ok(parsed
        .into_iter()
        .map(|log| CashbillLog {
            doc_log_type: log.doc_log_type,
            log: log.log,
            proc_type: log.proc_type,
            proc_memo: log.proc_memo,
            reg_dt: log.reg_dt,
            ip: log.ip,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn as_value(body: &str) -> Value {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn encode_cashbill_omits_absent_and_empty_fields() {
        let cashbill = Cashbill {
            mgt_key: Some(MgtKey::new("20150326-01").unwrap()),
            trade_usage: Some("소득공제용".to_owned()),
            total_amount: Some("11000".to_owned()),
            franchise_ceo_name: Some("Hong".to_owned()),
            customer_name: Some(String::new()),
            smssend_yn: Some(false),
            ..Default::default()
        };

        let body = encode_cashbill(&cashbill).unwrap();
        assert_eq!(
            as_value(&body),
            json!({
                "mgtKey": "20150326-01",
                "tradeUsage": "소득공제용",
                "totalAmount": "11000",
                "franchiseCEOName": "Hong",
                "smssendYN": false
            })
        );
    }

    #[test]
    fn encode_memo_skips_blank_memo() {
        assert_eq!(encode_memo(Some("paid")).unwrap(), r#"{"memo":"paid"}"#);
        assert_eq!(encode_memo(Some("")).unwrap(), "{}");
        assert_eq!(encode_memo(None).unwrap(), "{}");
    }

    #[test]
    fn encode_mgt_keys_is_a_plain_array() {
        let keys = vec![MgtKey::new("a-1").unwrap(), MgtKey::new("b_2").unwrap()];
        assert_eq!(encode_mgt_keys(&keys).unwrap(), r#"["a-1","b_2"]"#);
    }

    #[test]
    fn encode_notices() {
        let sender = ContactNumber::new("07043042991").unwrap();
        let receiver = ContactNumber::new("01012345678").unwrap();

        assert_eq!(
            as_value(&encode_sms_notice(Some(&sender), &receiver, "hi").unwrap()),
            json!({"sender": "07043042991", "receiver": "01012345678", "contents": "hi"})
        );
        assert_eq!(
            as_value(&encode_fax_notice(None, &receiver).unwrap()),
            json!({"receiver": "01012345678"})
        );
        assert_eq!(
            encode_email(&Email::new("a@b.kr").unwrap()).unwrap(),
            r#"{"receiver":"a@b.kr"}"#
        );
    }

    #[test]
    fn decode_info_tolerates_missing_and_unknown_fields() {
        let json = r#"
        {
          "itemKey": "015032611000000001",
          "mgtKey": "20150326-01",
          "stateCode": 300,
          "totalAmount": 11000,
          "printYN": false,
          "ntsresultCode": "0000",
          "somethingNew": {"nested": true}
        }
        "#;
        let info = decode_cashbill_info(json).unwrap();
        assert_eq!(info.item_key.as_deref(), Some("015032611000000001"));
        assert_eq!(info.state_code, Some(300));
        assert_eq!(info.total_amount.as_deref(), Some("11000"));
        assert_eq!(info.print_yn, Some(false));
        assert_eq!(info.nts_result_code.as_deref(), Some("0000"));
        assert_eq!(info.customer_name, None);
    }

    #[test]
    fn decode_item_key_presence() {
        assert!(decode_item_key_present(r#"{"itemKey":"0150"}"#).unwrap());
        assert!(!decode_item_key_present(r#"{"itemKey":""}"#).unwrap());
        assert!(!decode_item_key_present("{}").unwrap());
    }

    #[test]
    fn decode_detail_maps_wire_names() {
        let json = r#"
        {
          "mgtKey": "20150326-01",
          "franchiseCEOName": "Hong",
          "franchiseTEL": "070-4304-2991",
          "supplyCost": 10000,
          "smssendYN": true
        }
        "#;
        let detail = decode_cashbill_detail(json).unwrap();
        assert_eq!(detail.mgt_key.as_ref().map(MgtKey::as_str), Some("20150326-01"));
        assert_eq!(detail.franchise_ceo_name.as_deref(), Some("Hong"));
        assert_eq!(detail.franchise_tel.as_deref(), Some("070-4304-2991"));
        assert_eq!(detail.supply_cost.as_deref(), Some("10000"));
        assert_eq!(detail.smssend_yn, Some(true));
    }

    #[test]
    fn decode_logs_and_bulk_infos() {
        let logs = decode_cashbill_logs(
            r#"[{"docLogType":1,"log":"issued","procType":"ISSUE","regDT":"20150326101010"}]"#,
        )
        .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].proc_type.as_deref(), Some("ISSUE"));

        let infos = decode_cashbill_infos(r#"[{"mgtKey":"a"},{"mgtKey":"b"}]"#).unwrap();
        assert_eq!(infos.len(), 2);
        assert!(decode_cashbill_infos(r#"{"mgtKey":"a"}"#).is_err());
    }
}
