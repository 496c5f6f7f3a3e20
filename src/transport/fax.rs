use serde::{Deserialize, Serialize};

use super::common::{TransportError, is_blank_ref};
use crate::domain::{ContactNumber, FaxRecipients, FaxResult, ReserveDateTime};

#[derive(Debug, Clone, Serialize)]
struct SendFaxJson<'a> {
    snd: &'a str,
    #[serde(rename = "fCnt")]
    file_count: usize,
    rcvs: Vec<FaxReceiverJson<'a>>,
    #[serde(rename = "sndDT", skip_serializing_if = "Option::is_none")]
    reserve_dt: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
struct FaxReceiverJson<'a> {
    rcv: &'a str,
    #[serde(skip_serializing_if = "is_blank_ref")]
    rcvnm: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FaxResultJson {
    #[serde(default)]
    send_state: Option<i64>,
    #[serde(default)]
    conv_state: Option<i64>,
    #[serde(default)]
    send_num: Option<String>,
    #[serde(default)]
    receive_num: Option<String>,
    #[serde(default)]
    receive_name: Option<String>,
    #[serde(default)]
    send_page_cnt: Option<i64>,
    #[serde(default)]
    success_page_cnt: Option<i64>,
    #[serde(default)]
    fail_page_cnt: Option<i64>,
    #[serde(default)]
    refund_page_cnt: Option<i64>,
    #[serde(default)]
    cancel_page_cnt: Option<i64>,
    #[serde(rename = "reserveDT", default)]
    reserve_dt: Option<String>,
    #[serde(rename = "sendDT", default)]
    send_dt: Option<String>,
    #[serde(rename = "resultDT", default)]
    result_dt: Option<String>,
    #[serde(default)]
    send_result: Option<String>,
}

/// JSON metadata part (`form`) of a multipart fax send.
pub fn encode_send_fax_form(
    sender: &ContactNumber,
    receivers: &FaxRecipients,
    file_count: usize,
    reserve_dt: Option<&ReserveDateTime>,
) -> Result<String, TransportError> {
    let form = SendFaxJson {
        snd: sender.raw(),
        file_count,
        rcvs: receivers
            .as_slice()
            .iter()
            .map(|receiver| FaxReceiverJson {
                rcv: receiver.receive_num.raw(),
                rcvnm: receiver.receive_name.as_deref(),
            })
            .collect(),
        reserve_dt: reserve_dt.map(ReserveDateTime::as_str),
    };
    Ok(serde_json::to_string(&form)?)
}

pub fn decode_fax_results(json: &str) -> Result<Vec<FaxResult>, TransportError> {
    let parsed: Vec<FaxResultJson> = serde_json::from_str(json)?;
    Ok(parsed
        .into_iter()
        .map(|item| FaxResult {
            send_state: item.send_state,
            conv_state: item.conv_state,
            send_num: item.send_num,
            receive_num: item.receive_num,
            receive_name: item.receive_name,
            send_page_cnt: item.send_page_cnt,
            success_page_cnt: item.success_page_cnt,
            fail_page_cnt: item.fail_page_cnt,
            refund_page_cnt: item.refund_page_cnt,
            cancel_page_cnt: item.cancel_page_cnt,
            reserve_dt: item.reserve_dt,
            send_dt: item.send_dt,
            result_dt: item.result_dt,
            send_result: item.send_result,
        })
        .collect())
}
