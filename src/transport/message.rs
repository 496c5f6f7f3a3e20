use serde::{Deserialize, Serialize};

use super::common::{TransportError, is_blank_ref};
use crate::domain::{ContactNumber, MessageOptions, MessageReceiver, MessageResult, ReserveDateTime};

#[derive(Debug, Clone, Serialize)]
struct SendMessageJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    snd: Option<&'a str>,
    #[serde(skip_serializing_if = "is_blank_ref")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "is_blank_ref")]
    subject: Option<&'a str>,
    #[serde(rename = "sndDT", skip_serializing_if = "Option::is_none")]
    reserve_dt: Option<&'a str>,
    msgs: Vec<MessageReceiverJson<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct MessageReceiverJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    snd: Option<&'a str>,
    rcv: &'a str,
    #[serde(skip_serializing_if = "is_blank_ref")]
    rcvnm: Option<&'a str>,
    #[serde(skip_serializing_if = "is_blank_ref")]
    msg: Option<&'a str>,
    #[serde(skip_serializing_if = "is_blank_ref")]
    sjt: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageResultJson {
    #[serde(default)]
    state: Option<i64>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(rename = "type", default)]
    message_type: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    send_num: Option<String>,
    #[serde(default)]
    receive_num: Option<String>,
    #[serde(default)]
    receive_name: Option<String>,
    #[serde(rename = "reserveDT", default)]
    reserve_dt: Option<String>,
    #[serde(rename = "sendDT", default)]
    send_dt: Option<String>,
    #[serde(rename = "resultDT", default)]
    result_dt: Option<String>,
    #[serde(default)]
    send_result: Option<String>,
}

/// Request body shared by every message send, including the `form` part of MMS.
///
/// `include_subject` is `false` for SMS, which has no subject line.
pub fn encode_send_message(
    receivers: &[MessageReceiver],
    options: &MessageOptions,
    include_subject: bool,
) -> Result<String, TransportError> {
    let body = SendMessageJson {
        snd: options.sender.as_ref().map(ContactNumber::raw),
        content: options.content.as_deref(),
        subject: options.subject.as_deref().filter(|_| include_subject),
        reserve_dt: options.reserve_dt.as_ref().map(ReserveDateTime::as_str),
        msgs: receivers
            .iter()
            .map(|receiver| MessageReceiverJson {
                snd: receiver.sender.as_ref().map(ContactNumber::raw),
                rcv: receiver.receiver.raw(),
                rcvnm: receiver.receiver_name.as_deref(),
                msg: receiver.content.as_deref(),
                sjt: receiver.subject.as_deref().filter(|_| include_subject),
            })
            .collect(),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn decode_message_results(json: &str) -> Result<Vec<MessageResult>, TransportError> {
    let parsed: Vec<MessageResultJson> = serde_json::from_str(json)?;
    Ok(parsed
        .into_iter()
        .map(|item| MessageResult {
            state: item.state,
            subject: item.subject,
            message_type: item.message_type,
            content: item.content,
            send_num: item.send_num,
            receive_num: item.receive_num,
            receive_name: item.receive_name,
            reserve_dt: item.reserve_dt,
            send_dt: item.send_dt,
            result_dt: item.result_dt,
            send_result: item.send_result,
        })
        .collect())
}
