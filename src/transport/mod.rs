//! Transport layer: wire-format details (JSON serialization/deserialization).

mod cashbill;
mod common;
mod fax;
mod message;
mod text;

pub use cashbill::{
    decode_cashbill_detail, decode_cashbill_info, decode_cashbill_infos, decode_cashbill_logs,
    decode_item_key_present, encode_cashbill, encode_email, encode_fax_notice, encode_memo,
    encode_mgt_keys, encode_sms_notice,
};
pub use common::{
    TransportError, decode_api_response, decode_error_body, decode_receipt_num,
    decode_unit_cost, decode_url,
};
pub use fax::{decode_fax_results, encode_send_fax_form};
pub use message::{decode_message_results, encode_send_message};
