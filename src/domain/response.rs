/// Generic processing result (`code` + `message`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub code: i64,
    pub message: Option<String>,
}

/// Cash receipt state and summary, as returned by state lookups.
///
/// Fields mirror the response; anything the server leaves out stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashbillInfo {
    pub item_key: Option<String>,
    pub mgt_key: Option<String>,
    pub trade_date: Option<String>,
    pub issue_dt: Option<String>,
    pub customer_name: Option<String>,
    pub item_name: Option<String>,
    pub identity_num: Option<String>,
    pub taxation_type: Option<String>,
    pub total_amount: Option<String>,
    pub trade_usage: Option<String>,
    pub trade_type: Option<String>,
    pub state_code: Option<i64>,
    pub state_dt: Option<String>,
    pub print_yn: Option<bool>,
    pub confirm_num: Option<String>,
    pub org_trade_date: Option<String>,
    pub org_confirm_num: Option<String>,
    pub nts_send_dt: Option<String>,
    pub nts_result: Option<String>,
    pub nts_result_dt: Option<String>,
    pub nts_result_code: Option<String>,
    pub nts_result_message: Option<String>,
    pub reg_dt: Option<String>,
}

/// One entry of a cash receipt's history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashbillLog {
    pub doc_log_type: Option<i64>,
    pub log: Option<String>,
    pub proc_type: Option<String>,
    pub proc_memo: Option<String>,
    pub reg_dt: Option<String>,
    pub ip: Option<String>,
}

/// Per-recipient fax transmission result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaxResult {
    pub send_state: Option<i64>,
    pub conv_state: Option<i64>,
    pub send_num: Option<String>,
    pub receive_num: Option<String>,
    pub receive_name: Option<String>,
    pub send_page_cnt: Option<i64>,
    pub success_page_cnt: Option<i64>,
    pub fail_page_cnt: Option<i64>,
    pub refund_page_cnt: Option<i64>,
    pub cancel_page_cnt: Option<i64>,
    pub reserve_dt: Option<String>,
    pub send_dt: Option<String>,
    pub result_dt: Option<String>,
    pub send_result: Option<String>,
}

/// Per-recipient message delivery result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageResult {
    pub state: Option<i64>,
    pub subject: Option<String>,
    pub message_type: Option<String>,
    pub content: Option<String>,
    pub send_num: Option<String>,
    pub receive_num: Option<String>,
    pub receive_name: Option<String>,
    pub reserve_dt: Option<String>,
    pub send_dt: Option<String>,
    pub result_dt: Option<String>,
    pub send_result: Option<String>,
}
