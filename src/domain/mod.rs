//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    CASHBILL_MAX_BULK_KEYS, Cashbill, CashbillBox, FAX_MAX_FILES, FaxFiles, FaxReceiver,
    FaxRecipients, MMS_FILES, MessageOptions, MessageReceiver, MessageType, Operation, Scope,
    SingleMessage,
};
pub use response::{ApiResponse, CashbillInfo, CashbillLog, FaxResult, MessageResult};
pub use validation::ValidationError;
pub use value::{
    ContactNumber, CorpNum, Email, MgtKey, PhoneNumber, ReceiptNum, ReserveDateTime,
    SecurityToken, UnitCost, UserId,
};
