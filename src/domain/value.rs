use chrono::{NaiveDateTime, Timelike};
use phonenumber::country;

use crate::domain::validation::ValidationError;

fn non_empty_trimmed(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Business registration number of the Popbill member (`CorpNum`).
///
/// Invariant: non-empty after trimming. Hyphens are stripped, so both
/// `123-45-67890` and `1234567890` address the same member.
pub struct CorpNum(String);

impl CorpNum {
    /// Field name used in error messages (`corpNum`).
    pub const FIELD: &'static str = "corpNum";

    /// Create a validated [`CorpNum`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_empty_trimmed(Self::FIELD, value.into())?;
        let digits: String = value.chars().filter(|c| *c != '-').collect();
        if digits.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(digits))
    }

    /// Borrow the number without hyphens.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Popbill member user id, sent as the `x-pb-userid` header.
///
/// Invariant: non-empty after trimming.
pub struct UserId(String);

impl UserId {
    /// Field name used in error messages (`userId`).
    pub const FIELD: &'static str = "userId";

    /// Create a validated [`UserId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(Self::FIELD, value.into())?))
    }

    /// Borrow the validated user id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Partner-assigned document management key (`mgtKey`).
///
/// Invariant: 1 to 24 characters, each an ASCII letter, digit, `-` or `_`.
/// The key is used verbatim as a URL path segment.
pub struct MgtKey(String);

impl MgtKey {
    /// JSON field name used by Popbill (`mgtKey`).
    pub const FIELD: &'static str = "mgtKey";

    /// Maximum key length accepted by Popbill.
    pub const MAX_LEN: usize = 24;

    /// Create a validated [`MgtKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_empty_trimmed(Self::FIELD, value.into())?;
        let len = value.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::InvalidCharacters {
                field: Self::FIELD,
                input: value,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Receipt number returned by a fax or message send (`receiptNum`).
///
/// Invariant: non-empty, ASCII letters and digits only.
pub struct ReceiptNum(String);

impl ReceiptNum {
    /// JSON field name used by Popbill (`receiptNum`).
    pub const FIELD: &'static str = "receiptNum";

    /// Create a validated [`ReceiptNum`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_empty_trimmed(Self::FIELD, value.into())?;
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidCharacters {
                field: Self::FIELD,
                input: value,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the validated receipt number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone or fax number exactly as it is sent to Popbill.
///
/// Invariant: non-empty after trimming. No normalization is performed; parse into
/// [`PhoneNumber`] and convert when national-digit normalization is wanted.
pub struct ContactNumber(String);

impl ContactNumber {
    /// Field name used in error messages.
    pub const FIELD: &'static str = "contactNumber";

    /// Create a validated (non-empty) contact number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(Self::FIELD, value.into())?))
    }

    /// Raw (trimmed) value as sent to Popbill.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for ContactNumber {
    /// Popbill expects domestic numbers as bare national digits.
    fn from(value: PhoneNumber) -> Self {
        Self(value.national_digits)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number.
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    national_digits: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Field name used in error messages.
    pub const FIELD: &'static str = "phoneNumber";

    /// Parse a phone number, assuming Korea when no country prefix is present.
    pub fn parse_kr(input: impl Into<String>) -> Result<Self, ValidationError> {
        Self::parse(Some(country::Id::KR), input)
    }

    /// Parse and normalize a phone number.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let raw = non_empty_trimmed(Self::FIELD, input.into())?;

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        let national_digits = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::National)
            .to_string()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        Ok(Self {
            raw,
            e164,
            national_digits,
            parsed,
        })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// National number with separators removed (e.g. `01012345678`).
    pub fn national_digits(&self) -> &str {
        &self.national_digits
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Notification e-mail address.
///
/// Invariant: non-empty after trimming. Deliverability is checked by Popbill.
pub struct Email(String);

impl Email {
    /// Field name used in error messages (`receiver`).
    pub const FIELD: &'static str = "receiver";

    /// Create a validated [`Email`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(Self::FIELD, value.into())?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Scheduled send time (`sndDT`) in the fixed `yyyyMMddHHmmss` format.
///
/// Invariant: exactly 14 ASCII digits forming a valid calendar date and time.
pub struct ReserveDateTime(String);

impl ReserveDateTime {
    /// JSON field name used by Popbill (`sndDT`).
    pub const FIELD: &'static str = "sndDT";

    const FORMAT: &'static str = "%Y%m%d%H%M%S";

    /// Validate a 14-digit literal such as `20250101093000`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        // `%S` accepts 60 as a leap second, which chrono encodes as nanoseconds >= 1e9.
        let well_formed = value.len() == 14
            && value.bytes().all(|b| b.is_ascii_digit())
            && NaiveDateTime::parse_from_str(&value, Self::FORMAT)
                .is_ok_and(|parsed| parsed.nanosecond() < 1_000_000_000);
        if !well_formed {
            return Err(ValidationError::InvalidReserveDateTime { input: value });
        }
        Ok(Self(value))
    }

    /// Format a local date-time into the reservation literal.
    pub fn from_naive(value: NaiveDateTime) -> Result<Self, ValidationError> {
        Self::new(value.format(Self::FORMAT).to_string())
    }

    /// Borrow the literal exactly as it is sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the literal back into a date-time.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.0, Self::FORMAT).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-item price reported by Popbill.
///
/// The server's textual amount is preserved as-is (`"11.0"` stays `"11.0"`).
pub struct UnitCost(String);

impl UnitCost {
    pub(crate) fn from_raw(value: String) -> Self {
        Self(value)
    }

    /// Amount exactly as returned by Popbill.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, if the amount parses as a float.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse().ok()
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Session token issued by the Linkhub authentication service.
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct SecurityToken(String);

impl SecurityToken {
    /// Field name used in error messages (`session_token`).
    pub const FIELD: &'static str = "session_token";

    /// Create a validated [`SecurityToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty_trimmed(Self::FIELD, value.into())?))
    }

    /// Borrow the bearer credential.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecurityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecurityToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn corp_num_strips_hyphens() {
        let corp = CorpNum::new(" 123-45-67890 ").unwrap();
        assert_eq!(corp.as_str(), "1234567890");
        assert!(matches!(
            CorpNum::new("--"),
            Err(ValidationError::Empty { field: "corpNum" })
        ));
    }

    #[test]
    fn mgt_key_enforces_length_and_charset() {
        assert!(MgtKey::new("20150325-01_a").is_ok());
        assert!(matches!(
            MgtKey::new(""),
            Err(ValidationError::Empty { field: "mgtKey" })
        ));
        assert!(matches!(
            MgtKey::new("a".repeat(25)),
            Err(ValidationError::TooLong {
                max: 24,
                actual: 25,
                ..
            })
        ));
        assert!(matches!(
            MgtKey::new("bad/key"),
            Err(ValidationError::InvalidCharacters { .. })
        ));
    }

    #[test]
    fn receipt_num_rejects_path_characters() {
        assert!(ReceiptNum::new("015032511000000001").is_ok());
        assert!(ReceiptNum::new("   ").is_err());
        assert!(ReceiptNum::new("0150/Cancel").is_err());
    }

    #[test]
    fn reserve_date_time_requires_valid_fourteen_digits() {
        let dt = ReserveDateTime::new("20250131235959").unwrap();
        assert_eq!(dt.as_str(), "20250131235959");

        assert!(ReserveDateTime::new("2025013123595").is_err());
        assert!(ReserveDateTime::new("2025-01-31 23:59").is_err());
        assert!(ReserveDateTime::new("20250231120000").is_err());
        assert!(ReserveDateTime::new("20250131246000").is_err());
    }

    #[test]
    fn reserve_date_time_rejects_leap_second() {
        assert!(matches!(
            ReserveDateTime::new("20250101093060"),
            Err(ValidationError::InvalidReserveDateTime { .. })
        ));
        assert!(ReserveDateTime::new("20250101093059").is_ok());
    }

    #[test]
    fn reserve_date_time_formats_naive_date_time() {
        let naive = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        let dt = ReserveDateTime::from_naive(naive).unwrap();
        assert_eq!(dt.as_str(), "20250309070500");
        assert_eq!(dt.to_naive(), Some(naive));
    }

    #[test]
    fn phone_number_converts_to_national_digits() {
        let pn = PhoneNumber::parse_kr("+82 10-1234-5678").unwrap();
        assert_eq!(pn.e164(), "+821012345678");
        let contact = ContactNumber::from(pn);
        assert_eq!(contact.raw(), "01012345678");
    }

    #[test]
    fn phone_number_rejects_garbage() {
        assert!(matches!(
            PhoneNumber::parse_kr("not a number"),
            Err(ValidationError::InvalidPhoneNumber { .. })
        ));
    }

    #[test]
    fn unit_cost_keeps_text_and_parses() {
        let cost = UnitCost::from_raw("11.0".to_owned());
        assert_eq!(cost.as_str(), "11.0");
        assert_eq!(cost.as_f64(), Some(11.0));
    }

    #[test]
    fn security_token_debug_is_redacted() {
        let token = SecurityToken::new("secret").unwrap();
        assert_eq!(format!("{token:?}"), "SecurityToken(***)");
        assert_eq!(token.as_str(), "secret");
    }
}
