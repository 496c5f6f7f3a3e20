use serde::Deserialize;
use serde::de::Error as DeError;

/// Scalar returned by Popbill as either a JSON string or a JSON number.
///
/// Numbers keep their raw JSON token, so `11.0` stays `"11.0"` instead of
/// becoming `"11"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportText(String);

impl TransportText {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self(parsed))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom("expected a JSON string or number")),
        }
    }
}

pub fn text(value: Option<TransportText>) -> Option<String> {
    value.map(TransportText::into_string)
}
