use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// External identifier of a persisted record. The variant is decided by the
/// deployed backend, never mixed within one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordId {
    /// Auto-incrementing relational key.
    Sequential(i32),
    /// 24-hex-character document key.
    Opaque(String),
}

/// The one entity of the system: a store-assigned id plus the text payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRecord {
    pub id: RecordId,
    pub text: String,
}

// Wire shape follows the backend family: `{"id": <n>, "list": ...}` for
// sequential keys, `{"_id": "<hex>", "list": ...}` for opaque ones.
impl Serialize for ListRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match &self.id {
            RecordId::Sequential(n) => map.serialize_entry("id", n)?,
            RecordId::Opaque(hex) => map.serialize_entry("_id", hex)?,
        }
        map.serialize_entry("list", &self.text)?;
        map.end()
    }
}

/// Incoming `POST`/`PUT` body. The field is kept as a raw JSON value so that
/// "present and string-typed" is an explicit check in the service rather than
/// a deserializer rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItemInput {
    #[serde(default)]
    pub list: Option<serde_json::Value>,
}

impl ListItemInput {
    pub fn text(text: &str) -> Self {
        Self { list: Some(serde_json::Value::String(text.to_owned())) }
    }
}
