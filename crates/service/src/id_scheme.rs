use std::fmt;

use mongodb::bson::oid::ObjectId;

/// Validation and parsing rule for external identifier strings, varying by
/// datastore family. Purely syntactic; a scheme never touches the store.
pub trait IdScheme: Send + Sync + 'static {
    type Key: Clone + fmt::Debug + Send + Sync + 'static;

    const NAME: &'static str;

    /// Parse an external identifier into the store's native key type.
    /// `None` means the string is malformed and must not reach the store.
    fn parse(raw: &str) -> Option<Self::Key>;
}

/// Base-10 integer keys, as assigned by auto-increment columns.
pub struct SequentialScheme;

impl IdScheme for SequentialScheme {
    type Key = i32;

    const NAME: &'static str = "sequential";

    fn parse(raw: &str) -> Option<i32> {
        raw.parse::<i32>().ok()
    }
}

/// 24-hex-character document keys with no ordering semantics.
pub struct OpaqueScheme;

impl IdScheme for OpaqueScheme {
    type Key = ObjectId;

    const NAME: &'static str = "opaque";

    fn parse(raw: &str) -> Option<ObjectId> {
        ObjectId::parse_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_accepts_integers_only() {
        assert_eq!(SequentialScheme::parse("42"), Some(42));
        assert_eq!(SequentialScheme::parse("-7"), Some(-7));
        assert_eq!(SequentialScheme::parse("abc"), None);
        assert_eq!(SequentialScheme::parse("4.2"), None);
        assert_eq!(SequentialScheme::parse(""), None);
    }

    #[test]
    fn opaque_requires_exactly_24_hex_chars() {
        let hex = "65f2a1b2c3d4e5f60718293a";
        assert_eq!(OpaqueScheme::parse(hex).map(|o| o.to_hex()), Some(hex.to_string()));
        assert!(OpaqueScheme::parse("not-an-id").is_none());
        assert!(OpaqueScheme::parse("65f2a1b2c3d4e5f60718293").is_none());
        assert!(OpaqueScheme::parse("65f2a1b2c3d4e5f60718293ab").is_none());
        assert!(OpaqueScheme::parse("zzf2a1b2c3d4e5f60718293a").is_none());
    }
}
