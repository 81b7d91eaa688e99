//! Contact Record Data Structures
//!
//! A contact record is one entry in the shared collection: a name, an email,
//! a free-text message and the store-assigned creation time. The stored field
//! names (`nombre`, `mensaje`) are fixed by existing data and are kept on the
//! wire only; the Rust side uses English names.

use serde::{Deserialize, Serialize};

/// Wire name of the name field
pub const FIELD_NAME: &str = "nombre";
/// Wire name of the email field
pub const FIELD_EMAIL: &str = "email";
/// Wire name of the message field
pub const FIELD_MESSAGE: &str = "mensaje";
/// Wire name of the creation timestamp
pub const FIELD_CREATED_AT: &str = "createdAt";

/// A record as read back from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Key the record is stored under
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Server clock at write time, epoch milliseconds
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl ContactRecord {
    /// Build a record from a stored child value.
    ///
    /// Missing fields fall back to empty strings and a zero timestamp; a value
    /// that is not an object, or a field of the wrong type, is an error.
    pub fn from_stored(
        id: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        let stored: StoredContact = serde_json::from_value(value)?;
        Ok(Self {
            id: id.into(),
            name: stored.name.unwrap_or_default(),
            email: stored.email.unwrap_or_default(),
            message: stored.message.unwrap_or_default(),
            created_at: stored.created_at.unwrap_or_default(),
        })
    }

    /// Creation time as a UTC datetime, if representable
    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.created_at)
    }
}

/// Stored representation of a record value
#[derive(Debug, Deserialize)]
struct StoredContact {
    #[serde(rename = "nombre", default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(rename = "mensaje", default)]
    message: Option<String>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<i64>,
}

/// Placeholder the store replaces with its own clock at write time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerTimestamp;

impl Serialize for ServerTimestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(".sv", "timestamp")?;
        map.end()
    }
}

/// A validated record waiting to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: ServerTimestamp,
}

impl NewContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            created_at: ServerTimestamp,
        }
    }

    /// Resolve into a stored record, the way the store does on write
    pub fn into_record(self, id: impl Into<String>, created_at: i64) -> ContactRecord {
        ContactRecord {
            id: id.into(),
            name: self.name,
            email: self.email,
            message: self.message,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_contact_wire_format() {
        let contact = NewContact::new("Ana", "ana@x.com", "Hola");
        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(
            value,
            json!({
                "nombre": "Ana",
                "email": "ana@x.com",
                "mensaje": "Hola",
                "createdAt": { ".sv": "timestamp" }
            })
        );
    }

    #[test]
    fn test_from_stored_full_value() {
        let record = ContactRecord::from_stored(
            "-Nabc",
            json!({ "nombre": "Ana", "email": "ana@x.com", "mensaje": "Hola", "createdAt": 1700000000000_i64 }),
        )
        .unwrap();
        assert_eq!(record.id, "-Nabc");
        assert_eq!(record.name, "Ana");
        assert_eq!(record.email, "ana@x.com");
        assert_eq!(record.message, "Hola");
        assert_eq!(record.created_at, 1_700_000_000_000);
    }

    #[test]
    fn test_from_stored_missing_fields_default() {
        let record = ContactRecord::from_stored("k", json!({ "nombre": "Solo" })).unwrap();
        assert_eq!(record.name, "Solo");
        assert_eq!(record.email, "");
        assert_eq!(record.created_at, 0);
    }

    #[test]
    fn test_from_stored_null_field_defaults() {
        let record = ContactRecord::from_stored("k", json!({ "email": null })).unwrap();
        assert_eq!(record.email, "");
    }

    #[test]
    fn test_from_stored_rejects_scalar() {
        assert!(ContactRecord::from_stored("k", json!("just a string")).is_err());
    }

    #[test]
    fn test_from_stored_rejects_wrong_type() {
        assert!(ContactRecord::from_stored("k", json!({ "createdAt": "yesterday" })).is_err());
    }

    #[test]
    fn test_from_stored_ignores_extra_fields() {
        let record =
            ContactRecord::from_stored("k", json!({ "nombre": "Ana", "extra": true })).unwrap();
        assert_eq!(record.name, "Ana");
    }

    #[test]
    fn test_created_at_utc() {
        let record = NewContact::new("a", "a@b.co", "m").into_record("k", 0);
        assert_eq!(record.created_at_utc().unwrap().timestamp(), 0);
    }
}
