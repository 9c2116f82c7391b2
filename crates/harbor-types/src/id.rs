use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a persisted domain object (party, resource, ACL entry, event).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub String);

/// Login name a user authenticates with. Distinct from the user's `ObjectId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Opaque bearer value carried in the `SessionId` cookie.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl ObjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn new_random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SessionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_id_impls {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $ty {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }

            impl From<String> for $ty {
                fn from(value: String) -> Self {
                    Self(value)
                }
            }
        )*
    };
}

string_id_impls!(ObjectId, UserId, SessionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_object_ids_differ() {
        assert_ne!(ObjectId::new_random(), ObjectId::new_random());
    }

    #[test]
    fn ids_display_their_raw_value() {
        assert_eq!(ObjectId::from("realm-1").to_string(), "realm-1");
        assert_eq!(UserId::new("alice").as_str(), "alice");
        assert_eq!(SessionId::from("1:ab".to_string()).as_str(), "1:ab");
    }
}
