//! User profile type.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;

/// The authenticated user's profile as the backend returns it.
///
/// Owned exclusively by the session; the backend is authoritative for every
/// field, so profile updates replace this record wholesale rather than
/// merging into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend-issued user ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Given name, shown in greetings.
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Login email address.
    pub email: Email,
}

impl UserProfile {
    /// Full display name, as sent to the register endpoint: the two name
    /// parts joined with a space and trimmed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mongo_style_id() {
        let user: UserProfile = serde_json::from_str(
            r#"{"_id":"u1","firstName":"Avi","lastName":"Cohen","email":"a@b.com"}"#,
        )
        .expect("deserialize");
        assert_eq!(user.id, UserId::new("u1"));
        assert_eq!(user.first_name, "Avi");
    }

    #[test]
    fn tolerates_missing_last_name() {
        let user: UserProfile =
            serde_json::from_str(r#"{"id":"u1","firstName":"Avi","email":"a@b.com"}"#)
                .expect("deserialize");
        assert_eq!(user.last_name, "");
        assert_eq!(user.full_name(), "Avi");
    }
}
