//! User record.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// One row of the `users` table.
///
/// `password` holds a hash produced by the caller; this crate never hashes
/// or compares passwords and never serializes the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: Option<RecordId>,
    username: String,
    email: String,
    #[serde(skip_serializing, default)]
    password: String,
}

impl User {
    /// Creates an unsaved user. The id is assigned by `UserRepository::create`.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Rebuilds a persisted user from stored columns.
    pub fn with_id(
        id: RecordId,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let mut user = Self::new(username, email, password);
        user.id = Some(id);
        user
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn default_user_is_blank_and_unsaved() {
        let user = User::default();
        assert_eq!(user.id(), None);
        assert!(user.username().is_empty());
        assert!(user.email().is_empty());
        assert!(user.password().is_empty());
    }

    #[test]
    fn setters_replace_single_fields() {
        let mut user = User::new("admin", "a@x.com", "hash1");
        user.set_email("b@x.com");
        user.set_id(4);

        assert_eq!(user.id(), Some(4));
        assert_eq!(user.username(), "admin");
        assert_eq!(user.email(), "b@x.com");
        assert_eq!(user.password(), "hash1");
    }

    #[test]
    fn serialization_omits_password() {
        let user = User::with_id(1, "admin", "a@x.com", "hash1");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["username"], "admin");
        assert_eq!(json["id"], 1);
        assert!(json.get("password").is_none());
    }
}
