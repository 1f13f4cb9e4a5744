//! Login record.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// One row of the `logins` table: a user id and the login time.
///
/// `time` uses the `YYYY-MM-DD HH:MM:SS` text form stored by the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Login {
    id: Option<RecordId>,
    user_id: RecordId,
    time: String,
}

impl Login {
    pub fn new(user_id: RecordId, time: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id,
            time: time.into(),
        }
    }

    pub fn with_id(id: RecordId, user_id: RecordId, time: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            user_id,
            time: time.into(),
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn user_id(&self) -> RecordId {
        self.user_id
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    pub fn set_user_id(&mut self, user_id: RecordId) {
        self.user_id = user_id;
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.time = time.into();
    }
}

#[cfg(test)]
mod tests {
    use super::Login;

    #[test]
    fn new_login_has_no_id() {
        let login = Login::new(8, "2017-10-28 07:43:08");
        assert_eq!(login.id(), None);
        assert_eq!(login.user_id(), 8);
        assert_eq!(login.time(), "2017-10-28 07:43:08");
    }

    #[test]
    fn json_shape_uses_snake_case_fields() {
        let login = Login::with_id(3, 8, "2017-10-28 07:43:08");
        let json = serde_json::to_string(&login).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"user_id":8,"time":"2017-10-28 07:43:08"}"#
        );

        let parsed: Login = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, login);
    }
}
