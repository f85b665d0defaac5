use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an access token.
///
/// Field names on the wire are `userId`, `username`, `role`, `iat`, `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Identifier of the authenticated user
    pub user_id: String,

    /// Username at the time of login
    pub username: String,

    /// Authorization role
    pub role: String,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp), absent for non-expiring tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Role granted to every user that logs in with a password.
    ///
    /// Not derived from storage: all accounts are ordinary accounts.
    pub const NORMAL_ROLE: &'static str = "normal";

    /// Create claims for an authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username
    ///
    /// # Returns
    /// Claims with the normal role and `iat` set to now, without expiry
    pub fn for_user(user_id: impl ToString, username: impl ToString) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.to_string(),
            role: Self::NORMAL_ROLE.to_string(),
            iat: Some(Utc::now().timestamp()),
            exp: None,
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Expire the token `hours` after it was issued (or after now if `iat` is unset).
    ///
    /// Saturates at `i64::MAX` instead of overflowing.
    pub fn expiring_after_hours(self, hours: i64) -> Self {
        let issued_at = self.iat.unwrap_or_else(|| Utc::now().timestamp());
        self.with_expiration(issued_at.saturating_add(hours.saturating_mul(60 * 60)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user("user123", "alice");

        assert_eq!(claims.user_id, "user123");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "normal");
        assert!(claims.iat.is_some());
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_expiring_after_hours() {
        let claims = Claims::for_user("user123", "alice")
            .with_issued_at(1_000)
            .expiring_after_hours(24);

        assert_eq!(claims.exp, Some(1_000 + 24 * 60 * 60));
    }

    #[test]
    fn test_huge_lifetime_saturates() {
        let claims = Claims::for_user("user123", "alice")
            .with_issued_at(1_000)
            .expiring_after_hours(i64::MAX);

        assert_eq!(claims.exp, Some(i64::MAX));
    }

    #[test]
    fn test_wire_format() {
        let claims = Claims::for_user("42", "alice").with_issued_at(1234567800);
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "userId": "42",
                "username": "alice",
                "role": "normal",
                "iat": 1234567800
            })
        );
    }
}
