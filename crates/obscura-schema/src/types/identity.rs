use serde::{Deserialize, Serialize};
use strum_macros::Display;
use uuid::Uuid;

/// The authenticated principal returned by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Identity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "user_metadata")]
    pub metadata: IdentityMetadata,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentityMetadata {
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    // Any role Obscura doesn't know about gets treated as a regular user.
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_from_auth_user() {
        let identity: Identity = serde_json::from_str(
            r#"{
                "id": "7c0a1f0e-5b2e-4d4f-9c39-1c7c2f1b8a11",
                "email": "jane@x.com",
                "aud": "authenticated",
                "user_metadata": { "role": "admin" }
            }"#,
        )
        .unwrap();

        assert_eq!(identity.email.as_deref(), Some("jane@x.com"));
        assert_eq!(identity.metadata.role, Some(Role::Admin));
    }

    #[test]
    fn should_treat_unknown_roles_as_user() {
        let role: Role = serde_json::from_str(r#""moderator""#).unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn should_allow_missing_metadata() {
        let identity: Identity =
            serde_json::from_str(r#"{ "id": "7c0a1f0e-5b2e-4d4f-9c39-1c7c2f1b8a11" }"#).unwrap();
        assert_eq!(identity.metadata.role, None);
    }
}
