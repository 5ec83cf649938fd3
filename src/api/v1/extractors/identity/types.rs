/*
 * Responsibility
 * - Handler / authorize middleware から見える「認証済み identity」の型
 * - access middleware が token を検証して request extensions に一度だけ格納する
 *
 * Notes
 * - JWT の検証は middleware/services 側の責務
 * - request をまたいで共有・永続化しない
 */

/// 認証済みのリクエストに付与される identity
///
/// - `user_id` は token の `sub`（identity provider の uid）
/// - `role` は単一の role claim。付与されていないユーザーもいるので Option
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Option<String>,
    pub role: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, role: Option<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            role: role.filter(|r| !r.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_role_is_treated_as_absent() {
        let identity = Identity::new("u1", Some("   ".to_string()));
        assert_eq!(identity.user_id.as_deref(), Some("u1"));
        assert_eq!(identity.role, None);
    }

    #[test]
    fn role_is_kept_verbatim() {
        let identity = Identity::new("u1", Some("student".to_string()));
        assert_eq!(identity.role.as_deref(), Some("student"));
    }
}
