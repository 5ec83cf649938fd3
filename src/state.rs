/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - store: DocumentStore, auth: AuthService, notifier: Notifier
 * - Clone 前提で持つ (内部は Arc で Clone cheap)
 */
use std::sync::Arc;

use crate::services::{auth::AuthService, notify::Notifier, store::DocumentStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<AuthService>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        auth: Arc<AuthService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            auth,
            notifier,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend_name())
            .field("auth", &self.auth)
            .field("notifier", &self.notifier.backend_name())
            .finish()
    }
}
