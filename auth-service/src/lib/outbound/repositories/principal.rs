use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auth::errors::AuthError;
use crate::auth::models::CreatePrincipal;
use crate::auth::models::Principal;
use crate::auth::ports::PrincipalRepository;

/// In-memory principal store.
///
/// Persistence proper belongs to the external user store; this adapter
/// keeps principals in a map keyed by email so the binary and the black-box
/// tests run without external services. Ids are assigned from a process
/// counter, matching the store-assigns-id contract of the port.
pub struct InMemoryPrincipalRepository {
    principals: RwLock<HashMap<String, Principal>>,
    next_id: AtomicI64,
}

impl InMemoryPrincipalRepository {
    pub fn new() -> Self {
        Self {
            principals: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPrincipalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn create(&self, principal: CreatePrincipal) -> Result<Principal, AuthError> {
        let mut principals = self.principals.write().await;

        let email = principal.email.as_str().to_string();
        if principals.contains_key(&email) {
            return Err(AuthError::PrincipalAlreadyExists(email));
        }

        let created = Principal {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            email: principal.email,
            username: principal.username,
            password_hash: principal.password_hash,
            role: principal.role,
            enabled: true,
            account_non_locked: true,
            account_non_expired: true,
            credentials_non_expired: true,
        };

        principals.insert(email, created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, AuthError> {
        let principals = self.principals.read().await;
        Ok(principals.get(email).cloned())
    }
}
