//! In-process implementation of both storage traits.
//!
//! Enforces the same uniqueness rules as the database schema so handler and
//! loader behaviour can be exercised without a Postgres instance.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::auth::{repo::UserStore, repo_types::User};
use crate::catalog::{
    repo::CatalogStore,
    repo_types::{CatalogEntry, NewCatalogEntry},
};
use crate::error::StoreError;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    catalog: Vec<CatalogEntry>,
    next_user_id: i32,
    next_entry_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn user(&self, login: &str) -> Option<User> {
        self.lock().users.iter().find(|u| u.login == login).cloned()
    }

    pub fn catalog_len(&self) -> usize {
        self.lock().catalog.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn login_taken(&self, login: &str) -> Result<bool, StoreError> {
        Ok(self.lock().users.iter().any(|u| u.login == login))
    }

    async fn create(&self, login: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.login == login) {
            return Err(StoreError::DuplicateLogin(login.to_string()));
        }
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            login: login.to_string(),
            password: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
            last_request: None,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_credentials(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.login == login && u.password == password_hash)
            .cloned())
    }

    async fn touch_last_request(&self, login: &str, at: OffsetDateTime) -> Result<bool, StoreError> {
        let mut tables = self.lock();
        let mut touched = false;
        for user in tables.users.iter_mut().filter(|u| u.login == login) {
            user.last_request = Some(at);
            touched = true;
        }
        Ok(touched)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        Ok(self.lock().catalog.clone())
    }

    async fn replace_all(&self, entries: &[NewCatalogEntry]) -> Result<usize, StoreError> {
        let mut seen = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.type_name.as_str()) {
                return Err(StoreError::DuplicateType(entry.type_name.clone()));
            }
        }

        let mut tables = self.lock();
        let mut next_id = tables.next_entry_id;
        let fresh: Vec<CatalogEntry> = entries
            .iter()
            .map(|e| {
                next_id += 1;
                CatalogEntry {
                    id: next_id,
                    type_name: e.type_name.clone(),
                    mutability: e.mutability.clone(),
                    description: e.description.clone(),
                    syntax_examples: e.syntax_examples.clone(),
                }
            })
            .collect();
        tables.next_entry_id = next_id;
        tables.catalog = fresh;
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> NewCatalogEntry {
        NewCatalogEntry {
            type_name: name.into(),
            mutability: "immutable".into(),
            description: None,
            syntax_examples: None,
        }
    }

    #[tokio::test]
    async fn duplicate_login_is_rejected() {
        let store = MemoryStore::new();
        store.create("alice", "h").await.unwrap();
        let err = store.create("alice", "h2").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateLogin(ref l) if l == "alice"));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn failed_replace_keeps_previous_catalog() {
        let store = MemoryStore::new();
        store.replace_all(&[entry("int")]).await.unwrap();

        let err = store
            .replace_all(&[entry("str"), entry("str")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateType(_)));

        let rows = store.list().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].type_name, "int");
    }

    #[tokio::test]
    async fn touch_reports_unknown_login() {
        let store = MemoryStore::new();
        assert!(!store
            .touch_last_request("ghost", OffsetDateTime::now_utc())
            .await
            .unwrap());
    }
}
