use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{auth::repo_types::User, error::AuthError};

#[derive(Debug, Default)]
struct Records {
    by_username: HashMap<String, User>,
    last_id: u64,
}

/// In-memory user store. Cloning shares the same records.
///
/// Contents live as long as the process; nothing is written to disk.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    records: Arc<RwLock<Records>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a user by username (exact, case-sensitive match).
    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.records.read().await.by_username.get(username).cloned()
    }

    pub async fn contains(&self, username: &str) -> bool {
        self.records.read().await.by_username.contains_key(username)
    }

    /// Create a new active user with the next sequential id.
    ///
    /// The duplicate check and the insert happen under one write lock, so two
    /// concurrent calls for the same username cannot both succeed.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: String,
    ) -> Result<User, AuthError> {
        let mut records = self.records.write().await;
        if records.by_username.contains_key(username) {
            return Err(AuthError::DuplicateUser);
        }
        records.last_id += 1;
        let user = User {
            id: records.last_id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            is_active: true,
        };
        records
            .by_username
            .insert(user.username.clone(), user.clone());
        Ok(user)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.by_username.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = UserStore::new();
        for (expected, name) in [(1, "alice"), (2, "bob"), (3, "carol")] {
            let user = store
                .create(name, &format!("{name}@example.com"), "hash".into())
                .await
                .expect("create");
            assert_eq!(user.id, expected);
            assert!(user.is_active);
        }
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_username() {
        let store = UserStore::new();
        store
            .create("alice", "a@example.com", "h1".into())
            .await
            .expect("first create");
        let err = store
            .create("alice", "other@example.com", "h2".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser));
        assert_eq!(store.len().await, 1);

        let kept = store.find_by_username("alice").await.expect("alice");
        assert_eq!(kept.email, "a@example.com");
        assert_eq!(kept.password_hash, "h1");
    }

    #[tokio::test]
    async fn usernames_are_case_sensitive() {
        let store = UserStore::new();
        store.create("Alice", "a@example.com", "h".into()).await.unwrap();
        store.create("alice", "b@example.com", "h".into()).await.unwrap();
        assert_eq!(store.len().await, 2);
        assert!(store.find_by_username("ALICE").await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_unique_ids() {
        let store = UserStore::new();
        let n = 64;
        let handles: Vec<_> = (0..n)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(&format!("user{i}"), "u@example.com", "h".into())
                        .await
                        .map(|u| u.id)
                })
            })
            .collect();

        let mut ids = Vec::with_capacity(n);
        for h in handles {
            ids.push(h.await.expect("join").expect("create"));
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=n as u64).collect::<Vec<_>>());
        assert_eq!(store.len().await, n);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicate_creates_only_one_wins() {
        let store = UserStore::new();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.create("same", "s@example.com", "h".into()).await.is_ok()
                })
            })
            .collect();

        let mut wins = 0;
        for h in handles {
            if h.await.expect("join") {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(store.len().await, 1);
    }
}
