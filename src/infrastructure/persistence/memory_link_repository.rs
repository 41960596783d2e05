//! In-memory implementation of the link repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

use crate::domain::entities::{NewLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Hash-map backed repository with the same conditional-insert contract as
/// the PostgreSQL implementation.
///
/// The mutex makes each insert atomic, so concurrent claimants of one code are
/// serialized exactly like rows behind a primary key. Used by the integration
/// tests; also usable for local experiments without a database.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: Mutex<HashMap<String, ShortLink>>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.lock().expect("links lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn try_insert(&self, link: &NewLink) -> Result<Option<String>, AppError> {
        let mut links = self.links.lock().expect("links lock poisoned");

        match links.entry(link.code.clone()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                slot.insert(ShortLink {
                    code: link.code.clone(),
                    protocol: link.protocol.clone(),
                    destination: link.destination.clone(),
                    status_code: link.status_code,
                    creator_ip: link.creator_ip,
                });
                Ok(Some(link.code.clone()))
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let links = self.links.lock().expect("links lock poisoned");
        Ok(links.get(code).cloned())
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(code: &str) -> NewLink {
        NewLink {
            code: code.to_string(),
            protocol: "https".to_string(),
            destination: "example.com/".to_string(),
            status_code: 301,
            creator_ip: 0,
        }
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let repo = MemoryLinkRepository::new();

        let stored = repo.try_insert(&new_link("abc")).await.unwrap();
        assert_eq!(stored.as_deref(), Some("abc"));

        let found = repo.find_by_code("abc").await.unwrap().unwrap();
        assert_eq!(found.destination, "example.com/");
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts_without_overwrite() {
        let repo = MemoryLinkRepository::new();

        repo.try_insert(&new_link("abc")).await.unwrap();

        let mut second = new_link("abc");
        second.destination = "other.com/".to_string();
        assert_eq!(repo.try_insert(&second).await.unwrap(), None);

        // First record survives untouched.
        let found = repo.find_by_code("abc").await.unwrap().unwrap();
        assert_eq!(found.destination, "example.com/");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_find_unknown_code() {
        let repo = MemoryLinkRepository::new();
        assert_eq!(repo.find_by_code("nope").await.unwrap(), None);
    }
}
