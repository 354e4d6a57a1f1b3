use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use snip_core::{LinkRecord, LinkStore, ShortId, StoreError};

/// Type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;

/// In-memory implementation of [`LinkStore`] using DashMap.
///
/// DashMap's sharded locks allow concurrent reads and writes to
/// different buckets without blocking, and its entry API gives the
/// insert path the same atomic uniqueness guarantee a database primary
/// key would.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    links: DashMap<String, String>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
        }
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn get(&self, id: &ShortId) -> Result<Option<String>> {
        Ok(self.links.get(id.as_str()).map(|url| url.clone()))
    }

    async fn insert(&self, id: &ShortId, url: &str) -> Result<()> {
        match self.links.entry(id.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(url.to_owned());
                Ok(())
            }
        }
    }

    async fn upsert_many(&self, records: &[LinkRecord]) -> Result<()> {
        for record in records {
            self.links
                .insert(record.id.as_str().to_owned(), record.url.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: &ShortId) -> Result<bool> {
        Ok(self.links.remove(id.as_str()).is_some())
    }

    async fn delete_many(&self, ids: &[ShortId]) -> Result<u64> {
        let mut removed = 0;
        for id in ids {
            if self.links.remove(id.as_str()).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn all(&self) -> Result<Vec<LinkRecord>> {
        let mut records: Vec<LinkRecord> = self
            .links
            .iter()
            .map(|entry| LinkRecord::new(ShortId::new_unchecked(entry.key().as_str()), entry.value().clone()))
            .collect();
        records.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(records)
    }
}
