use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sled::{Db, Tree};

use crate::error::{StoreError, StoreResult};

/// Typed view over one sled tree.
///
/// Records are JSON blobs keyed by string id. Every mutation goes through a
/// per-key compare-and-swap, so two writers racing on the same key retry
/// instead of clobbering each other, and a reader never observes a partially
/// written record. Each write flushes the tree, so records survive a process
/// restart.
#[derive(Clone)]
pub struct Collection<T> {
    tree: Tree,
    _record: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn open(db: &Db, name: &str) -> StoreResult<Self> {
        let tree = db.open_tree(name)?;
        Ok(Self {
            tree,
            _record: PhantomData,
        })
    }

    pub fn get(&self, key: &str) -> StoreResult<Option<T>> {
        match self.tree.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn expect(&self, key: &str) -> StoreResult<T> {
        self.get(key)?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Insert a fresh record, failing with `DuplicateKey` when the key is
    /// already taken.
    pub fn create(&self, key: &str, record: &T) -> StoreResult<()> {
        let raw = serde_json::to_vec(record)?;
        self.tree
            .compare_and_swap(key, None as Option<&[u8]>, Some(raw))?
            .map_err(|_| StoreError::DuplicateKey(key.to_string()))?;
        self.tree.flush()?;
        Ok(())
    }

    /// Atomic read-modify-write. The closure may run more than once when
    /// another writer races this key, so it must be a pure function of the
    /// record it is handed.
    pub fn update<F>(&self, key: &str, mut apply: F) -> StoreResult<T>
    where
        F: FnMut(T) -> T,
    {
        loop {
            let current_raw = self
                .tree
                .get(key)?
                .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
            let current: T = serde_json::from_slice(&current_raw)?;
            let next = apply(current);
            let next_raw = serde_json::to_vec(&next)?;
            match self
                .tree
                .compare_and_swap(key, Some(current_raw), Some(next_raw))?
            {
                Ok(()) => {
                    self.tree.flush()?;
                    return Ok(next);
                }
                Err(_) => continue,
            }
        }
    }

    pub fn remove(&self, key: &str) -> StoreResult<()> {
        self.tree.remove(key)?;
        self.tree.flush()?;
        Ok(())
    }

    pub fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.tree.contains_key(key)?)
    }

    pub fn all(&self) -> StoreResult<Vec<T>> {
        let mut records = Vec::new();
        for entry in self.tree.iter() {
            let (_, raw) = entry?;
            records.push(serde_json::from_slice(&raw)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        body: String,
        revision: u32,
    }

    fn open_notes() -> Collection<Note> {
        let db = sled::Config::new().temporary(true).open().unwrap();
        Collection::open(&db, "notes").unwrap()
    }

    #[test]
    fn create_rejects_existing_key() {
        let notes = open_notes();
        let note = Note {
            body: "hello".into(),
            revision: 0,
        };
        notes.create("a", &note).unwrap();
        let err = notes.create("a", &note).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
    }

    #[test]
    fn update_requires_existing_key() {
        let notes = open_notes();
        let err = notes.update("missing", |n| n).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn update_applies_and_returns_new_record() {
        let notes = open_notes();
        notes
            .create(
                "a",
                &Note {
                    body: "hello".into(),
                    revision: 0,
                },
            )
            .unwrap();
        let updated = notes
            .update("a", |mut n| {
                n.revision += 1;
                n
            })
            .unwrap();
        assert_eq!(updated.revision, 1);
        assert_eq!(notes.get("a").unwrap().unwrap(), updated);
    }

    #[test]
    fn remove_then_get_is_absent() {
        let notes = open_notes();
        notes
            .create(
                "a",
                &Note {
                    body: "hello".into(),
                    revision: 0,
                },
            )
            .unwrap();
        notes.remove("a").unwrap();
        assert!(notes.get("a").unwrap().is_none());
    }
}
