use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::store::{Document, Store};

/// A record living in one of the document's collections.
pub trait Record: Clone + Sized {
    fn collection(doc: &Document) -> &[Self];
    fn collection_mut(doc: &mut Document) -> &mut Vec<Self>;
    fn id(&self) -> i64;
    /// Stamp the store-assigned id and creation time at insert.
    fn assign(&mut self, id: i64, created_at: DateTime<Utc>);
}

/// A record tied to the account allowed to mutate or delete it.
pub trait Owned: Record {
    fn owner(&self) -> i64;
}

/// Table semantics over the flat-file document. Every call is a full
/// document round trip through the store; mutations run under the store
/// lock so read-modify-write cycles never interleave.
#[derive(Clone)]
pub struct Repository {
    store: Arc<Store>,
}

impl Repository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// All records in a collection, newest insertion first.
    pub fn get_all<T: Record>(&self) -> Vec<T> {
        let doc = self.store.read();
        let mut list = T::collection(&doc).to_vec();
        list.reverse();
        list
    }

    /// Records owned by `user_id`, newest insertion first.
    pub fn get_all_by_user<T: Owned>(&self, user_id: i64) -> Vec<T> {
        let doc = self.store.read();
        let mut list: Vec<T> = T::collection(&doc)
            .iter()
            .filter(|r| r.owner() == user_id)
            .cloned()
            .collect();
        list.reverse();
        list
    }

    /// First record matching the predicate, in insertion order.
    pub fn find_one<T: Record>(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let doc = self.store.read();
        T::collection(&doc).iter().find(|r| predicate(r)).cloned()
    }

    pub fn find_by_id<T: Record>(&self, id: i64) -> Option<T> {
        self.find_one(|r: &T| r.id() == id)
    }

    /// Insert a record: assigns the next monotonic id, stamps created_at,
    /// appends, persists, and returns the stored record.
    pub fn insert<T: Record>(&self, mut record: T) -> T {
        self.store.mutate(move |doc| {
            let id = doc.allocate_id();
            record.assign(id, Utc::now());
            T::collection_mut(doc).push(record.clone());
            record
        })
    }

    /// Apply a mutation to the record with the given id. Returns the number
    /// of records changed (0 or 1); nothing is persisted on a miss.
    pub fn update_with<T: Record>(&self, id: i64, f: impl FnOnce(&mut T)) -> usize {
        self.store.mutate_counted(|doc| {
            match T::collection_mut(doc).iter_mut().find(|r| r.id() == id) {
                Some(record) => {
                    f(record);
                    1
                }
                None => 0,
            }
        })
    }

    /// Remove the record with the given id. Returns the number removed
    /// (0 or 1); a miss is not an error and is not persisted.
    pub fn delete<T: Record>(&self, id: i64) -> usize {
        self.store.mutate_counted(|doc| {
            let list = T::collection_mut(doc);
            let before = list.len();
            list.retain(|r| r.id() != id);
            before - list.len()
        })
    }
}
