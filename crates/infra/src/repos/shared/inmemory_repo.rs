use crate::repos::shared::repo::DeleteResult;
use duewatch_domain::{Entity, Versioned, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}

pub fn delete_by<T, F: Fn(&T) -> bool>(collection: &Mutex<Vec<T>>, compare: F) -> DeleteResult {
    let mut collection = collection.lock().unwrap();
    let before = collection.len();
    collection.retain(|item| !compare(item));
    DeleteResult {
        deleted_count: (before - collection.len()) as i64,
    }
}

/// Replaces the stored entity if its version still is `expected_version`.
///
/// The stored copy gets the next version and is returned. `None` means the
/// entity was written by someone else in the meantime, or deleted.
pub fn compare_and_swap<T: Clone + Versioned>(
    expected_version: i64,
    val: &T,
    collection: &Mutex<Vec<T>>,
) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let stored = collection.iter_mut().find(|item| item.id() == val.id())?;
    if stored.version() != expected_version {
        return None;
    }
    let mut next = val.clone();
    next.set_version(expected_version + 1);
    *stored = next.clone();
    Some(next)
}
