use crate::repos::shared::repo::DeleteResult;
use std::sync::Mutex;
use volp_domain::{Entity, ID};

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|v| v.id() == *val_id).cloned()
}

pub fn find_by<T: Clone, F: Fn(&T) -> bool>(collection: &Mutex<Vec<T>>, compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|v| compare(v)).cloned().collect()
}

pub fn update_by<T, F, U>(collection: &Mutex<Vec<T>>, compare: F, update: U) -> usize
where
    F: Fn(&T) -> bool,
    U: Fn(&mut T),
{
    let mut collection = collection.lock().unwrap();
    let mut updated = 0;
    for item in collection.iter_mut() {
        if compare(item) {
            update(item);
            updated += 1;
        }
    }
    updated
}

pub fn delete_by<T, F: Fn(&T) -> bool>(collection: &Mutex<Vec<T>>, compare: F) -> DeleteResult {
    let mut collection = collection.lock().unwrap();
    let before = collection.len();
    collection.retain(|v| !compare(v));
    DeleteResult {
        deleted_count: (before - collection.len()) as i64,
    }
}
