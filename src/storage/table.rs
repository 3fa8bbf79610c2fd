//! Generic record table
//!
//! Every resource is kept in memory in an id-ordered map behind a `RwLock`
//! and persisted as one JSON file `{ "nextId": .., "records": [..] }`.
//! Ids come from a per-table sequence and are never reused, even after the
//! record with the highest id is deleted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::file_io::{read_json, write_json_atomic};
use crate::error::{FinanceError, FinanceResult};
use crate::models::RecordId;

/// A value that can be stored in a `Table`
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: RecordId;

    /// Entity name used in "not found" errors
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;
    fn set_id(&mut self, id: Self::Id);
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableFile<T> {
    #[serde(default)]
    next_id: i64,
    #[serde(default = "Vec::new")]
    records: Vec<T>,
}

impl<T> Default for TableFile<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

struct TableState<T: Record> {
    next_id: i64,
    rows: BTreeMap<T::Id, T>,
}

/// In-memory table of records persisted to a JSON file
pub struct Table<T: Record> {
    path: PathBuf,
    state: RwLock<TableState<T>>,
}

impl<T: Record> Table<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(TableState {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> FinanceResult<RwLockReadGuard<'_, TableState<T>>> {
        self.state
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FinanceResult<RwLockWriteGuard<'_, TableState<T>>> {
        self.state
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load records from disk, replacing what is in memory
    pub fn load(&self) -> FinanceResult<()> {
        let file: TableFile<T> = read_json(&self.path)?;

        let mut state = self.write()?;
        state.rows.clear();
        for record in file.records {
            state.rows.insert(record.id(), record);
        }

        let after_max = state
            .rows
            .keys()
            .next_back()
            .map(|id| id.value() + 1)
            .unwrap_or(1);
        state.next_id = file.next_id.max(after_max).max(1);

        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> FinanceResult<()> {
        let state = self.read()?;
        let file = TableFile {
            next_id: state.next_id,
            records: state.rows.values().collect::<Vec<&T>>(),
        };
        write_json_atomic(&self.path, &file)
    }

    pub fn get(&self, id: T::Id) -> FinanceResult<Option<T>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    /// Get a record or fail with a "not found" error
    pub fn get_required(&self, id: T::Id) -> FinanceResult<T> {
        self.get(id)?.ok_or_else(|| FinanceError::NotFound {
            entity_type: T::ENTITY,
            identifier: id.to_string(),
        })
    }

    pub fn contains(&self, id: T::Id) -> FinanceResult<bool> {
        Ok(self.read()?.rows.contains_key(&id))
    }

    /// All records in id order
    pub fn all(&self) -> FinanceResult<Vec<T>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    /// Records matching a predicate, in id order
    pub fn find<F>(&self, predicate: F) -> FinanceResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect())
    }

    pub fn find_first<F>(&self, predicate: F) -> FinanceResult<Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.read()?.rows.values().find(|r| predicate(r)).cloned())
    }

    pub fn count(&self) -> FinanceResult<usize> {
        Ok(self.read()?.rows.len())
    }

    /// Insert a new record, assigning the next id
    pub fn insert(&self, mut record: T) -> FinanceResult<T> {
        let mut state = self.write()?;
        let id = T::Id::from_raw(state.next_id);
        state.next_id += 1;
        record.set_id(id);
        state.rows.insert(id, record.clone());
        Ok(record)
    }

    /// Replace an existing record
    pub fn update(&self, record: T) -> FinanceResult<T> {
        let mut state = self.write()?;
        let id = record.id();
        match state.rows.get_mut(&id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(FinanceError::NotFound {
                entity_type: T::ENTITY,
                identifier: id.to_string(),
            }),
        }
    }

    pub fn remove(&self, id: T::Id) -> FinanceResult<Option<T>> {
        Ok(self.write()?.rows.remove(&id))
    }

    /// Remove every record matching a predicate, returning the removed records
    pub fn remove_where<F>(&self, predicate: F) -> FinanceResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut state = self.write()?;
        let ids: Vec<T::Id> = state
            .rows
            .values()
            .filter(|r| predicate(r))
            .map(|r| r.id())
            .collect();
        Ok(ids.into_iter().filter_map(|id| state.rows.remove(&id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: ExpenseId,
        text: String,
    }

    impl Record for Note {
        type Id = ExpenseId;
        const ENTITY: &'static str = "Note";

        fn id(&self) -> ExpenseId {
            self.id
        }

        fn set_id(&mut self, id: ExpenseId) {
            self.id = id;
        }
    }

    fn note(text: &str) -> Note {
        Note {
            id: ExpenseId::new(0),
            text: text.into(),
        }
    }

    fn create_table() -> (TempDir, Table<Note>) {
        let temp_dir = TempDir::new().unwrap();
        let table = Table::new(temp_dir.path().join("notes.json"));
        table.load().unwrap();
        (temp_dir, table)
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let (_temp, table) = create_table();
        let a = table.insert(note("a")).unwrap();
        let b = table.insert(note("b")).unwrap();
        assert_eq!(a.id, ExpenseId::new(1));
        assert_eq!(b.id, ExpenseId::new(2));
        assert_eq!(table.count().unwrap(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete_and_reload() {
        let (_temp, table) = create_table();
        table.insert(note("a")).unwrap();
        let b = table.insert(note("b")).unwrap();
        table.remove(b.id).unwrap();
        table.save().unwrap();

        let reloaded: Table<Note> = Table::new(table.path().to_path_buf());
        reloaded.load().unwrap();
        let c = reloaded.insert(note("c")).unwrap();
        assert_eq!(c.id, ExpenseId::new(3));
    }

    #[test]
    fn test_update_requires_existing_record() {
        let (_temp, table) = create_table();
        let mut a = table.insert(note("a")).unwrap();
        a.text = "changed".into();
        table.update(a.clone()).unwrap();
        assert_eq!(table.get(a.id).unwrap().unwrap().text, "changed");

        let mut ghost = note("ghost");
        ghost.id = ExpenseId::new(99);
        let err = table.update(ghost).unwrap_err();
        assert_eq!(err.to_string(), "Note not found: 99");
        assert!(table.get_required(ExpenseId::new(99)).is_err());
    }

    #[test]
    fn test_find_and_remove_where() {
        let (_temp, table) = create_table();
        for text in ["rent", "food", "rent again"] {
            table.insert(note(text)).unwrap();
        }
        let rents = table.find(|n| n.text.starts_with("rent")).unwrap();
        assert_eq!(rents.len(), 2);

        let removed = table.remove_where(|n| n.text.starts_with("rent")).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(table.all().unwrap(), vec![Note { id: ExpenseId::new(2), text: "food".into() }]);
    }

    #[test]
    fn test_next_id_recovered_from_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.json");
        std::fs::write(&path, r#"{"records":[{"id":41,"text":"old"}]}"#).unwrap();

        let table: Table<Note> = Table::new(path);
        table.load().unwrap();
        assert_eq!(table.insert(note("new")).unwrap().id, ExpenseId::new(42));
    }
}
