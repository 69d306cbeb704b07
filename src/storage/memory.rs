use indexmap::IndexMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use super::{LineMetadata, Storage, StorageError};
use crate::debug_log;
use crate::models::{Line, Segment};

/// In-process line store, kept in insertion order
///
/// Reads share the lock; every save or delete takes it exclusively, so
/// mutations of one line never interleave.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    lines: RwLock<IndexMap<Uuid, Line>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<Uuid, Line>> {
        self.lines.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<Uuid, Line>> {
        self.lines.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    fn save_line(&self, line: &Line) -> Result<(), StorageError> {
        line.validate()?;
        self.write().insert(line.id, line.clone());
        debug_log!("Saved line {} ({} sections)", line.id, line.sections().len());
        Ok(())
    }

    fn load_line(&self, id: Uuid) -> Result<Line, StorageError> {
        self.read().get(&id).cloned().ok_or(StorageError::NotFound(id))
    }

    fn delete_line(&self, id: Uuid) -> Result<Vec<Segment>, StorageError> {
        let line = self.write().shift_remove(&id).ok_or(StorageError::NotFound(id))?;
        debug_log!("Deleted line {id}");
        Ok(line.into_sections())
    }

    fn list_lines(&self) -> Result<Vec<LineMetadata>, StorageError> {
        Ok(self
            .read()
            .values()
            .map(|line| LineMetadata {
                id: line.id,
                name: line.name.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Station;

    fn line(name: &str) -> Line {
        let section = Segment::new(Station::new("Gangnam"), Station::new("Gwanggyo"), 45)
            .expect("valid segment");
        Line::new(name, "red", section).expect("line created")
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let line = line("Shinbundang");

        storage.save_line(&line).expect("saves");
        let loaded = storage.load_line(line.id).expect("loads");

        assert_eq!(loaded, line);
        assert_eq!(loaded.stations().len(), 2);
    }

    #[test]
    fn test_save_replaces_existing() {
        let storage = MemoryStorage::new();
        let mut line = line("Shinbundang");
        storage.save_line(&line).expect("saves");

        let yangjae = Station::new("Yangjae");
        let gangnam = line.stations()[0].clone();
        line.add_section(Segment::new(gangnam, yangjae, 10).expect("valid segment"))
            .expect("split succeeds");
        storage.save_line(&line).expect("saves again");

        let loaded = storage.load_line(line.id).expect("loads");
        assert_eq!(loaded.stations().len(), 3);
        assert_eq!(storage.list_lines().expect("lists").len(), 1);
    }

    #[test]
    fn test_load_missing() {
        let storage = MemoryStorage::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            storage.load_line(id),
            Err(StorageError::NotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn test_delete_returns_sections() {
        let storage = MemoryStorage::new();
        let line = line("Shinbundang");
        storage.save_line(&line).expect("saves");

        let sections = storage.delete_line(line.id).expect("deletes");
        assert_eq!(sections.len(), 1);
        assert!(line.contains(&sections[0]));
        assert!(storage.list_lines().expect("lists").is_empty());
        assert!(matches!(storage.delete_line(line.id), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let storage = MemoryStorage::new();
        let first = line("Line 1");
        let second = line("Line 2");
        storage.save_line(&first).expect("saves");
        storage.save_line(&second).expect("saves");

        let names: Vec<String> = storage
            .list_lines()
            .expect("lists")
            .into_iter()
            .map(|metadata| metadata.name)
            .collect();
        assert_eq!(names, vec!["Line 1", "Line 2"]);
    }
}
