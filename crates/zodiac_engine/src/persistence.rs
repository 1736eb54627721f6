use crate::error::{Result, ZodiacError};
use crate::person::{Person, Slot};

use log::debug;
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

/// Key-value storage for the two rosters.
///
/// Implementations hold one serialized sequence of [`Person`] per [`Slot`].
/// An absent slot loads as an empty roster.
pub trait RosterStore {
    fn load(&self, slot: Slot) -> Result<Vec<Person>>;

    fn save(&mut self, slot: Slot, people: &[Person]) -> Result<()>;
}

impl<S: RosterStore + ?Sized> RosterStore for Box<S> {
    fn load(&self, slot: Slot) -> Result<Vec<Person>> {
        (**self).load(slot)
    }

    fn save(&mut self, slot: Slot, people: &[Person]) -> Result<()> {
        (**self).save(slot, people)
    }
}

pub fn encode_roster(slot: Slot, people: &[Person]) -> Result<String> {
    serde_json::to_string(people).map_err(|e| ZodiacError::Persist {
        slot,
        source: io::Error::other(e),
    })
}

pub fn decode_roster(slot: Slot, text: &str) -> Result<Vec<Person>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|source| ZodiacError::Decode { slot, source })
}

/// In-memory store keeping the JSON text of each slot.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<Slot, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON currently stored in `slot`
    pub fn raw(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Overwrites `slot` with raw text, bypassing serialization
    pub fn insert_raw(&mut self, slot: Slot, text: impl Into<String>) {
        self.slots.insert(slot, text.into());
    }
}

impl RosterStore for MemoryStore {
    fn load(&self, slot: Slot) -> Result<Vec<Person>> {
        match self.slots.get(&slot) {
            Some(text) => decode_roster(slot, text),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, slot: Slot, people: &[Person]) -> Result<()> {
        let text = encode_roster(slot, people)?;
        self.slots.insert(slot, text);
        Ok(())
    }
}

/// Directory-backed store writing `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl RosterStore for DirStore {
    fn load(&self, slot: Slot) -> Result<Vec<Person>> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!("Loaded {} from {}", slot, path.display());
                decode_roster(slot, &text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(ZodiacError::Persist { slot, source }),
        }
    }

    fn save(&mut self, slot: Slot, people: &[Person]) -> Result<()> {
        let text = encode_roster(slot, people)?;
        fs::create_dir_all(&self.dir).map_err(|source| ZodiacError::Persist { slot, source })?;

        // write-then-rename so a crash never leaves a half-written slot
        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|source| ZodiacError::Persist { slot, source })?;
        fs::rename(&tmp, &path).map_err(|source| ZodiacError::Persist { slot, source })?;

        debug!("Saved {} ({} records) to {}", slot, people.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Sign;
    use crate::geometry::Point;
    use tempfile::TempDir;

    fn sample() -> Vec<Person> {
        let a = Person::new("Alice", Sign::Leo);
        let b = Person::new("Bob", Sign::Aries).placed_at(Point::new(300.0, 250.0), Sign::Aries);
        vec![a, b]
    }

    #[test]
    fn test_memory_store_absent_slot_is_empty() {
        let store = MemoryStore::new();
        assert!(store.load(Slot::Unplaced).unwrap().is_empty());
        assert!(store.raw(Slot::Placed).is_none());
    }

    #[test]
    fn test_memory_store_save_load() {
        let mut store = MemoryStore::new();
        let people = sample();
        store.save(Slot::Placed, &people).unwrap();

        assert_eq!(store.load(Slot::Placed).unwrap(), people);
        assert!(store.load(Slot::Unplaced).unwrap().is_empty());
        assert!(store.raw(Slot::Placed).unwrap().contains("\"position\":null"));
    }

    #[test]
    fn test_memory_store_corrupt_slot() {
        let mut store = MemoryStore::new();
        store.insert_raw(Slot::Unplaced, "{not json");
        assert!(matches!(
            store.load(Slot::Unplaced),
            Err(ZodiacError::Decode { slot: Slot::Unplaced, .. })
        ));
    }

    #[test]
    fn test_dir_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = DirStore::new(temp_dir.path().join("nested"));

        assert!(store.load(Slot::Unplaced).unwrap().is_empty());

        let people = sample();
        store.save(Slot::Unplaced, &people).unwrap();
        assert!(store.slot_path(Slot::Unplaced).ends_with("unplaced-roster.json"));
        assert!(store.slot_path(Slot::Unplaced).exists());
        assert!(!store.slot_path(Slot::Placed).exists());

        let reopened = DirStore::new(store.dir());
        assert_eq!(reopened.load(Slot::Unplaced).unwrap(), people);
    }

    #[test]
    fn test_dir_store_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = DirStore::new(temp_dir.path());

        store.save(Slot::Placed, &sample()).unwrap();
        store.save(Slot::Placed, &[]).unwrap();

        let content = fs::read_to_string(store.slot_path(Slot::Placed)).unwrap();
        assert_eq!(content, "[]");
        assert!(store.load(Slot::Placed).unwrap().is_empty());
    }

    #[test]
    fn test_dir_store_empty_file_is_empty_roster() {
        let temp_dir = TempDir::new().unwrap();
        let store = DirStore::new(temp_dir.path());
        fs::write(store.slot_path(Slot::Unplaced), "  \n").unwrap();
        assert!(store.load(Slot::Unplaced).unwrap().is_empty());
    }

    #[test]
    fn test_dir_store_unwritable_dir() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        // a regular file where the directory should be
        let mut store = DirStore::new(&blocker);
        let err = store.save(Slot::Placed, &sample()).unwrap_err();
        assert!(err.is_persistence(), "unexpected error: {err}");
    }
}
