//! Card → display name directory, stored as one JSON object.

use crate::errors::{AppError, AppResult};
use crate::models::identifier::Identifier;
use crate::models::identity::Identity;
use crate::store::atomic::atomic_write;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct IdentityDirectory {
    path: PathBuf,
    names: BTreeMap<Identifier, String>,
}

impl IdentityDirectory {
    /// Load the directory. A missing file is an empty directory; a file that
    /// exists but cannot be parsed is an error.
    pub fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                names: BTreeMap::new(),
            });
        }

        let corrupt = |reason: String| AppError::CorruptDirectory {
            path: path.clone(),
            reason,
        };

        let raw = fs::read_to_string(&path)?;
        let parsed: BTreeMap<String, String> =
            serde_json::from_str(&raw).map_err(|e| corrupt(e.to_string()))?;

        let mut names = BTreeMap::new();
        for (key, name) in parsed {
            let id = Identifier::parse(&key)
                .ok_or_else(|| corrupt(format!("'{}' is not a card identifier", key)))?;
            names.insert(id, name);
        }

        Ok(Self { path, names })
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.names.contains_key(id)
    }

    /// Identity for `id`; unknown cards fall back to their own number as name.
    pub fn identity(&self, id: &Identifier) -> Identity {
        match self.names.get(id) {
            Some(name) => Identity {
                identifier: id.clone(),
                display_name: name.clone(),
            },
            None => Identity::new(id.clone()),
        }
    }

    pub fn identities(&self) -> impl Iterator<Item = Identity> + '_ {
        self.names.iter().map(|(id, name)| Identity {
            identifier: id.clone(),
            display_name: name.clone(),
        })
    }

    /// Cards whose statistics are read together with `id`: every card
    /// carrying the same username. A card without a username stands alone.
    pub fn linked(&self, id: &Identifier) -> Vec<Identifier> {
        let identity = self.identity(id);
        if identity.has_default_name() {
            return vec![id.clone()];
        }
        self.names
            .iter()
            .filter(|(_, name)| **name == identity.display_name)
            .map(|(card, _)| card.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Register `id` with its default name in memory. Returns true if it was new.
    pub fn insert_default(&mut self, id: &Identifier) -> bool {
        if self.names.contains_key(id) {
            return false;
        }
        self.names.insert(id.clone(), id.to_string());
        true
    }

    /// Register `id` and persist the directory if it was unknown.
    pub fn ensure(&mut self, id: &Identifier) -> AppResult<bool> {
        if self.contains(id) {
            return Ok(false);
        }
        let mut next = self.names.clone();
        next.insert(id.clone(), id.to_string());
        self.commit(next)?;
        Ok(true)
    }

    /// Set a new display name and persist the directory.
    pub fn rename(&mut self, id: &Identifier, display_name: &str) -> AppResult<()> {
        let mut next = self.names.clone();
        next.insert(id.clone(), display_name.to_string());
        self.commit(next)
    }

    /// Write the current directory to disk.
    pub fn save(&self) -> AppResult<()> {
        Self::write(&self.path, &self.names)
    }

    // In-memory state only changes once the new file is on disk.
    fn commit(&mut self, next: BTreeMap<Identifier, String>) -> AppResult<()> {
        Self::write(&self.path, &next)?;
        self.names = next;
        Ok(())
    }

    fn write(path: &Path, names: &BTreeMap<Identifier, String>) -> AppResult<()> {
        let plain: BTreeMap<&str, &str> = names
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
            .collect();
        let mut json = serde_json::to_string_pretty(&plain)?;
        json.push('\n');
        atomic_write(path, json.as_bytes())
    }
}
