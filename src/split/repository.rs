//! Group storage behind a swappable interface
//!
//! Groups are keyed by their id. The JSON backend keeps every group in a
//! single document that is rewritten on each change.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::model::Group;
use crate::error::{CalcError, CalcResult};

pub trait GroupRepository {
    fn get(&self, id: &str) -> CalcResult<Option<Group>>;

    /// Insert or replace the group with the same id
    fn put(&mut self, group: Group) -> CalcResult<()>;

    /// Returns whether a group was removed
    fn delete(&mut self, id: &str) -> CalcResult<bool>;

    fn list(&self) -> CalcResult<Vec<Group>>;

    /// Like `get`, but a missing group is an error
    fn require(&self, id: &str) -> CalcResult<Group> {
        self.get(id)?.ok_or_else(|| CalcError::GroupNotFound(id.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryGroupRepository {
    groups: BTreeMap<String, Group>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupRepository for InMemoryGroupRepository {
    fn get(&self, id: &str) -> CalcResult<Option<Group>> {
        Ok(self.groups.get(id).cloned())
    }

    fn put(&mut self, group: Group) -> CalcResult<()> {
        self.groups.insert(group.id.clone(), group);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> CalcResult<bool> {
        Ok(self.groups.remove(id).is_some())
    }

    fn list(&self) -> CalcResult<Vec<Group>> {
        Ok(self.groups.values().cloned().collect())
    }
}

/// Groups stored as a JSON array in one file
#[derive(Debug, Clone)]
pub struct JsonFileGroupRepository {
    path: PathBuf,
}

impl JsonFileGroupRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> CalcResult<Vec<Group>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    fn save(&self, groups: &[Group]) -> CalcResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(groups)?;
        fs::write(&self.path, json)?;
        log::info!("Saved {} groups to {}", groups.len(), self.path.display());
        Ok(())
    }
}

impl GroupRepository for JsonFileGroupRepository {
    fn get(&self, id: &str) -> CalcResult<Option<Group>> {
        Ok(self.load()?.into_iter().find(|g| g.id == id))
    }

    fn put(&mut self, group: Group) -> CalcResult<()> {
        let mut groups = self.load()?;
        match groups.iter_mut().find(|g| g.id == group.id) {
            Some(existing) => *existing = group,
            None => groups.push(group),
        }
        self.save(&groups)
    }

    fn delete(&mut self, id: &str) -> CalcResult<bool> {
        let mut groups = self.load()?;
        let before = groups.len();
        groups.retain(|g| g.id != id);
        if groups.len() == before {
            return Ok(false);
        }
        self.save(&groups)?;
        Ok(true)
    }

    fn list(&self) -> CalcResult<Vec<Group>> {
        self.load()
    }
}
