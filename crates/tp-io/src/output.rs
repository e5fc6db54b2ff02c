//! Hierarchical output: named groups holding named histogram datasets.
//!
//! The tree is built in memory and written once by [`OutputFile::close`].

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tp_core::{Error, Result};

use crate::histogram::Axis;

/// Stored histogram contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Histogram axes.
    pub axes: Vec<Axis>,
    /// Slots per axis, flow slots included.
    pub shape: Vec<usize>,
    /// Row-major slot contents.
    pub values: Vec<f64>,
    /// Row-major sum of squared weights.
    pub sumw2: Vec<f64>,
    /// Accepted fills.
    pub entries: u64,
}

impl Dataset {
    /// Sum of all slot contents.
    pub fn sum_of_weights(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// A node in the output tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// Subgroup
    Group(Group),
    /// Histogram
    Dataset(Dataset),
}

/// Named children, kept in name order so output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    children: BTreeMap<String, Node>,
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('/') {
        return Err(Error::Validation(format!("invalid output node name '{name}'")));
    }
    Ok(())
}

impl Group {
    /// Create an empty child group. Fails if `name` is taken.
    pub fn create_group(&mut self, name: &str) -> Result<&mut Group> {
        check_name(name)?;
        match self.children.entry(name.to_string()) {
            Entry::Occupied(_) => {
                Err(Error::Validation(format!("output node '{name}' already exists")))
            }
            Entry::Vacant(slot) => match slot.insert(Node::Group(Group::default())) {
                Node::Group(g) => Ok(g),
                Node::Dataset(_) => Err(Error::Validation(format!("'{name}' is not a group"))),
            },
        }
    }

    /// Store a dataset. Fails if `name` is taken.
    pub fn write_dataset(&mut self, name: &str, dataset: Dataset) -> Result<()> {
        check_name(name)?;
        match self.children.entry(name.to_string()) {
            Entry::Occupied(_) => {
                Err(Error::Validation(format!("output node '{name}' already exists")))
            }
            Entry::Vacant(slot) => {
                slot.insert(Node::Dataset(dataset));
                Ok(())
            }
        }
    }

    /// Look up a node by `/`-separated path.
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let mut node = self.children.get(parts.next()?)?;
        for part in parts {
            match node {
                Node::Group(g) => node = g.children.get(part)?,
                Node::Dataset(_) => return None,
            }
        }
        Some(node)
    }

    /// Group at `path`.
    pub fn group(&self, path: &str) -> Option<&Group> {
        match self.get(path)? {
            Node::Group(g) => Some(g),
            Node::Dataset(_) => None,
        }
    }

    /// Dataset at `path`.
    pub fn dataset(&self, path: &str) -> Option<&Dataset> {
        match self.get(path)? {
            Node::Dataset(d) => Some(d),
            Node::Group(_) => None,
        }
    }

    /// Child names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// All datasets below this group with their paths, depth first.
    pub fn datasets(&self) -> Vec<(String, &Dataset)> {
        let mut out = Vec::new();
        self.collect_datasets("", &mut out);
        out
    }

    fn collect_datasets<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Dataset)>) {
        for (name, node) in &self.children {
            let path = if prefix.is_empty() { name.clone() } else { format!("{prefix}/{name}") };
            match node {
                Node::Group(g) => g.collect_datasets(&path, out),
                Node::Dataset(d) => out.push((path, d)),
            }
        }
    }
}

/// Output destination that must not exist beforehand.
#[derive(Debug)]
pub struct OutputFile {
    path: PathBuf,
    root: Group,
}

impl OutputFile {
    /// Reserve `path` for output. Fails with [`Error::OutputExists`] if it exists.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            return Err(Error::OutputExists(path));
        }
        Ok(Self { path, root: Group::default() })
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level group.
    pub fn root(&self) -> &Group {
        &self.root
    }

    /// Top-level group, mutable.
    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Serialized form of the whole tree.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.root)?)
    }

    /// Serialize the tree and write it in one go. Refuses to overwrite.
    pub fn close(self) -> Result<()> {
        let bytes = self.to_bytes()?;
        let mut file =
            OpenOptions::new().write(true).create_new(true).open(&self.path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    Error::OutputExists(self.path.clone())
                } else {
                    Error::Io(e)
                }
            })?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        log::info!("wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    /// Read back a tree written by [`OutputFile::close`].
    pub fn read(path: impl AsRef<Path>) -> Result<Group> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
