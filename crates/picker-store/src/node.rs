//! Data nodes: host entities holding a serialized picker character.
//!
//! A data node is discovered by its boolean tag attribute. It carries the
//! character as a JSON string, the path of an optional linked data file,
//! and the format version it was created with. Nodes living in a
//! referenced file are read-only.

use crate::config::{FORMAT_VERSION, SaveOptions, StoreConfig};
use crate::error::{Result, StoreError};
use crate::file::{read_data_file, write_data_file};
use crate::host::{AttrValue, HostAdapter};
use picker_core::CharacterRecord;
use std::path::{Path, PathBuf};

/// Outcome of `DataNode::write_data`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStatus {
    pub node_written: bool,
    pub file_written: bool,
}

/// Handle on one data node plus its in-memory character record.
#[derive(Debug, Clone, PartialEq)]
pub struct DataNode {
    name: String,
    data: CharacterRecord,
}

impl DataNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: CharacterRecord::default(),
        }
    }

    /// Node with the configured default name.
    pub fn with_default_name(config: &StoreConfig) -> Self {
        Self::new(config.default_node_name.clone())
    }

    /// Open `name`, reading its record when the node already exists.
    pub fn load(host: &dyn HostAdapter, name: impl Into<String>, config: &StoreConfig) -> Result<Self> {
        let mut node = Self::new(name);
        if node.exists(host) {
            node.data = node.read_data(host, config, true)?;
        }
        Ok(node)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exists(&self, host: &dyn HostAdapter) -> bool {
        host.exists(&self.name)
    }

    /// Create the host entity and declare every attribute, stamping the
    /// current format version. An existing node is left untouched.
    pub fn create(&self, host: &mut dyn HostAdapter, config: &StoreConfig) -> Result<()> {
        if host.exists(&self.name) {
            log::warn!("data node \"{}\" already exists", self.name);
            return Ok(());
        }

        host.create_entity(&self.name)?;
        host.add_attr(&self.name, &config.tag_attr, AttrValue::Bool(true))?;
        host.add_attr(&self.name, &config.version_attr, AttrValue::Str(String::new()))?;
        host.add_attr(&self.name, &config.data_attr, AttrValue::Str(String::new()))?;
        host.add_attr(&self.name, &config.file_attr, AttrValue::Str(String::new()))?;
        self.stamp_version(host, config)?;

        log::debug!("created data node \"{}\"", self.name);
        Ok(())
    }

    /// Everything before the last `:` of the node name.
    pub fn namespace(&self) -> Option<&str> {
        self.name.rsplit_once(':').map(|(ns, _)| ns)
    }

    pub fn is_referenced(&self, host: &dyn HostAdapter) -> Result<bool> {
        self.assert_exists(host)?;
        Ok(host.is_referenced(&self.name))
    }

    /// Version string stored on the node, if any.
    pub fn version(&self, host: &dyn HostAdapter, config: &StoreConfig) -> Result<Option<String>> {
        self.get_str_attr(host, &config.version_attr)
    }

    /// Overwrite the stored version with the current format version.
    pub fn stamp_version(&self, host: &mut dyn HostAdapter, config: &StoreConfig) -> Result<()> {
        self.set_str_attr(host, &config.version_attr, FORMAT_VERSION)
    }

    /// Linked data file, if one was ever written.
    pub fn file_path(&self, host: &dyn HostAdapter, config: &StoreConfig) -> Result<Option<PathBuf>> {
        Ok(self.get_str_attr(host, &config.file_attr)?.map(PathBuf::from))
    }

    // ── In-memory record ──

    pub fn data(&self) -> &CharacterRecord {
        &self.data
    }

    pub fn set_data(&mut self, data: CharacterRecord) {
        self.data = data;
    }

    /// Whether `record` differs from the in-memory record.
    pub fn is_modified(&self, record: &CharacterRecord) -> bool {
        &self.data != record
    }

    /// Whether any item of the in-memory record drives `control`.
    /// `control` is matched against the namespace-expanded names.
    pub fn contains(&self, control: &str) -> bool {
        self.data.references(control, self.namespace())
    }

    // ── Persistence ──

    /// Persist the in-memory record.
    ///
    /// Node writes on a referenced node are refused before anything is
    /// touched, file included. A failed file write is logged and reported in the status; the node
    /// write still happens. A successful file write records the path on
    /// the node.
    ///
    /// # Errors
    /// `NodeNotFound`, `ReferenceLocked`, or an encode/host failure.
    pub fn write_data(
        &self,
        host: &mut dyn HostAdapter,
        options: &SaveOptions,
        config: &StoreConfig,
    ) -> Result<WriteStatus> {
        self.assert_exists(&*host)?;
        if options.to_node && host.is_referenced(&self.name) {
            return Err(StoreError::ReferenceLocked(self.name.clone()));
        }

        let mut status = WriteStatus::default();

        if options.to_file {
            let path = match &options.file_path {
                Some(path) => Some(path.clone()),
                None => self.file_path(&*host, config)?,
            };
            match path {
                Some(path) => {
                    status.file_written = self.write_file(host, &path, config);
                }
                None => log::warn!("no file path given for data node \"{}\"", self.name),
            }
        }

        if options.to_node {
            let blob = serde_json::to_string(&self.data)?;
            self.set_str_attr(host, &config.data_attr, &blob)?;
            status.node_written = true;
            log::debug!("wrote data node \"{}\" ({} bytes)", self.name, blob.len());
        }

        Ok(status)
    }

    /// Load the stored record.
    ///
    /// With `prefer_file`, a readable linked file wins over the node blob;
    /// an unreadable file is logged and the node blob is used instead.
    /// Nothing stored reads as an empty record.
    ///
    /// # Errors
    /// `NodeNotFound`, or `Decode` when the stored data is malformed.
    pub fn read_data(
        &self,
        host: &dyn HostAdapter,
        config: &StoreConfig,
        prefer_file: bool,
    ) -> Result<CharacterRecord> {
        self.assert_exists(host)?;

        if prefer_file && let Some(path) = self.file_path(host, config)? {
            match read_data_file(&path) {
                Ok(record) => return Ok(record),
                Err(StoreError::FileNotFound(_) | StoreError::Io(_)) => {
                    log::warn!(
                        "failed to read data file \"{}\", falling back to node \"{}\"",
                        path.display(),
                        self.name
                    );
                }
                Err(e) => return Err(e),
            }
        }

        match self.get_str_attr(host, &config.data_attr)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(CharacterRecord::default()),
        }
    }

    /// Refresh the in-memory record from the host.
    pub fn reload(&mut self, host: &dyn HostAdapter, config: &StoreConfig, prefer_file: bool) -> Result<()> {
        self.data = self.read_data(host, config, prefer_file)?;
        Ok(())
    }

    fn write_file(&self, host: &mut dyn HostAdapter, path: &Path, config: &StoreConfig) -> bool {
        if let Err(e) = write_data_file(path, &self.data, config) {
            log::warn!("failed to write data file \"{}\": {e}", path.display());
            return false;
        }
        let path_str = path.to_string_lossy();
        if let Err(e) = self.set_str_attr(host, &config.file_attr, &path_str) {
            log::warn!("failed to store file path on \"{}\": {e}", self.name);
        }
        true
    }

    // ── Attribute helpers ──

    fn assert_exists(&self, host: &dyn HostAdapter) -> Result<()> {
        if host.exists(&self.name) {
            Ok(())
        } else {
            Err(StoreError::NodeNotFound(self.name.clone()))
        }
    }

    /// Empty strings read as `None`.
    fn get_str_attr(&self, host: &dyn HostAdapter, attr: &str) -> Result<Option<String>> {
        self.assert_exists(host)?;
        Ok(host
            .get_attr(&self.name, attr)
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|s| !s.is_empty()))
    }

    fn set_str_attr(&self, host: &mut dyn HostAdapter, attr: &str, value: &str) -> Result<()> {
        self.assert_exists(&*host)?;
        if host.is_referenced(&self.name) {
            return Err(StoreError::ReferenceLocked(self.name.clone()));
        }
        if !host.has_attr(&self.name, attr) {
            host.add_attr(&self.name, attr, AttrValue::Str(String::new()))?;
        }
        host.set_attr(&self.name, attr, AttrValue::Str(value.to_string()))
    }
}

// ─── Discovery ────────────────────────────────────────────────────────────

/// Every data node on the host, sorted by name, with its record loaded.
pub fn get_nodes(host: &dyn HostAdapter, config: &StoreConfig) -> Result<Vec<DataNode>> {
    let mut names = host.entities_with_attr(&config.tag_attr);
    names.sort();
    names
        .into_iter()
        .map(|name| DataNode::load(host, name, config))
        .collect()
}

/// First data node (by name) whose record drives `object`.
pub fn get_node_for_object(
    host: &dyn HostAdapter,
    object: &str,
    config: &StoreConfig,
) -> Result<Option<DataNode>> {
    Ok(get_nodes(host, config)?
        .into_iter()
        .find(|node| node.contains(object)))
}
