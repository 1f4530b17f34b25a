//! Store configuration: host attribute names, file envelope, save options.

use std::path::PathBuf;

/// Format version written by `DataNode::create` and `stamp_version`.
pub const FORMAT_VERSION: &str = "1.1.0";

/// Comment block written at the top of every picker data file.
pub const DEFAULT_FILE_HEADER: &str = "\
# Anim Picker data file.
# Holds one picker character between the data markers below.
# Edit with the picker editor; hand edits must keep valid JSON.
";

/// Naming of the host attributes backing a data node.
///
/// Every field defaults to the names existing scenes already carry.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Boolean marker used to discover data nodes. Default: `picker_datas_node`.
    pub tag_attr: String,
    /// String attribute holding the serialized character. Default: `picker_datas`.
    pub data_attr: String,
    /// String attribute holding the linked data file path. Default: `picker_datas_file`.
    pub file_attr: String,
    /// String attribute holding the format version. Default: `picker_datas_version`.
    pub version_attr: String,
    /// Node name used when none is given. Default: `PICKER_DATAS`.
    pub default_node_name: String,
    pub file_header: String,
    /// Indent the JSON body of data files. Default: **true**.
    pub pretty_file: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tag_attr: "picker_datas_node".into(),
            data_attr: "picker_datas".into(),
            file_attr: "picker_datas_file".into(),
            version_attr: "picker_datas_version".into(),
            default_node_name: "PICKER_DATAS".into(),
            file_header: DEFAULT_FILE_HEADER.into(),
            pretty_file: true,
        }
    }
}

/// Where `DataNode::write_data` sends the record. Both targets may be on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    pub to_node: bool,
    pub to_file: bool,
    /// File to write when `to_file` is set. Falls back to the path already
    /// stored on the node.
    pub file_path: Option<PathBuf>,
}

impl SaveOptions {
    pub fn node_only() -> Self {
        Self {
            to_node: true,
            ..Self::default()
        }
    }

    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            to_file: true,
            file_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn node_and_file(path: impl Into<PathBuf>) -> Self {
        Self {
            to_node: true,
            to_file: true,
            file_path: Some(path.into()),
        }
    }
}
