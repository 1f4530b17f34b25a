pub mod config;
pub mod error;
pub mod file;
pub mod host;
pub mod node;

pub use config::{FORMAT_VERSION, SaveOptions, StoreConfig};
pub use error::{Result, StoreError};
pub use file::{read_data_file, write_data_file};
pub use host::{AttrValue, HostAdapter, MemoryHost};
pub use node::{DataNode, WriteStatus, get_node_for_object, get_nodes};
