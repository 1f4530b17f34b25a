//! Picker data files.
//!
//! A data file is a plain-text header followed by the JSON-encoded
//! character wrapped in `<data_start/>` / `<data_end/>` markers:
//!
//! ```text
//! # header comment lines
//!
//! <data_start/>
//! { "tabs": [ ... ] }
//! <data_end/>
//! ```
//!
//! Anything outside the markers is ignored on read.

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use picker_core::CharacterRecord;
use std::path::Path;
use winnow::combinator::{preceded, terminated};
use winnow::prelude::*;
use winnow::token::take_until;

pub const DATA_START: &str = "<data_start/>";
pub const DATA_END: &str = "<data_end/>";

/// Render a record as data file text.
pub fn encode_data_file(record: &CharacterRecord, config: &StoreConfig) -> Result<String> {
    let body = if config.pretty_file {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    Ok(format!(
        "{}\n{DATA_START}\n{body}\n{DATA_END}\n",
        config.file_header
    ))
}

/// Decode data file text. `source` names the file in errors.
pub fn decode_data_file(text: &str, source: &str) -> Result<CharacterRecord> {
    let mut rest = text;
    let body = data_segment
        .parse_next(&mut rest)
        .map_err(|_| StoreError::InvalidFile(source.to_string()))?;
    Ok(serde_json::from_str(body)?)
}

/// Write `record` to `path`, replacing any existing file.
pub fn write_data_file(
    path: impl AsRef<Path>,
    record: &CharacterRecord,
    config: &StoreConfig,
) -> Result<()> {
    let path = path.as_ref();
    let text = encode_data_file(record, config)?;
    std::fs::write(path, text)?;
    log::debug!("wrote picker data file {}", path.display());
    Ok(())
}

/// Read a record back from `path`.
///
/// # Errors
/// `FileNotFound` when the path is missing or not a regular file,
/// `InvalidFile` when the data markers are missing, `Decode` when the body
/// is not a valid record.
pub fn read_data_file(path: impl AsRef<Path>) -> Result<CharacterRecord> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let text = std::fs::read_to_string(path)?;
    let record = decode_data_file(&text, &path.display().to_string())?;
    log::debug!("read picker data file {}", path.display());
    Ok(record)
}

/// Text strictly between the first start marker and the next end marker.
fn data_segment<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded(
        (take_until(0.., DATA_START), DATA_START),
        terminated(take_until(0.., DATA_END), DATA_END),
    )
    .parse_next(input)
}
