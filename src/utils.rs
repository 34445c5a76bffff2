//! The `utils` module holds small helpers shared by more than one call site, kept here so each
//! doesn't have to reimplement generic CSV and binary-persistence plumbing.
use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::CachedOutcome;
use crate::error::ParseOutcome;
use crate::tokenizer::TokenCategory;

/// Generic function to serialize data types into a CSV file. Called by methods to avoid code
/// duplication.
pub fn to_csv<T: Serialize + Clone>(item: &[T], path: impl AsRef<Path>) -> ParseOutcome<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in item {
        writer.serialize(record.clone())?;
    }
    writer.flush()?;
    Ok(())
}

/// Generic function to deserialize data types from a CSV file. Called by methods to avoid code
/// duplication. Rows that fail to deserialize are dropped and logged rather than aborting the
/// whole read.
pub fn from_csv<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> ParseOutcome<Vec<T>> {
    let mut records = Vec::new();
    let file = std::fs::File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut dropped = 0;
    for result in reader.deserialize() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::trace!("dropping unparseable row: {e}");
                dropped += 1;
            }
        }
    }
    tracing::info!("{dropped} records dropped.");
    Ok(records)
}

/// Serializes a [`crate::cache::MemoryParseCache`]'s entries to `path` with `bincode`, so a
/// skeleton cache warmed by one run can be reused by the next.
pub fn save_cache(
    entries: &HashMap<Vec<TokenCategory>, CachedOutcome>,
    path: impl AsRef<Path>,
) -> ParseOutcome<()> {
    tracing::info!("serializing parse cache to binary");
    let encoded = bincode::serde::encode_to_vec(entries, bincode::config::standard())?;
    std::fs::write(path, encoded)?;
    Ok(())
}

/// Loads a previously saved parse cache back into memory.
pub fn load_cache(
    path: impl AsRef<Path>,
) -> ParseOutcome<HashMap<Vec<TokenCategory>, CachedOutcome>> {
    tracing::info!("loading parse cache from binary");
    let bytes = std::fs::read(path)?;
    let (decoded, _) =
        bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
    Ok(decoded)
}
