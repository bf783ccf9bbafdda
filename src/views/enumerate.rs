//! Entity Enumerator.

use crate::store::TableSnapshot;

/// Entity names of the authoritative table whose key starts with `prefix`,
/// in the table's iteration order. A key equal to the prefix names no entity
/// and is skipped.
pub fn enumerate_entities<'a>(config: &'a TableSnapshot, prefix: &str) -> Vec<&'a str> {
    config
        .keys()
        .filter(|key| key.len() > prefix.len() && key.starts_with(prefix))
        .collect()
}
