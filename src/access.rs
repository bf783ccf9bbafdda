//! Field Accessor
//!
//! The single chokepoint for reading a field out of a table snapshot. A missing
//! row and a missing field are indistinguishable to callers: both yield the
//! supplied default.

use crate::store::keys::composite_key;
use crate::store::TableSnapshot;

/// Look up `table[key][field]`, or `table[key<sep>member][field]` when a
/// member is given, where `<sep>` is the delimiter of the table's database.
pub fn get_field<'a>(
    table: &'a TableSnapshot,
    key: &str,
    member: Option<&str>,
    field: &str,
    default: &'a str,
) -> &'a str {
    let row = match member {
        Some(member) => table.row(&composite_key(key, member, table.separator())),
        None => table.row(key),
    };
    row.and_then(|fields| fields.get(field))
        .map(String::as_str)
        .unwrap_or(default)
}

/// String-encoded boolean: only the exact value `"true"` is true.
pub fn get_flag(table: &TableSnapshot, key: &str, member: Option<&str>, field: &str) -> bool {
    get_field(table, key, member, field, "") == "true"
}

/// Field value lower-cased, empty when absent.
pub fn get_folded(table: &TableSnapshot, key: &str, member: Option<&str>, field: &str) -> String {
    get_field(table, key, member, field, "").to_lowercase()
}
