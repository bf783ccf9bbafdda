//! Key construction. Every raw store key and composite row key is built here
//! so the per-database delimiters cannot drift apart.

use crate::types::TableId;

/// Prefix shared by every raw store key of `table`, e.g. `LAG_TABLE|`.
pub fn table_prefix(table: &TableId) -> String {
    format!("{}{}", table.table, table.db.separator())
}

/// Raw store key of one row, e.g. `LAG_MEMBER_TABLE:PortChannel1:Ethernet0`.
pub fn store_key(table: &TableId, row: &str) -> String {
    format!("{}{}", table_prefix(table), row)
}

/// Row key of a raw store key, if it belongs to `table`.
pub fn row_key<'a>(table: &TableId, raw: &'a str) -> Option<&'a str> {
    raw.strip_prefix(table.table.as_str())?
        .strip_prefix(table.db.separator())
}

/// Composite row key for a member of an entity, e.g. `PortChannel1|Ethernet0`.
pub fn composite_key(entity: &str, member: &str, separator: char) -> String {
    format!("{}{}{}", entity, separator, member)
}

/// Prefix of every composite row key under `entity`.
pub fn member_prefix(entity: &str, separator: char) -> String {
    format!("{}{}", entity, separator)
}
