//! v001 -- Initial schema creation.
//!
//! Creates the `local_storage` key/value table.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS local_storage (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL                 -- serialized payload, usually JSON
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
