//! Connection-string parsing.
//!
//! Connection strings are `key=value` pairs separated by `;`, with
//! case-insensitive keys. The target database name may be embedded under
//! `database` or `initial catalog`; the data directory holding database
//! files under `path`.

/// Look up `key` (case-insensitive) in a `key=value;...` connection string.
fn find_key(connection: &str, key: &str) -> Option<String> {
    for pair in connection.split(';') {
        let Some((k, v)) = pair.split_once('=') else {
            continue;
        };
        if k.trim().eq_ignore_ascii_case(key) {
            let value = v.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Database name embedded in the connection string, if any.
pub fn database_name(connection: &str) -> Option<String> {
    find_key(connection, "database").or_else(|| find_key(connection, "initial catalog"))
}

/// Data directory holding database files, if any.
pub fn data_dir(connection: &str) -> Option<String> {
    find_key(connection, "path")
}
