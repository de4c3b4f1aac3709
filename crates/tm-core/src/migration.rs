//! Migration value type

/// A single versioned unit of schema change.
///
/// Identity is `number` scoped to a logical service namespace; the same
/// number may exist in two independent migration streams sharing one
/// database. Immutable once loaded from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Opaque version identifier (not guaranteed purely numeric),
    /// e.g. `20150101-01` or `1.2`.
    pub number: String,

    /// Script body; may contain multiple batches separated by `GO` lines.
    pub sql: String,
}

impl Migration {
    /// Create a migration from a version identifier and a script body.
    pub fn new(number: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            sql: sql.into(),
        }
    }
}
