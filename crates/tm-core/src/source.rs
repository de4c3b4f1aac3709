//! Migration sources: where available migrations come from.
//!
//! A source yields the unordered set of available migrations; ordering and
//! filtering happen in the migrator. Two implementations ship here: one
//! reading a directory of `.sql` files, one reading a bundle embedded in
//! the binary at compile time.

use crate::error::{CoreError, CoreResult};
use crate::migration::Migration;
use async_trait::async_trait;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Supplier of available migrations.
///
/// Implementations must be Send + Sync for async operation. Duplicate
/// numbers within one load are a caller error and are not detected here.
#[async_trait]
pub trait MigrationSource: Send + Sync {
    /// Load every available migration, in no particular order.
    async fn load_migrations(&self) -> CoreResult<Vec<Migration>>;
}

/// Source reading one migration per regular file in a directory.
///
/// The migration number is the file stem (`migrations/20150101-01.sql`
/// yields number `20150101-01`); the body is the file contents.
pub struct FileSystemSource {
    path: PathBuf,
}

impl FileSystemSource {
    /// Create a source over `path`. The directory is read lazily on each
    /// `load_migrations` call, not at construction.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_directory(&self) -> CoreResult<Vec<Migration>> {
        if !self.path.is_dir() {
            return Err(CoreError::SourceNotFound {
                path: self.path.display().to_string(),
            });
        }
        let mut migrations = Vec::new();
        for entry in std::fs::read_dir(&self.path).map_err(|e| CoreError::IoWithPath {
            path: self.path.display().to_string(),
            source: e,
        })? {
            let entry = entry.map_err(|e| CoreError::IoWithPath {
                path: self.path.display().to_string(),
                source: e,
            })?;
            let file_path = entry.path();
            if !file_path.is_file() {
                continue;
            }
            let Some(number) = file_stem(&file_path) else {
                continue;
            };
            let sql = std::fs::read_to_string(&file_path).map_err(|e| CoreError::IoWithPath {
                path: file_path.display().to_string(),
                source: e,
            })?;
            migrations.push(Migration::new(number, sql));
        }
        log::debug!(
            "loaded {} migrations from {}",
            migrations.len(),
            self.path.display()
        );
        Ok(migrations)
    }
}

#[async_trait]
impl MigrationSource for FileSystemSource {
    async fn load_migrations(&self) -> CoreResult<Vec<Migration>> {
        self.read_directory()
    }
}

/// Source reading migrations embedded in the binary via `rust-embed`.
///
/// Each embedded file becomes one migration, numbered by its file stem.
/// ```ignore
/// #[derive(rust_embed::RustEmbed)]
/// #[folder = "migrations/"]
/// struct Bundled;
///
/// let source = EmbeddedSource::<Bundled>::new();
/// ```
pub struct EmbeddedSource<E> {
    _bundle: PhantomData<E>,
}

impl<E: rust_embed::RustEmbed> EmbeddedSource<E> {
    /// Create a source over the embedded bundle `E`.
    pub fn new() -> Self {
        Self {
            _bundle: PhantomData,
        }
    }
}

impl<E: rust_embed::RustEmbed> Default for EmbeddedSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: rust_embed::RustEmbed + Send + Sync> MigrationSource for EmbeddedSource<E> {
    async fn load_migrations(&self) -> CoreResult<Vec<Migration>> {
        let mut migrations = Vec::new();
        for name in E::iter() {
            let Some(file) = E::get(&name) else {
                continue;
            };
            let Some(number) = file_stem(Path::new(name.as_ref())) else {
                continue;
            };
            let sql = String::from_utf8_lossy(&file.data).into_owned();
            migrations.push(Migration::new(number, sql));
        }
        Ok(migrations)
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn loads_number_and_sql_from_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("20150101-01.sql"), "create table a (id int)").unwrap();
        fs::write(dir.path().join("20150101-02.sql"), "create table b (id int)").unwrap();

        let source = FileSystemSource::new(dir.path());
        let mut migrations = source.load_migrations().await.unwrap();
        migrations.sort_by(|a, b| a.number.cmp(&b.number));

        assert_eq!(migrations.len(), 2);
        assert_eq!(migrations[0].number, "20150101-01");
        assert_eq!(migrations[0].sql, "create table a (id int)");
        assert_eq!(migrations[1].number, "20150101-02");
    }

    #[tokio::test]
    async fn subdirectories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1.sql"), "select 1").unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();

        let source = FileSystemSource::new(dir.path());
        let migrations = source.load_migrations().await.unwrap();
        assert_eq!(migrations.len(), 1);
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSystemSource::new(dir.path().join("nope"));
        let err = source.load_migrations().await.unwrap_err();
        assert!(matches!(err, CoreError::SourceNotFound { .. }));
    }

    #[tokio::test]
    async fn empty_directory_yields_no_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSystemSource::new(dir.path());
        assert!(source.load_migrations().await.unwrap().is_empty());
    }
}
