//! Migration run orchestration.
//!
//! One [`Migrator::migrate`] call reads the database's provisioning state,
//! performs the bootstrap that state requires, then applies every pending
//! migration strictly in ascending version order. Later scripts may depend
//! on earlier ones, so nothing here runs concurrently.

use crate::error::MigrateResult;
use crate::traits::{DatabaseCommander, Locker};
use std::cmp::Ordering;
use std::sync::Arc;
use tm_core::{CoreError, DatabaseVersion, Migration, MigrationComparer, MigrationSource};

/// Bootstrap work performed at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapAction {
    /// Database already provisioned.
    None,
    /// The database did not exist and was created.
    CreatedDatabase,
    /// The database existed but its history table was provisioned.
    CreatedHistoryTable,
}

/// Outcome of one completed migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateSummary {
    /// Bootstrap action taken before applying migrations.
    pub bootstrap: BootstrapAction,
    /// Numbers of the migrations applied, in application order.
    pub applied: Vec<String>,
}

/// Read-only view of what a run would do, produced by [`Migrator::plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratePlan {
    /// Provisioning state at the time of the plan.
    pub current: DatabaseVersion,
    /// Pending migration numbers, in application order.
    pub pending: Vec<String>,
}

/// Orchestrator reconciling available migrations against applied ones.
pub struct Migrator {
    source: Arc<dyn MigrationSource>,
    comparer: Arc<dyn MigrationComparer>,
    commander: Arc<dyn DatabaseCommander>,
    locker: Option<Arc<dyn Locker>>,
}

impl Migrator {
    /// Create a migrator over a source, an ordering strategy, and a
    /// commander.
    pub fn new(
        source: Arc<dyn MigrationSource>,
        comparer: Arc<dyn MigrationComparer>,
        commander: Arc<dyn DatabaseCommander>,
    ) -> Self {
        Self {
            source,
            comparer,
            commander,
            locker: None,
        }
    }

    /// Hold `locker` across the whole run: acquired before the state read,
    /// released on every exit path.
    pub fn with_locker(mut self, locker: Arc<dyn Locker>) -> Self {
        self.locker = Some(locker);
        self
    }

    /// Run one migration cycle and report what was done.
    pub async fn migrate(&self) -> MigrateResult<MigrateSummary> {
        if let Some(locker) = &self.locker {
            locker.lock().await?;
        }
        let result = self.run().await;
        if let Some(locker) = &self.locker {
            let released = locker.release().await;
            if result.is_ok() {
                released?;
            }
        }
        result
    }

    /// Compute the pending set without executing anything.
    pub async fn plan(&self) -> MigrateResult<MigratePlan> {
        let current = self.commander.current_version().await?;
        let pending = self.select_pending(&current).await?;
        Ok(MigratePlan {
            current,
            pending: pending.into_iter().map(|m| m.number).collect(),
        })
    }

    async fn run(&self) -> MigrateResult<MigrateSummary> {
        let current = self.commander.current_version().await?;

        let bootstrap = match &current {
            DatabaseVersion::NotCreated => {
                let database = self.commander.create().await?;
                log::info!("created database {database}");
                BootstrapAction::CreatedDatabase
            }
            DatabaseVersion::MissingHistoryTable => {
                self.commander.create_history_table().await?;
                log::info!("created migration history table");
                BootstrapAction::CreatedHistoryTable
            }
            DatabaseVersion::Version(_) => BootstrapAction::None,
        };

        let pending = self.select_pending(&current).await?;

        let mut applied = Vec::with_capacity(pending.len());
        for migration in &pending {
            self.commander.execute_migration(migration).await?;
            log::info!("applied migration {}", migration.number);
            applied.push(migration.number.clone());
        }

        Ok(MigrateSummary { bootstrap, applied })
    }

    /// Filter the available migrations against `current` and sort them
    /// ascending. An invalid version number anywhere aborts before any
    /// migration executes.
    async fn select_pending(&self, current: &DatabaseVersion) -> MigrateResult<Vec<Migration>> {
        let available = self.source.load_migrations().await?;

        let mut pending = match current {
            DatabaseVersion::Version(Some(version)) => {
                let mut kept = Vec::new();
                for migration in available {
                    if self.comparer.is_after(&migration, version)? {
                        kept.push(migration);
                    }
                }
                kept
            }
            // Not created, history table missing, or nothing applied yet:
            // every available migration is pending.
            _ => available,
        };

        self.sort_ascending(&mut pending)?;
        Ok(pending)
    }

    fn sort_ascending(&self, migrations: &mut [Migration]) -> Result<(), CoreError> {
        let mut sort_err: Option<CoreError> = None;
        migrations.sort_by(|a, b| match self.comparer.compare(a, b) {
            Ok(ordering) => ordering,
            Err(e) => {
                sort_err.get_or_insert(e);
                Ordering::Equal
            }
        });
        match sort_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
