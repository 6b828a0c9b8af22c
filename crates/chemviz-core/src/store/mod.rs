//! Durable dataset storage with bounded retention
//!
//! Records live in a SQLite table; each record's source upload lives in a
//! [`BlobStore`]. The store keeps at most `retention` records: every insert
//! prunes the oldest rows inside the same transaction, so no reader ever
//! observes more than `retention` records.
//!
//! # Write path
//!
//! 1. The source blob is written under a key derived from the new id.
//! 2. One transaction inserts the record, then selects and deletes every row
//!    past the retention bound (newest first, `seq` breaking timestamp ties).
//! 3. After commit, blobs of the pruned rows are deleted. A failed blob
//!    delete is logged and never fails the insert.
//!
//! If step 2 fails the new blob is removed and no record exists.
//!
//! Writers are serialized by an in-process lock; SQLite's busy timeout covers
//! other processes sharing the same database file.

pub mod blob;
mod row;

pub use blob::{BlobStore, FsBlobStore};

use crate::error::{CoreError, CoreResult};
use crate::models::{default_dataset_name, EquipmentDataset, NewDataset};
use chemviz_common::checksum::{sha256_hex, verify_sha256};
use chemviz_common::types::RETENTION_LIMIT;
use chemviz_common::CommonError;
use chrono::{SubsecRound, Utc};
use row::{timestamp_from_micros, DatasetRow, DATASET_COLUMNS, RECENCY_ORDER};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Database file created inside a data directory
pub const DEFAULT_DATABASE_FILE: &str = "chemviz.db";

/// Default pool size for file-backed databases
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Maximum length of a dataset display name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of an original filename, in characters
pub const MAX_FILENAME_LEN: usize = 255;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite connection URL, e.g. `sqlite://data/chemviz.db` or `sqlite::memory:`
    pub database_url: String,
    /// Directory holding source blobs
    pub blob_root: PathBuf,
    /// Maximum number of records kept
    pub retention: usize,
    pub max_connections: u32,
}

impl StoreConfig {
    /// Standard layout under one data directory:
    /// `<dir>/chemviz.db` and `<dir>/media/uploads/`.
    pub fn for_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            database_url: format!("sqlite://{}", dir.join(DEFAULT_DATABASE_FILE).display()),
            blob_root: dir.join("media").join("uploads"),
            retention: RETENTION_LIMIT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.database_url.trim().is_empty() {
            return Err(CoreError::validation("database_url must not be empty"));
        }
        if self.retention == 0 {
            return Err(CoreError::validation("retention must be at least 1"));
        }
        if self.max_connections == 0 {
            return Err(CoreError::validation("max_connections must be at least 1"));
        }
        Ok(())
    }

    fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Pool settings for `config`.
///
/// Every connection to a private in-memory database sees its own empty
/// database, and closing the last one discards it. Such a pool holds exactly
/// one connection that is never reaped.
fn pool_options(config: &StoreConfig) -> SqlitePoolOptions {
    if config.is_in_memory() {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    }
}

/// Blob key for a dataset's source file
pub fn source_key(id: &Uuid) -> String {
    format!("{}.csv", id)
}

/// A pruned row whose blob still has to be released
#[derive(Debug, sqlx::FromRow)]
struct StaleDataset {
    id: String,
    blob_key: String,
}

/// Handle to the dataset store. Cheap to clone; clones share one pool and
/// one write lock.
#[derive(Clone)]
pub struct DatasetStore {
    pool: SqlitePool,
    blobs: Arc<dyn BlobStore>,
    retention: usize,
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for DatasetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetStore")
            .field("retention", &self.retention)
            .finish_non_exhaustive()
    }
}

impl DatasetStore {
    /// Open (creating if missing) the database and blob directory described
    /// by `config`, and apply pending migrations.
    #[instrument(skip(config), fields(database_url = %config.database_url))]
    pub async fn open(config: &StoreConfig) -> CoreResult<Self> {
        config.validate()?;

        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        if !config.is_in_memory() {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }

        let pool = pool_options(config).connect_with(options).await?;

        let blobs = FsBlobStore::open(&config.blob_root).await?;

        Self::with_parts(pool, Arc::new(blobs), config.retention).await
    }

    /// Assemble a store from an existing pool and blob backend.
    pub async fn with_parts(
        pool: SqlitePool,
        blobs: Arc<dyn BlobStore>,
        retention: usize,
    ) -> CoreResult<Self> {
        if retention == 0 {
            return Err(CoreError::validation("retention must be at least 1"));
        }

        sqlx::migrate!("./migrations").run(&pool).await?;
        debug!(retention, "Dataset store ready");

        Ok(Self {
            pool,
            blobs,
            retention,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn blob_store(&self) -> &Arc<dyn BlobStore> {
        &self.blobs
    }

    /// Persist a new dataset and prune everything past the retention bound.
    ///
    /// The returned record equals what [`DatasetStore::get`] later returns
    /// for its id.
    #[instrument(skip(self, new), fields(filename = %new.original_filename, rows = new.summary.total_count))]
    pub async fn create(&self, new: NewDataset) -> CoreResult<EquipmentDataset> {
        validate_new(&new)?;

        let _write = self.write_lock.lock().await;

        let id = Uuid::new_v4();
        let key = source_key(&id);
        let requested_at = Utc::now().trunc_subsecs(6);
        let name = match new.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_dataset_name(requested_at),
        };
        let distribution =
            serde_json::to_string(&new.summary.type_distribution).map_err(CommonError::from)?;
        let checksum = sha256_hex(&new.source);
        let source_size = new.source.len() as u64;

        self.blobs.put(&key, &new.source).await?;

        let committed = async {
            let mut tx = self.pool.begin().await?;

            // Clamp to the newest stored timestamp so creation order and
            // timestamp order agree even if the wall clock steps back.
            let created_at_us: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO equipment_datasets (
                    id, name, original_filename, blob_key, total_count,
                    avg_flowrate, avg_pressure, avg_temperature, type_distribution,
                    source_size, source_checksum, created_at_us
                )
                VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                    MAX(?12, COALESCE((SELECT MAX(created_at_us) FROM equipment_datasets), ?12))
                )
                RETURNING created_at_us
                "#,
            )
            .bind(id.to_string())
            .bind(&name)
            .bind(&new.original_filename)
            .bind(&key)
            .bind(new.summary.total_count as i64)
            .bind(new.summary.avg_flowrate)
            .bind(new.summary.avg_pressure)
            .bind(new.summary.avg_temperature)
            .bind(&distribution)
            .bind(source_size as i64)
            .bind(&checksum)
            .bind(requested_at.timestamp_micros())
            .fetch_one(&mut *tx)
            .await?;

            let stale = self.prune_in(&mut tx).await?;
            tx.commit().await?;

            Ok::<_, CoreError>((created_at_us, stale))
        }
        .await;

        let (created_at_us, stale) = match committed {
            Ok(committed) => committed,
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&key).await {
                    warn!(blob_key = %key, error = %cleanup, "Failed to remove blob of rejected dataset");
                }
                return Err(e);
            },
        };

        self.release_blobs(&stale).await;

        info!(dataset_id = %id, pruned = stale.len(), "Dataset stored");

        Ok(EquipmentDataset {
            id,
            name,
            original_filename: new.original_filename,
            summary: new.summary,
            source_size,
            source_checksum: checksum,
            created_at: timestamp_from_micros(created_at_us)?,
        })
    }

    /// Delete every record past the retention bound. Returns how many were
    /// removed. [`DatasetStore::create`] already does this on every insert.
    #[instrument(skip(self))]
    pub async fn prune(&self) -> CoreResult<usize> {
        let _write = self.write_lock.lock().await;

        let mut tx = self.pool.begin().await?;
        let stale = self.prune_in(&mut tx).await?;
        tx.commit().await?;

        self.release_blobs(&stale).await;
        Ok(stale.len())
    }

    async fn prune_in(&self, tx: &mut Transaction<'static, Sqlite>) -> CoreResult<Vec<StaleDataset>> {
        let sql = format!(
            "SELECT id, blob_key FROM equipment_datasets {} LIMIT -1 OFFSET ?1",
            RECENCY_ORDER
        );
        let stale: Vec<StaleDataset> = sqlx::query_as(&sql)
            .bind(self.retention as i64)
            .fetch_all(&mut **tx)
            .await?;

        for dataset in &stale {
            sqlx::query("DELETE FROM equipment_datasets WHERE id = ?1")
                .bind(&dataset.id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(stale)
    }

    async fn release_blobs(&self, stale: &[StaleDataset]) {
        for dataset in stale {
            match self.blobs.delete(&dataset.blob_key).await {
                Ok(()) => debug!(dataset_id = %dataset.id, "Pruned dataset"),
                Err(e) => warn!(
                    dataset_id = %dataset.id,
                    blob_key = %dataset.blob_key,
                    error = %e,
                    "Pruned dataset but could not delete its source blob"
                ),
            }
        }
    }

    /// Most recent dataset, if any
    pub async fn get_latest(&self) -> CoreResult<Option<EquipmentDataset>> {
        let sql = format!("SELECT {} FROM equipment_datasets {} LIMIT 1", DATASET_COLUMNS, RECENCY_ORDER);
        let row: Option<DatasetRow> = sqlx::query_as(&sql).fetch_optional(&self.pool).await?;
        row.map(EquipmentDataset::try_from).transpose()
    }

    /// Up to `limit` datasets, newest first
    pub async fn list_recent(&self, limit: usize) -> CoreResult<Vec<EquipmentDataset>> {
        let sql = format!("SELECT {} FROM equipment_datasets {} LIMIT ?1", DATASET_COLUMNS, RECENCY_ORDER);
        let rows: Vec<DatasetRow> = sqlx::query_as(&sql)
            .bind(limit.min(i64::MAX as usize) as i64)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(EquipmentDataset::try_from).collect()
    }

    /// Exact lookup; pruned or unknown ids are [`CoreError::NotFound`]
    pub async fn get(&self, id: Uuid) -> CoreResult<EquipmentDataset> {
        let sql = format!("SELECT {} FROM equipment_datasets WHERE id = ?1", DATASET_COLUMNS);
        let row: Option<DatasetRow> = sqlx::query_as(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => EquipmentDataset::try_from(row),
            None => Err(CoreError::dataset_not_found(&id)),
        }
    }

    /// Original uploaded bytes of a dataset, verified against the stored checksum
    pub async fn read_source(&self, id: Uuid) -> CoreResult<Vec<u8>> {
        let located: Option<(String, String)> = sqlx::query_as(
            "SELECT blob_key, source_checksum FROM equipment_datasets WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        let (key, checksum) = located.ok_or_else(|| CoreError::dataset_not_found(&id))?;

        let data = match self.blobs.get(&key).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CoreError::corrupt(format!("source blob '{}' of {} is missing", key, id)));
            },
            Err(e) => return Err(e.into()),
        };

        verify_sha256(&data, &checksum)?;
        Ok(data)
    }

    /// Number of stored datasets
    pub async fn count(&self) -> CoreResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment_datasets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}

fn validate_new(new: &NewDataset) -> CoreResult<()> {
    let filename = new.original_filename.trim();
    if filename.is_empty() {
        return Err(CoreError::validation("Original filename must not be empty"));
    }
    if filename.chars().count() > MAX_FILENAME_LEN {
        return Err(CoreError::validation(format!(
            "Original filename must be at most {} characters",
            MAX_FILENAME_LEN
        )));
    }
    if let Some(name) = &new.name {
        if name.trim().chars().count() > MAX_NAME_LEN {
            return Err(CoreError::validation(format!(
                "Dataset name must be at most {} characters",
                MAX_NAME_LEN
            )));
        }
    }
    if new.summary.total_count == 0 {
        return Err(CoreError::EmptyDataset);
    }
    Ok(())
}
