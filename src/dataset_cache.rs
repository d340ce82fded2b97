use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use chrono::Utc;
use tracing::{info, debug};

/// On-disk cache of upstream dataset bodies. Metadata lives in sqlite, the
/// payloads in plain files next to it.
pub struct DatasetCache {
    pool: SqlitePool,
    cache_dir: PathBuf,
    ttl_secs: i64,
    max_size_bytes: u64,
}

impl DatasetCache {
    pub async fn new(cache_dir: PathBuf, ttl_secs: u64, max_size_mb: u64) -> Result<Self> {
        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir)?;
        }

        let db_path = cache_dir.join("dataset_metadata.db");
        let opts = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(opts).await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS datasets (
                key TEXT PRIMARY KEY,
                file_path TEXT NOT NULL,
                size_bytes INTEGER NOT NULL,
                fetched_at INTEGER NOT NULL,
                last_access_at INTEGER NOT NULL
            )"
        ).execute(&pool).await?;

        Ok(Self {
            pool,
            cache_dir,
            ttl_secs: ttl_secs as i64,
            max_size_bytes: max_size_mb * 1024 * 1024,
        })
    }

    /// Returns the cached body for `key` if it was fetched within the TTL.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let row: Option<(String, i64)> = sqlx::query_as(
            "SELECT file_path, fetched_at FROM datasets WHERE key = ?"
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        let Some((rel_path, fetched_at)) = row else {
            debug!("cache miss: {}", key);
            return Ok(None);
        };

        let now = Utc::now().timestamp();
        if now - fetched_at > self.ttl_secs {
            debug!("cache stale: {} ({}s old)", key, now - fetched_at);
            return Ok(None);
        }

        let full_path = self.cache_dir.join(rel_path);
        if !full_path.exists() {
            sqlx::query("DELETE FROM datasets WHERE key = ?").bind(key).execute(&self.pool).await?;
            debug!("cache entry without file dropped: {}", key);
            return Ok(None);
        }

        let bytes = fs::read(full_path)?;
        sqlx::query("UPDATE datasets SET last_access_at = ? WHERE key = ?")
            .bind(now)
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!("cache hit: {}", key);
        Ok(Some(bytes))
    }

    pub async fn insert(&self, key: &str, data: &[u8]) -> Result<()> {
        let file_name = format!("{}.json", sanitize(key));
        let full_path = self.cache_dir.join(&file_name);

        fs::write(&full_path, data)?;

        let now = Utc::now().timestamp();
        sqlx::query(
            "INSERT OR REPLACE INTO datasets (key, file_path, size_bytes, fetched_at, last_access_at)
             VALUES (?, ?, ?, ?, ?)"
        )
        .bind(key)
        .bind(&file_name)
        .bind(data.len() as i64)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.evict_if_needed().await?;
        Ok(())
    }

    async fn evict_if_needed(&self) -> Result<()> {
        let current_size: i64 = sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(size_bytes), 0) FROM datasets")
            .fetch_one(&self.pool)
            .await?;

        if current_size as u64 <= self.max_size_bytes {
            return Ok(());
        }
        info!("dataset cache over {} bytes, evicting", self.max_size_bytes);

        let entries: Vec<(String, String, i64)> = sqlx::query_as(
            "SELECT key, file_path, size_bytes FROM datasets ORDER BY last_access_at ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        let mut remaining = current_size as u64;
        for (key, rel_path, size) in entries {
            if remaining <= self.max_size_bytes {
                break;
            }
            let full_path = self.cache_dir.join(rel_path);
            if full_path.exists() {
                let _ = fs::remove_file(full_path);
            }
            sqlx::query("DELETE FROM datasets WHERE key = ?").bind(&key).execute(&self.pool).await?;
            remaining = remaining.saturating_sub(size as u64);
            debug!("evicted: {}", key);
        }
        Ok(())
    }
}

fn sanitize(key: &str) -> String {
    key.chars().map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' }).collect()
}
