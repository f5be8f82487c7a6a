use crate::config::Config;
use crate::model::{HistoryEntry, Paste};
use anyhow::Result;
use libsql::{Builder, Connection};
use std::path::Path;

const SYSTEM_MIGRATIONS: &[(&str, &str)] =
    &[("system/000_migrations_table.sql", include_str!("migrations/system/000_migrations_table.sql"))];

const MIGRATIONS: &[(&str, &str)] = &[("001_pastes.sql", include_str!("migrations/001_pastes.sql"))];

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn is_migration_applied(conn: &Connection, name: &str) -> Result<bool> {
        let query = "SELECT 1 FROM _migrations WHERE name = ?";
        match conn.query(query, libsql::params![name]).await {
            Ok(mut rows) => Ok(rows.next().await?.is_some()),
            Err(e) => {
                if e.to_string().contains("no such table") {
                    Ok(false)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn record_migration(conn: &Connection, name: &str) -> Result<()> {
        let query = r#"
            INSERT INTO _migrations (name, applied_at)
            VALUES (?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        "#;
        match conn.execute(query, libsql::params![name]).await {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.to_string().contains("no such table") {
                    Ok(())
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
        if Self::is_migration_applied(conn, name).await? {
            tracing::debug!("migration {} already applied, skipping", name);
            return Ok(());
        }

        tracing::info!("applying migration: {}", name);
        conn.execute_batch(sql)
            .await
            .map_err(|e| anyhow::anyhow!("failed to execute migration {name}: {e}"))?;

        Self::record_migration(conn, name).await?;
        Ok(())
    }

    async fn setup(conn: &Connection) -> Result<()> {
        conn.query("SELECT 1", ()).await?;

        for (filename, sql) in SYSTEM_MIGRATIONS {
            Self::run_migration(conn, filename, sql).await?;
        }

        for (filename, sql) in MIGRATIONS {
            Self::run_migration(conn, filename, sql).await?;
        }

        Ok(())
    }

    pub async fn new(cfg: &Config, data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(cfg.app.get_db());
        let db = Builder::new_local(&path).build().await?;
        let conn = db.connect()?;
        Self::setup(&conn).await?;
        Ok(Database { conn })
    }

    /// In-memory database, used by tests.
    pub async fn open_in_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        let conn = db.connect()?;
        Self::setup(&conn).await?;
        Ok(Database { conn })
    }

    /// Inserts a new paste row. A duplicate id surfaces as the underlying
    /// primary-key constraint error; callers treat any failure as a generic
    /// persistence error and do not retry.
    pub async fn insert_paste(&self, id: &str, content: &str, ip_address: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO pastes (id, content, ip_address) VALUES (?, ?, ?)",
                libsql::params![id, content, ip_address],
            )
            .await?;
        Ok(())
    }

    pub async fn get_paste(&self, id: &str) -> Result<Option<Paste>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, content, ip_address FROM pastes WHERE id = ?",
                libsql::params![id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Paste {
                id: row.get(0)?,
                content: row.get::<Option<String>>(1)?.unwrap_or_default(),
                ip_address: row.get::<Option<String>>(2)?.unwrap_or_default(),
            }))
        } else {
            Ok(None)
        }
    }

    pub async fn pastes_by_address(&self, ip_address: &str) -> Result<Vec<HistoryEntry>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, content FROM pastes WHERE ip_address = ?",
                libsql::params![ip_address],
            )
            .await?;

        let mut entries: Vec<HistoryEntry> = vec![];
        while let Some(row) = rows.next().await? {
            entries.push(HistoryEntry {
                id: row.get(0)?,
                content: row.get::<Option<String>>(1)?.unwrap_or_default(),
            });
        }

        Ok(entries)
    }
}
