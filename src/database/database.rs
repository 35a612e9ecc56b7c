use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio_rusqlite::Connection;

use super::schema::TableNames;
use super::traits::{Warehouse, WarehouseSession};
use crate::workflow::{FruitOption, Order, OrderAck};

#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),
    #[error("Database connection error: {0}")]
    Connection(String),
    #[error("Invalid table name: {0:?}")]
    InvalidIdentifier(String),
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// SQLite-backed warehouse. Holds no connection itself; each session opens one.
#[derive(Debug, Clone)]
pub struct SqliteWarehouse {
    path: PathBuf,
    tables: TableNames,
}

impl SqliteWarehouse {
    pub fn new<P: AsRef<Path>>(path: P, tables: TableNames) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            tables,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tables(&self) -> &TableNames {
        &self.tables
    }

    async fn connect(&self) -> Result<Connection, DataAccessError> {
        Connection::open(self.path.clone())
            .await
            .map_err(|e| DataAccessError::Connection(e.to_string()))
    }

    /// Creates the catalog and orders tables if they don't exist.
    pub async fn initialize(&self) -> Result<(), DataAccessError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let conn = self.connect().await?;
        let sql = self.tables.create_tables_sql();
        conn.call(move |conn| {
            conn.execute_batch(&sql)?;
            Ok(())
        })
        .await?;
        conn.close().await?;

        info!("Database initialized at {}", self.path.display());
        Ok(())
    }

    /// Inserts catalog rows that are not present yet. Returns the number added.
    pub async fn seed_catalog(&self, fruits: &[(&str, Option<&str>)]) -> Result<usize, DataAccessError> {
        let rows: Vec<(String, Option<String>)> = fruits
            .iter()
            .map(|(name, alias)| (name.to_string(), alias.map(str::to_string)))
            .collect();
        let sql = self.tables.seed_catalog_sql();

        let conn = self.connect().await?;
        let added = conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let mut added = 0;
                {
                    let mut stmt = tx.prepare(&sql)?;
                    for (name, alias) in &rows {
                        added += stmt.execute(rusqlite::params![name, alias])?;
                    }
                }
                tx.commit()?;
                Ok(added)
            })
            .await?;
        conn.close().await?;

        info!("Seeded {} fruit options into {}", added, self.tables.catalog);
        Ok(added)
    }
}

#[async_trait]
impl Warehouse for SqliteWarehouse {
    async fn open(&self) -> Result<Box<dyn WarehouseSession>, DataAccessError> {
        let conn = self.connect().await?;
        debug!("Opened warehouse session on {}", self.path.display());

        Ok(Box::new(SqliteSession {
            conn,
            tables: self.tables.clone(),
        }))
    }
}

pub struct SqliteSession {
    conn: Connection,
    tables: TableNames,
}

#[async_trait]
impl WarehouseSession for SqliteSession {
    async fn list_fruit_options(&self) -> Result<Vec<FruitOption>, DataAccessError> {
        let sql = self.tables.select_catalog_sql();
        let rows = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;

                let rows = stmt.query_map([], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<String>>(1)?,
                    ))
                })?;

                let mut options = Vec::new();
                for row in rows {
                    options.push(row?);
                }

                Ok(options)
            })
            .await?;

        Ok(rows
            .into_iter()
            .map(|(name, search_on)| FruitOption::new(name, search_on))
            .collect())
    }

    async fn submit_order(&self, order: &Order) -> Result<OrderAck, DataAccessError> {
        let sql = self.tables.insert_order_sql();
        let ingredients = order.ingredients.clone();
        let name_on_order = order.name_on_order.clone();

        let order_id = self
            .conn
            .call(move |conn| {
                conn.execute(&sql, [&ingredients, &name_on_order])?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        Ok(OrderAck {
            order_id,
            submitted_at: Utc::now(),
        })
    }

    async fn close(self: Box<Self>) -> Result<(), DataAccessError> {
        self.conn.close().await?;
        debug!("Closed warehouse session");
        Ok(())
    }
}
