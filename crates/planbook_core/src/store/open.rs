//! Connection bootstrap for the SQLite-backed graph store.
//!
//! # Responsibility
//! - Open file or in-memory connections.
//! - Configure pragmas required by store behavior.
//! - Apply schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` (detach-delete relies on
//!   edge cascade).
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::StoreResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

pub(super) fn open_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    let started_at = Instant::now();
    info!("event=store_open module=store status=start mode=file");
    let result = Connection::open(path)
        .map_err(Into::into)
        .and_then(bootstrap_connection);
    log_open_outcome("file", started_at, &result);
    result
}

pub(super) fn open_db_in_memory() -> StoreResult<Connection> {
    let started_at = Instant::now();
    info!("event=store_open module=store status=start mode=memory");
    let result = Connection::open_in_memory()
        .map_err(Into::into)
        .and_then(bootstrap_connection);
    log_open_outcome("memory", started_at, &result);
    result
}

fn bootstrap_connection(mut conn: Connection) -> StoreResult<Connection> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

fn log_open_outcome(mode: &str, started_at: Instant, result: &StoreResult<Connection>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event=store_open module=store status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => error!(
            "event=store_open module=store status=error mode={mode} duration_ms={duration_ms} error={err}"
        ),
    }
}
