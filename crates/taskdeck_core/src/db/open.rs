//! Connection setup for the task store.
//!
//! # Invariants
//! - Connections come back with `foreign_keys=ON`, a 5s busy timeout and the
//!   latest schema.

use super::migrations::{migrate, SchemaUpgrade};
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

enum Location<'a> {
    File(&'a Path),
    Memory,
}

impl Location<'_> {
    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        match self {
            Self::File(path) => Connection::open(path),
            Self::Memory => Connection::open_in_memory(),
        }
    }
}

/// Opens (creating when missing) the task store at `path` and migrates it.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open(Location::File(path.as_ref()))
}

/// Opens a throwaway migrated store, used by tests and dry runs.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open(Location::Memory)
}

fn open(location: Location<'_>) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = location.mode();

    match connect_and_migrate(&location) {
        Ok((conn, upgrade)) => {
            info!(
                "event=db_open module=db status=ok mode={mode} schema_from={} schema_to={} migrated={} duration_ms={}",
                upgrade.from,
                upgrade.to,
                !upgrade.is_noop(),
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn connect_and_migrate(location: &Location<'_>) -> DbResult<(Connection, SchemaUpgrade)> {
    let mut conn = location.connect()?;
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    let upgrade = migrate(&mut conn)?;
    Ok((conn, upgrade))
}
