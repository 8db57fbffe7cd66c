//! Session-store client: OTP lookup and login-flag reset
//!
//! The suite consumes exactly two logical operations against the backing
//! store. Both statements are parameterized; the store location comes from
//! configuration, never from source.

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::types::{MobileNumber, Otp};

/// Client for the backing session store.
#[derive(Clone)]
pub struct SessionStore {
    conn: Arc<Mutex<Connection>>,
}

impl SessionStore {
    /// Open the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        info!("opened session store at {:?}", path.as_ref());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Expose the underlying connection for fixtures that manage rows
    /// themselves.
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    /// Create the user table. The deployed store owns its schema; this exists
    /// for in-memory and scratch fixtures.
    pub fn init_schema(&self) -> Result<()> {
        self.conn.lock().execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS user_mstr (
                mobile_no TEXT PRIMARY KEY,
                otp TEXT,
                is_logged_in INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )?;
        debug!("session store schema initialized");
        Ok(())
    }

    /// Look up the current one-time code for `mobile`.
    ///
    /// `Ok(None)` means no matching record (or no code on file); transport
    /// and query failures surface as `Error::Database`. The two must stay
    /// distinguishable at the call site.
    pub fn fetch_otp(&self, mobile: &MobileNumber) -> Result<Option<Otp>> {
        let conn = self.conn.lock();
        let raw: Option<Option<String>> = conn
            .query_row(
                "SELECT otp FROM user_mstr WHERE mobile_no = ?1",
                params![mobile.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match raw.flatten() {
            Some(value) => {
                debug!(mobile = %mobile, "fetched one-time code");
                Ok(Some(Otp::new(value)?))
            }
            None => Ok(None),
        }
    }

    /// Clear the logged-in flag for `mobile`.
    ///
    /// Idempotent: zero affected rows is a success, so teardown can call this
    /// unconditionally whether or not a session was ever established.
    pub fn reset_login_flag(&self, mobile: &MobileNumber) -> Result<usize> {
        let conn = self.conn.lock();
        let rows = conn.execute(
            "UPDATE user_mstr SET is_logged_in = 0 WHERE mobile_no = ?1",
            params![mobile.as_str()],
        )?;
        if rows > 0 {
            info!(mobile = %mobile, rows, "login flag reset");
        } else {
            debug!(mobile = %mobile, "no session row to reset");
        }
        Ok(rows)
    }
}
