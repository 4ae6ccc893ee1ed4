use crate::options::{ConfigOption, UserFilter};
use crate::{Database, Result};
use rusqlite::{Connection, OptionalExtension, Row};
use santa_types::{Config, DeletedUser, Pair, User};
use tracing::debug;

impl Database {
    // -- Config --

    /// Returns the config row, creating the default (confirmation disabled)
    /// on first use.
    pub fn get_config(&self) -> Result<Config> {
        self.with_conn("get_config", |conn| {
            ensure_config_row(conn)?;
            conn.query_row(
                "SELECT confirmationRequired FROM config ORDER BY rowid LIMIT 1",
                [],
                |row| {
                    Ok(Config {
                        confirmation_required: row.get(0)?,
                    })
                },
            )
        })
    }

    pub fn set_config_option(&self, option: ConfigOption, value: i64) -> Result<()> {
        self.with_conn_mut("set_config_option", |conn| {
            let tx = conn.transaction()?;
            ensure_config_row(&tx)?;
            tx.execute(option.update_sql(), [value])?;
            tx.commit()
        })?;

        debug!("Config option {} set to {}", option, value);
        Ok(())
    }

    pub fn set_confirmation_required(&self, required: bool) -> Result<()> {
        self.set_config_option(ConfigOption::ConfirmationRequired, i64::from(required))
    }

    // -- Users --

    pub fn get_all_users(&self, filter: UserFilter) -> Result<Vec<User>> {
        self.with_conn("get_all_users", |conn| {
            let mut stmt = conn.prepare(filter.select_sql())?;
            let rows = stmt
                .query_map([], user_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    pub fn get_user(&self, nickname: &str) -> Result<Option<User>> {
        self.with_conn("get_user", |conn| {
            conn.query_row(
                "SELECT nickname, id, active FROM users WHERE nickname = ?1",
                [nickname],
                user_from_row,
            )
            .optional()
        })
    }

    /// Register a user. Returns false (and changes nothing) when the
    /// nickname is already taken.
    pub fn add_user(&self, nickname: &str, id: &str, active: bool) -> Result<bool> {
        let inserted = self.with_conn("add_user", |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO users (nickname, id, active) VALUES (?1, ?2, ?3)",
                (nickname, id, active),
            )
        })?;

        if inserted > 0 {
            debug!("User {} added", nickname);
        }
        Ok(inserted > 0)
    }

    /// Mark a user active. Unknown nicknames are ignored; returns whether a
    /// row matched.
    pub fn confirm_user(&self, nickname: &str) -> Result<bool> {
        let updated = self.with_conn("confirm_user", |conn| {
            conn.execute("UPDATE users SET active = 1 WHERE nickname = ?1", [nickname])
        })?;

        debug!("User {} confirmed ({} rows)", nickname, updated);
        Ok(updated > 0)
    }

    /// Deactivate every user ahead of a new round.
    pub fn reset_users(&self) -> Result<usize> {
        let updated =
            self.with_conn("reset_users", |conn| conn.execute("UPDATE users SET active = 0", []))?;

        debug!("Reset {} users", updated);
        Ok(updated)
    }

    /// Remove a user and record the nickname in the deletion log, atomically.
    /// Unknown nicknames are a no-op and leave the log untouched.
    pub fn delete_user(&self, nickname: &str) -> Result<bool> {
        let removed = self.with_conn_mut("delete_user", |conn| {
            let tx = conn.transaction()?;
            let removed = tx.execute("DELETE FROM users WHERE nickname = ?1", [nickname])?;
            if removed == 0 {
                return Ok(0);
            }
            tx.execute("INSERT INTO deletedUsers (nickname) VALUES (?1)", [nickname])?;
            tx.commit()?;
            Ok(removed)
        })?;

        debug!("User {} deleted ({} rows)", nickname, removed);
        Ok(removed > 0)
    }

    pub fn get_all_deleted_users(&self) -> Result<Vec<DeletedUser>> {
        self.with_conn("get_all_deleted_users", |conn| {
            let mut stmt = conn.prepare("SELECT nickname FROM deletedUsers ORDER BY rowid")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(DeletedUser {
                        nickname: row.get(0)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    // -- Pairs --

    /// All pairs, or only those of one round.
    pub fn get_all_pairs(&self, order_id: Option<i64>) -> Result<Vec<Pair>> {
        self.with_conn("get_all_pairs", |conn| query_pairs(conn, order_id))
    }

    /// Highest round id so far, 0 if nothing has been paired yet.
    pub fn get_last_pair_order_id(&self) -> Result<i64> {
        self.with_conn("get_last_pair_order_id", |conn| {
            conn.query_row("SELECT COALESCE(MAX(orderId), 0) FROM pairs", [], |row| {
                row.get(0)
            })
        })
    }

    pub fn next_pair_order_id(&self) -> Result<i64> {
        Ok(self.get_last_pair_order_id()? + 1)
    }

    pub fn add_pair(&self, nickname1: &str, nickname2: &str, order_id: i64) -> Result<()> {
        self.with_conn("add_pair", |conn| {
            conn.execute(
                "INSERT INTO pairs (nickname1, nickname2, orderId) VALUES (?1, ?2, ?3)",
                (nickname1, nickname2, order_id),
            )
        })?;

        debug!("Pair {} -> {} added to round {}", nickname1, nickname2, order_id);
        Ok(())
    }

    /// Store a whole round in one transaction: either every pair lands or none do.
    pub fn add_pairs<S: AsRef<str>>(&self, pairs: &[(S, S)], order_id: i64) -> Result<usize> {
        let inserted = self.with_conn_mut("add_pairs", |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO pairs (nickname1, nickname2, orderId) VALUES (?1, ?2, ?3)",
                )?;
                for (giver, receiver) in pairs {
                    let (giver, receiver): (&str, &str) = (giver.as_ref(), receiver.as_ref());
                    stmt.execute((giver, receiver, order_id))?;
                }
            }
            tx.commit()?;
            Ok(pairs.len())
        })?;

        debug!("Round {}: {} pairs added", order_id, inserted);
        Ok(inserted)
    }
}

fn ensure_config_row(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO config (confirmationRequired)
         SELECT 0 WHERE NOT EXISTS (SELECT 1 FROM config)",
        [],
    )?;
    Ok(())
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        nickname: row.get(0)?,
        id: row.get(1)?,
        active: row.get(2)?,
    })
}

fn pair_from_row(row: &Row<'_>) -> rusqlite::Result<Pair> {
    Ok(Pair {
        nickname1: row.get(0)?,
        nickname2: row.get(1)?,
        order_id: row.get(2)?,
    })
}

fn query_pairs(conn: &Connection, order_id: Option<i64>) -> rusqlite::Result<Vec<Pair>> {
    match order_id {
        Some(order_id) => {
            let mut stmt = conn.prepare(
                "SELECT nickname1, nickname2, orderId FROM pairs WHERE orderId = ?1 ORDER BY rowid",
            )?;
            stmt.query_map([order_id], pair_from_row)?.collect()
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT nickname1, nickname2, orderId FROM pairs ORDER BY rowid")?;
            stmt.query_map([], pair_from_row)?.collect()
        }
    }
}
