use rusqlite::Connection;
use tracing::info;

use crate::error::{DbError, Result};

/// Create the schema. Safe to run against an already initialized file.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            nickname    TEXT NOT NULL,
            id          TEXT NOT NULL,
            active      INTEGER NOT NULL DEFAULT 0
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_nickname
            ON users(nickname);

        -- No foreign keys to users: pairing history survives deletion
        CREATE TABLE IF NOT EXISTS pairs (
            nickname1   TEXT NOT NULL,
            nickname2   TEXT NOT NULL,
            orderId     INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pairs_order
            ON pairs(orderId);

        CREATE TABLE IF NOT EXISTS deletedUsers (
            nickname    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS config (
            confirmationRequired INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
    .map_err(DbError::Migration)?;

    info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<String>>>()
            .unwrap()
    }

    #[test]
    fn creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        assert_eq!(
            table_names(&conn),
            vec!["config", "deletedUsers", "pairs", "users"]
        );
    }

    #[test]
    fn running_twice_is_harmless() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        conn.execute(
            "INSERT INTO users (nickname, id, active) VALUES ('alice', '1', 0)",
            [],
        )
        .unwrap();

        run(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn nickname_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        conn.execute("INSERT INTO users (nickname, id) VALUES ('alice', '1')", [])
            .unwrap();

        let dup = conn.execute("INSERT INTO users (nickname, id) VALUES ('alice', '2')", []);
        assert!(dup.is_err());
    }

    #[test]
    fn schema_errors_are_reported() {
        let conn = Connection::open_in_memory().unwrap();
        // An incompatible legacy table without the nickname column
        conn.execute_batch("CREATE TABLE users (name TEXT)").unwrap();

        let err = run(&conn).unwrap_err();
        assert!(matches!(err, DbError::Migration(_)));
    }
}
