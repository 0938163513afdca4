//! Shared fixtures for integration tests

#![allow(dead_code)]

use taproom::db::Database;

pub const OWNER_ID: i64 = 1;
pub const BOB_ID: i64 = 2;
pub const CAROL_ID: i64 = 3;
pub const JO_ID: i64 = 5;

/// Fresh in-memory database with all tables created.
pub async fn empty_db() -> Database {
    let db = Database::in_memory().await.expect("in-memory database");
    let sync = db.sync_schema().await;
    assert!(sync.errors.is_empty(), "schema sync errors: {:?}", sync.errors);
    db
}

/// A small venue graph:
///
/// - owner (1) owns pub 10 with locations 20 and 21, and tables 30 (at 20) and 31 (at 21)
/// - bob (2) and carol (3) reserved table 30; owner reserved table 31
/// - owner is friends with bob and carol; bob is friends with owner
/// - jo-prefixed accounts with mixed statuses for search
pub async fn seeded_db() -> Database {
    let db = empty_db().await;
    let statements = [
        "INSERT INTO users (id, email, password_hash, first_name, last_name, status) VALUES
            (1, 'owner@x.com', '$argon2id$v=19$abc', 'Olive', 'Owner', 'owner'),
            (2, 'bob@x.com', NULL, 'Bob', NULL, 'client'),
            (3, 'carol@x.com', '$argon2id$v=19$def', 'Carol', NULL, 'client'),
            (4, 'joan@x.com', NULL, 'Joan', NULL, 'client'),
            (5, 'jo@x.com', NULL, 'Jo', NULL, 'client'),
            (6, 'john@x.com', NULL, 'John', NULL, 'owner'),
            (7, 'josh@x.com', NULL, 'Josh', NULL, 'admin'),
            (8, 'Jody@x.com', NULL, 'Jody', NULL, 'client'),
            (9, 'jolene@x.com', NULL, 'Jolene', NULL, 'client')",
        "INSERT INTO notifications (id, user_id, title, message, read) VALUES
            (100, 1, 'New booking', 'Bob booked table A', 0),
            (101, 1, 'New review', 'Someone reviewed your pub', 1),
            (102, 2, 'Confirmed', 'Your booking is confirmed', 0)",
        "INSERT INTO friends (id, user_id, friend_id) VALUES
            (200, 1, 2),
            (201, 1, 3),
            (202, 2, 1)",
        "INSERT INTO pubs (id, owner_id, name, description) VALUES
            (10, 1, 'The Crown', 'Real ale since 1820')",
        "INSERT INTO locations (id, pub_id, name, address) VALUES
            (20, 10, 'Bar', '1 High St'),
            (21, 10, 'Garden', NULL)",
        "INSERT INTO tables (id, location_id, owner_id, label, seats) VALUES
            (30, 20, 1, 'A', 4),
            (31, 21, 1, 'B', 6)",
        "INSERT INTO reservations (id, user_id, table_id, pub_id, location_id, starts_at, party_size) VALUES
            (40, 2, 30, 10, 20, '2026-11-01 19:00:00', 2),
            (41, 1, 31, 10, 21, '2026-11-02 18:30:00', 5),
            (42, 3, 30, 10, 20, '2026-11-03 20:00:00', 3)",
        "INSERT INTO reviews (id, user_id, pub_id, rating, comment) VALUES
            (50, 1, 10, 5, 'Biased, but great')",
    ];
    for sql in statements {
        sqlx::query(sql)
            .execute(db.pool())
            .await
            .unwrap_or_else(|e| panic!("seed failed: {e}\n{sql}"));
    }
    db
}

/// Drop `table` so lookups against it fail.
///
/// Foreign key enforcement is switched off first; with it on, SQLite refuses to drop a
/// parent table whose rows are still referenced. The in-memory pool holds one
/// connection, so the pragma applies to every later query.
pub async fn drop_table(db: &Database, table: &str) {
    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(db.pool())
        .await
        .expect("disable foreign keys");
    sqlx::query(&format!("DROP TABLE {table}"))
        .execute(db.pool())
        .await
        .unwrap_or_else(|e| panic!("drop {table} failed: {e}"));
}
