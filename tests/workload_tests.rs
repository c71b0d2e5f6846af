use std::collections::BTreeMap;

use rusqlite::Connection;
use sqlperf::config::{BenchConfig, DbLocation};
use sqlperf::{workloads, Result};

fn test_config(rows: u64) -> BenchConfig {
    BenchConfig {
        rows,
        location: DbLocation::Memory,
        seed: Some(7),
        ..Default::default()
    }
}

fn fresh_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    workloads::create_schema(&conn)?;
    Ok(conn)
}

fn row_count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM test", [], |row| row.get(0))?)
}

fn distinct_key_count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(DISTINCT key) FROM test", [], |row| row.get(0))?)
}

fn snapshot(conn: &Connection) -> Result<BTreeMap<String, [f64; 4]>> {
    let mut stmt = conn.prepare("SELECT key, num1, num2, num3, num4 FROM test")?;
    let mut rows = stmt.query([])?;
    let mut result = BTreeMap::new();
    while let Some(row) = rows.next()? {
        result.insert(
            row.get::<_, String>(0)?,
            [row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?],
        );
    }
    Ok(result)
}

#[test]
fn insert_unprepared_writes_every_row() -> Result<()> {
    let config = test_config(25);
    let mut conn = fresh_db()?;

    let written = workloads::insert_unprepared(&mut conn, &config)?;

    assert_eq!(written, 25);
    assert_eq!(row_count(&conn)?, 25);
    assert_eq!(distinct_key_count(&conn)?, 25);

    // Bare numeric keys on this path
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM test WHERE key = '0'", [], |r| r.get(0))?;
    assert_eq!(n, 1);
    Ok(())
}

#[test]
fn insert_txn_writes_every_row() -> Result<()> {
    let config = test_config(25);
    let mut conn = fresh_db()?;

    let written = workloads::insert_txn(&mut conn, &config)?;

    assert_eq!(written, 25);
    assert_eq!(row_count(&conn)?, 25);
    assert_eq!(distinct_key_count(&conn)?, 25);

    // Prefixed keys on the transactional paths
    let n: i64 =
        conn.query_row("SELECT COUNT(*) FROM test WHERE key = 'K-0'", [], |r| r.get(0))?;
    assert_eq!(n, 1);
    Ok(())
}

#[test]
fn insert_txn_prepared_writes_every_row() -> Result<()> {
    let config = test_config(25);
    let mut conn = fresh_db()?;

    let written = workloads::insert_txn_prepared(&mut conn, &config)?;

    assert_eq!(written, 25);
    assert_eq!(row_count(&conn)?, 25);
    assert_eq!(distinct_key_count(&conn)?, 25);
    Ok(())
}

#[test]
fn transactional_insert_paths_write_identical_tables() -> Result<()> {
    let config = test_config(40);

    let mut plain = fresh_db()?;
    workloads::insert_txn(&mut plain, &config)?;

    let mut prepared = fresh_db()?;
    workloads::insert_txn_prepared(&mut prepared, &config)?;

    // Same seed, same key format, same value stream
    assert_eq!(snapshot(&plain)?, snapshot(&prepared)?);
    Ok(())
}

#[test]
fn update_pk_bumps_every_column_by_one() -> Result<()> {
    let config = test_config(30);
    let mut conn = fresh_db()?;
    workloads::seed_for_updates(&mut conn, &config)?;

    let before = snapshot(&conn)?;
    let updated = workloads::update_pk(&mut conn, &config)?;
    let after = snapshot(&conn)?;

    assert_eq!(updated, 30);
    assert_eq!(before.len(), after.len());
    for (key, old) in &before {
        let new = &after[key];
        for i in 0..4 {
            assert!(
                (new[i] - old[i] - 1.0).abs() < 1e-9,
                "column {} of key {} not bumped: {} -> {}",
                i + 1,
                key,
                old[i],
                new[i]
            );
        }
    }
    Ok(())
}

#[test]
fn update_rowid_matches_update_pk() -> Result<()> {
    let config = test_config(30);

    let mut by_pk = fresh_db()?;
    workloads::seed_for_updates(&mut by_pk, &config)?;
    let updated_pk = workloads::update_pk(&mut by_pk, &config)?;

    let mut by_rowid = fresh_db()?;
    workloads::seed_for_updates(&mut by_rowid, &config)?;
    let updated_rowid = workloads::update_rowid(&mut by_rowid, &config)?;

    assert_eq!(updated_pk, updated_rowid);
    assert_eq!(snapshot(&by_pk)?, snapshot(&by_rowid)?);
    Ok(())
}

#[test]
fn primary_key_rejects_duplicate_keys() -> Result<()> {
    let conn = fresh_db()?;

    conn.execute(
        "INSERT INTO test (key, num1, num2, num3, num4) VALUES ('K-0', 1.0, 2.0, 3.0, 4.0)",
        [],
    )?;
    let dup = conn.execute(
        "INSERT INTO test (key, num1, num2, num3, num4) VALUES ('K-0', 5.0, 6.0, 7.0, 8.0)",
        [],
    );

    assert!(dup.is_err());
    Ok(())
}
