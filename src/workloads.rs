//! The benchmark workloads.
//!
//! Five call patterns against the same flat table: three insert strategies
//! (unprepared, transaction-wrapped, transaction + prepared statement) and
//! two update strategies (keyed on the declared TEXT primary key vs. keyed
//! on SQLite's implicit rowid). Every function returns the number of rows
//! it wrote so the runner can turn elapsed time into rows/second.

use rusqlite::{params, Connection};

use crate::config::BenchConfig;
use crate::error::Result;
use crate::rows::{RowGenerator, TestRow};

/// Create the benchmark table.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS test (
            key  TEXT,
            num1 REAL,
            num2 REAL,
            num3 REAL,
            num4 REAL,
            PRIMARY KEY (key)
        )",
        [],
    )?;
    Ok(())
}

/// Populate the table for the update workloads, using the fastest insert
/// strategy. Runs outside the timed section.
pub fn seed_for_updates(conn: &mut Connection, config: &BenchConfig) -> Result<()> {
    insert_txn_prepared(conn, config)?;
    Ok(())
}

/// Insert rows one statement at a time, each from a freshly formatted SQL
/// string, with no transaction. Every insert pays for its own journal
/// write, which is why this is the slow baseline.
pub fn insert_unprepared(conn: &mut Connection, config: &BenchConfig) -> Result<u64> {
    let mut gen = RowGenerator::new(config.seed);

    for i in 0..config.rows {
        let row = gen.bare(i);
        // Keys are plain integers here, so the quoting hazard of formatted
        // SQL does not bite; the point of this workload is the per-statement
        // parse and journal cost.
        let sql = format!(
            "INSERT INTO test (key, num1, num2, num3, num4) VALUES ('{}', {}, {}, {}, {})",
            row.key, row.num1, row.num2, row.num3, row.num4
        );
        conn.execute(&sql, [])?;
    }

    Ok(config.rows)
}

/// Same formatted SQL strings, but wrapped in a single transaction so the
/// per-row journal cost is amortized into one commit.
pub fn insert_txn(conn: &mut Connection, config: &BenchConfig) -> Result<u64> {
    let mut gen = RowGenerator::new(config.seed);
    let tx = conn.transaction()?;

    for i in 0..config.rows {
        let row = gen.prefixed(i);
        let sql = format!(
            "INSERT INTO test (key, num1, num2, num3, num4) VALUES ('{}', {}, {}, {}, {})",
            row.key, row.num1, row.num2, row.num3, row.num4
        );
        tx.execute(&sql, [])?;
    }

    tx.commit()?;
    Ok(config.rows)
}

/// One prepared statement compiled once and executed with bound parameters
/// for every row, inside a single transaction.
pub fn insert_txn_prepared(conn: &mut Connection, config: &BenchConfig) -> Result<u64> {
    let mut gen = RowGenerator::new(config.seed);
    let tx = conn.transaction()?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO test (key, num1, num2, num3, num4) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for i in 0..config.rows {
            let row = gen.prefixed(i);
            stmt.execute(params![row.key, row.num1, row.num2, row.num3, row.num4])?;
        }
    }

    tx.commit()?;
    Ok(config.rows)
}

/// Walk every row ordered by the declared primary key, bump the four
/// measurement columns, and write each row back through a prepared UPDATE
/// keyed on the primary key.
pub fn update_pk(conn: &mut Connection, _config: &BenchConfig) -> Result<u64> {
    let tx = conn.transaction()?;
    let mut updated = 0u64;

    {
        let mut sel = tx.prepare("SELECT key, num1, num2, num3, num4 FROM test ORDER BY key")?;
        let mut up = tx.prepare(
            "UPDATE test SET num1 = ?1, num2 = ?2, num3 = ?3, num4 = ?4 WHERE key = ?5",
        )?;

        let mut rows = sel.query([])?;
        while let Some(fetched) = rows.next()? {
            let mut row = TestRow {
                rowid: None,
                key: fetched.get(0)?,
                num1: fetched.get(1)?,
                num2: fetched.get(2)?,
                num3: fetched.get(3)?,
                num4: fetched.get(4)?,
            };
            row.bump();

            up.execute(params![row.num1, row.num2, row.num3, row.num4, row.key])?;
            updated += 1;
        }
    }

    tx.commit()?;
    Ok(updated)
}

/// Same rewrite as [`update_pk`], but the select and the UPDATE key on the
/// implicit `_rowid_`, skipping the TEXT primary key index lookup.
pub fn update_rowid(conn: &mut Connection, _config: &BenchConfig) -> Result<u64> {
    let tx = conn.transaction()?;
    let mut updated = 0u64;

    {
        let mut sel =
            tx.prepare("SELECT _rowid_, num1, num2, num3, num4 FROM test ORDER BY _rowid_")?;
        let mut up = tx.prepare(
            "UPDATE test SET num1 = ?1, num2 = ?2, num3 = ?3, num4 = ?4 WHERE _rowid_ = ?5",
        )?;

        let mut rows = sel.query([])?;
        while let Some(fetched) = rows.next()? {
            let mut row = TestRow {
                rowid: Some(fetched.get(0)?),
                key: String::new(),
                num1: fetched.get(1)?,
                num2: fetched.get(2)?,
                num3: fetched.get(3)?,
                num4: fetched.get(4)?,
            };
            row.bump();

            up.execute(params![row.num1, row.num2, row.num3, row.num4, row.rowid])?;
            updated += 1;
        }
    }

    tx.commit()?;
    Ok(updated)
}
