//! Criterion comparison of building SQL value objects and of single-row
//! lookups through raw `rusqlite` vs. the prepared statement pipeline.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use sql_integrated::prelude::*;
use sql_integrated::sqlite::rusqlite::{self, Connection, params};

fn lookup_row_count() -> usize {
    std::env::var("BENCH_ROWS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(1000)
}

fn seeded_connection(row_count: usize) -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT NOT NULL, score REAL);")?;
    {
        let mut insert = conn.prepare("INSERT INTO test (id, name, score) VALUES (?1, ?2, ?3)")?;
        for id in 1..=row_count as i64 {
            insert.execute(params![id, format!("name-{id}"), id as f64 * 0.5])?;
        }
    }
    Ok(conn)
}

fn bench_builders(c: &mut Criterion) {
    let mut group = c.benchmark_group("builders");
    for rows in [1usize, 16, 256] {
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("bound_batch", rows), &rows, |b, &rows| {
            b.iter(|| {
                let mut builder = BoundBatchSqlBuilder::new(3).expect("non-zero width");
                builder.append_single_sql("INSERT INTO test (id, name, score) VALUES (?, ?, ?)");
                for id in 0..rows as i64 {
                    builder
                        .append_batch_sql_parameters(sql_values![id, "n", 1.5])
                        .expect("row width matches");
                }
                black_box(builder.build().expect("batch builds"))
            });
        });
    }
    group.bench_function("bound_single", |b| {
        b.iter(|| {
            let sql = BoundSingleSqlBuilder::with_expected(2)
                .append_sql("UPDATE test SET name = ? ")
                .append_sql_fragment("WHERE id = ?", sql_values!["x", 7])
                .build()
                .expect("arity matches");
            black_box(sql)
        });
    });
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let row_count = lookup_row_count();
    let raw = seeded_connection(row_count).expect("seed sqlite");
    let conn = SqliteConnection::new(&raw);
    let mut ids: Vec<i64> = (1..=row_count as i64).collect();
    ids.shuffle(&mut ChaCha8Rng::seed_from_u64(1_234_567_890));
    let query = "SELECT id, name, score FROM test WHERE id = ?";

    let mut group = c.benchmark_group("single_row_lookup");
    group.throughput(Throughput::Elements(row_count as u64));

    group.bench_function("rusqlite", |b| {
        b.iter(|| {
            let mut stmt = raw.prepare_cached(query).expect("prepare");
            for &id in &ids {
                let name: String = stmt
                    .query_row([id], |row| row.get(1))
                    .expect("row exists");
                black_box(name);
            }
        });
    });

    group.bench_function("integrated", |b| {
        b.iter(|| {
            let mut stmt = PreparedIntegratedStatement::new(&conn);
            for &id in &ids {
                let sql = SingleSql::new(query, sql_values![id]);
                let rs = stmt.query(&sql, &CollectResultSet).expect("row exists");
                black_box(rs);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_builders, bench_lookup);
criterion_main!(benches);
