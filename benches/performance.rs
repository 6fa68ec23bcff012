use criterion::{criterion_group, criterion_main, Criterion};
use tetrisdb::{
    resolve, Atom, AttrKind, Attribute, Database, EngineConfig, Schema, TetrisJoin, Tuple,
};

fn schema(names: &[&str]) -> Schema {
    Schema::new(
        names
            .iter()
            .map(|n| Attribute::new(*n, AttrKind::Int, 2))
            .collect(),
    )
}

fn make_db(rows: u64) -> Database {
    let mut db = Database::new(EngineConfig {
        seed: Some(7),
        ..EngineConfig::default()
    });
    db.create_relation("r", schema(&["a", "b"])).unwrap();
    db.create_relation("s", schema(&["b", "c"])).unwrap();
    for i in 0..rows {
        db.relation_mut("r")
            .unwrap()
            .insert(Tuple::from_u64s(&[i * 3 % 4096, i * 7 % 4096]))
            .unwrap();
        db.relation_mut("s")
            .unwrap()
            .insert(Tuple::from_u64s(&[i * 7 % 4096, i * 11 % 4096]))
            .unwrap();
    }
    db
}

fn bench_relation_insert(c: &mut Criterion) {
    c.bench_function("relation_insert_1k", |b| {
        b.iter(|| {
            let mut db = Database::new(EngineConfig {
                seed: Some(7),
                ..EngineConfig::default()
            });
            db.create_relation("r", schema(&["a", "b"])).unwrap();
            let r = db.relation_mut("r").unwrap();
            for i in 0u64..1024 {
                r.insert(Tuple::from_u64s(&[i * 3 % 4096, i * 7 % 4096]))
                    .unwrap();
            }
        })
    });
}

fn bench_two_atom_join(c: &mut Criterion) {
    let db = make_db(256);
    let body = vec![
        Atom::positional("r", &["a", "b"]),
        Atom::positional("s", &["b", "c"]),
    ];
    c.bench_function("two_atom_join_256", |b| {
        b.iter(|| {
            let (atoms, vars) = resolve(&db, &body).unwrap();
            let _ = TetrisJoin::new(db.config().clone())
                .execute(&atoms, &vars)
                .unwrap();
        })
    });
}

fn bench_gap_inference(c: &mut Criterion) {
    let db = make_db(1024);
    let r = db.relation("r").unwrap();
    let probe = Tuple::from_u64s(&[1000, 1000]);
    c.bench_function("gap_inference", |b| {
        b.iter(|| {
            let _ = r.gaps(&probe).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_relation_insert,
    bench_two_atom_join,
    bench_gap_inference
);
criterion_main!(benches);
