use crate::insert;
use hull::{Database, Entity, Executor, ExpressionExt, Order, Status, col};
use indoc::indoc;
use std::sync::Mutex;
use time::{PrimitiveDateTime, macros::datetime};
use uuid::Uuid;

#[derive(Entity, Debug, Clone, PartialEq)]
#[hull(name = "gadgets")]
struct Gadget {
    #[hull(primary_key)]
    code: String,
    active: bool,
    weight: f64,
    note: Option<String>,
    serial: Uuid,
    #[hull(name = "created_at")]
    created: Option<PrimitiveDateTime>,
    payload: Vec<u8>,
    status: Status,
}

pub fn gadgets<Exec: Executor>(db: &mut Database<Exec>) {
    static MUTEX: Mutex<()> = Mutex::new(());
    let _lock = MUTEX.lock().unwrap();

    // Setup
    db.register::<Gadget>().expect("Failed to register Gadget");
    db.executor()
        .execute(indoc! {r#"
            DROP TABLE IF EXISTS "gadgets";
            CREATE TABLE "gadgets" (
                "code" TEXT PRIMARY KEY,
                "active" BOOLEAN NOT NULL,
                "weight" REAL NOT NULL,
                "note" TEXT,
                "serial" TEXT NOT NULL,
                "created_at" TEXT NOT NULL,
                "payload" BLOB NOT NULL
            );
        "#})
        .expect("Failed to create the gadgets table");
    let mut expected = vec![
        Gadget {
            code: "A-1".into(),
            active: true,
            weight: 1.5,
            note: Some("It's fragile".into()),
            serial: Uuid::parse_str("5e915574-bb30-4430-98cf-c5854f61fbbd").unwrap(),
            created: Some(datetime!(2025-01-02 03:04:05)),
            payload: vec![0x00, 0xAB, 0xFF],
            status: Status::New,
        },
        Gadget {
            code: "B-2".into(),
            active: false,
            weight: 250.25,
            note: None,
            serial: Uuid::parse_str("a2f4c0de-1b7e-4c3a-9d2e-0f1e2d3c4b5a").unwrap(),
            created: Some(datetime!(2024-12-31 23:59:59.5)),
            payload: vec![],
            status: Status::New,
        },
    ];
    for gadget in &expected {
        let affected = insert(db, gadget).expect("Failed to insert a gadget");
        assert_eq!(affected.rows_affected, 1);
    }

    // Every value survives the trip through the backend
    let gadgets = db
        .query::<Gadget>()
        .order_by("code", Order::ASC)
        .to_list(None)
        .expect("Failed to list the gadgets");
    for gadget in &mut expected {
        gadget.status = Status::Fetched;
    }
    assert_eq!(gadgets, expected);

    let gadget = db
        .query::<Gadget>()
        .filter(col("active").equal(false))
        .first()
        .expect("Failed to query the inactive gadgets")
        .expect("Expected an inactive gadget");
    assert_eq!(gadget.code, "B-2");
    let gadget = db
        .query::<Gadget>()
        .filter(col("payload").equal(vec![0x00u8, 0xAB, 0xFF]))
        .first()
        .expect("Failed to query by payload")
        .expect("Expected a gadget with the payload");
    assert_eq!(gadget.code, "A-1");
    let count = db
        .query::<Gadget>()
        .filter(
            col("note")
                .is_not_null()
                .and(col("weight").less(2).or(col("active").equal(false))),
        )
        .count()
        .expect("Failed to count the gadgets");
    assert_eq!(count, 1);
    let heaviest: f64 = db
        .query::<Gadget>()
        .max("weight")
        .expect("Failed to find the heaviest gadget");
    assert_eq!(heaviest, 250.25);
    let removed = db
        .query::<Gadget>()
        .remove()
        .expect("Failed to remove the gadgets");
    assert_eq!(removed, 2);
}
