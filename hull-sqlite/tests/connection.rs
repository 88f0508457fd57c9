#[cfg(test)]
mod tests {
    use hull::{Connection, Executor};
    use hull_sqlite::SqliteConnection;
    use hull_tests::{init_logs, silent_logs};
    use std::{
        fs,
        path::Path,
        sync::Mutex,
        time::{Duration, Instant},
    };

    static MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn create_database() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        SqliteConnection::connect(&format!("sqlite://{}?mode=rwc", DB_PATH))
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        SqliteConnection::connect(&format!("sqlite://{}?mode=ro", DB_PATH))
            .expect("Could not open the database");
        fs::remove_file(DB_PATH)
            .expect(format!("Failed to remove existing test database file {}", DB_PATH).as_str());
        silent_logs! {
            assert!(
                SqliteConnection::connect(&format!("sqlite://{}?mode=ro", DB_PATH)).is_err(),
                "Should not be able to open in read only unexisting database"
            );
        }
    }

    #[test]
    fn wrong_url() {
        silent_logs! {
            assert!(SqliteConnection::connect("postgres://some_value").is_err());
        };
    }

    #[test]
    fn locked_database() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/locked.sqlite";
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH).expect("Failed to remove the locked database file");
        }
        let url = format!("sqlite://{}?mode=rwc", DB_PATH);
        let mut holder = SqliteConnection::connect(&url).expect("Could not open the database");
        holder
            .execute("CREATE TABLE counter (v INTEGER); BEGIN EXCLUSIVE; INSERT INTO counter VALUES (1);")
            .expect("Could not lock the database");
        let mut waiter = SqliteConnection::connect(&url).expect("Could not open the database");
        waiter
            .set_busy_timeout(Duration::from_millis(50))
            .expect("Could not set the busy timeout");
        let start = Instant::now();
        silent_logs! {
            assert!(
                waiter.execute("INSERT INTO counter VALUES (2);").is_err(),
                "The database is locked by another connection"
            );
        }
        assert!(start.elapsed() < Duration::from_secs(2));
        holder.execute("COMMIT;").expect("Could not commit");
        let result = waiter
            .execute("INSERT INTO counter VALUES (2);")
            .expect("The lock was released");
        assert_eq!(result.rows_affected, 1);
        drop(holder);
        drop(waiter);
        fs::remove_file(DB_PATH).expect("Failed to remove the locked database file");
    }
}
