mod blog;
mod gadgets;

pub use blog::blog;
pub use gadgets::gadgets;

use hull::{Database, Entity, Executor, Result, RowsAffected, SqlWriter, separated_by, writer};
use log::LevelFilter;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Runs every scenario against the executor.
pub fn execute_tests<Exec: Executor>(executor: Exec) {
    let mut db = Database::new(executor);
    blog(&mut db);
    gadgets(&mut db);
}

/// Inserts one entity as a single row, values rendered by the driver writer.
pub fn insert<E: Entity, Exec: Executor>(
    db: &mut Database<Exec>,
    entity: &E,
) -> Result<RowsAffected> {
    let writer = hull::Driver::sql_writer(db.executor().driver());
    let mut context = writer::Context::default();
    let mut query = String::with_capacity(128);
    query.push_str("INSERT INTO ");
    writer.write_identifier_quoted(&mut context, &mut query, E::table().name);
    query.push_str(" (");
    separated_by(
        &mut query,
        E::fields(),
        |out, v| writer.write_identifier_quoted(&mut context, out, v.name),
        ", ",
    );
    query.push_str(") VALUES (");
    separated_by(
        &mut query,
        entity.row().iter(),
        |out, v| writer.write_value(&mut context, out, v),
        ", ",
    );
    query.push_str(");");
    db.executor().execute(&query)
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
