mod as_value;
mod column;
mod connection;
mod database;
mod driver;
mod entity;
mod error;
mod executor;
mod expression;
mod hydrate;
mod query;
mod registry;
mod relations;
mod row;
mod state;
mod table;
mod util;
mod value;
pub mod writer;

pub use ::anyhow::Context;
pub use as_value::*;
pub use column::*;
pub use connection::*;
pub use database::*;
pub use driver::*;
pub use entity::*;
pub use error::*;
pub use executor::*;
pub use expression::*;
pub use hydrate::*;
pub use query::*;
pub use registry::*;
pub use relations::*;
pub use row::*;
pub use state::*;
pub use table::*;
pub use util::*;
pub use value::*;
pub use writer::{GenericSqlWriter, SqlWriter};

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
