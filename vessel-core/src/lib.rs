mod backend;
mod codec;
mod condition;
mod config;
mod entity;
mod error;
mod field;
mod json;
mod query;
mod sort;
mod translator;
mod util;
mod value;

pub use ::anyhow::Context;
pub use backend::*;
pub use codec::*;
pub use condition::*;
pub use config::*;
pub use entity::*;
pub use error::*;
pub use field::*;
pub use json::*;
pub use query::*;
pub use sort::*;
pub use translator::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
