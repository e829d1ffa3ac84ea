mod backend;
mod catalog;
mod codec;
mod config;
mod cql_type;
mod statement;
mod udt;
mod writer;

pub use backend::*;
pub use catalog::*;
pub use codec::*;
pub use config::*;
pub use cql_type::*;
pub use statement::*;
pub use udt::*;
pub use writer::*;
