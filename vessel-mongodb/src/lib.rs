mod backend;
mod command;
mod config;
mod writer;

pub use backend::*;
pub use command::*;
pub use config::*;
pub use writer::*;
