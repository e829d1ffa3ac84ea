mod backend;
mod config;
mod request;
mod writer;

pub use backend::*;
pub use config::*;
pub use request::*;
pub use writer::*;
