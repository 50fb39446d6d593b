pub mod config;
pub mod request;
pub mod todo;

pub use config::*;
pub use request::*;
pub use todo::*;
