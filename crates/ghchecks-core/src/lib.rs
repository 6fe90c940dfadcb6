pub mod arn;
pub mod config;
pub mod env;
pub mod error;
pub mod io;
pub mod schedule;
pub mod secrets;
pub mod stack;
pub mod template;

pub use error::{Result, StackError};
