extern crate byteorder;

#[macro_use]
extern crate log;
extern crate env_logger;

#[macro_use]
extern crate more_asserts;

extern crate thiserror;

pub mod common;

#[macro_use]
pub mod utils;

pub mod config;
pub mod errors;

pub mod vm;

pub use crate::config::{Config, Overflow};
pub use crate::errors::{Error, Fault, Result};
pub use crate::vm::program::Program;
pub use crate::vm::{State, VM};
