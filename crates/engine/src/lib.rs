#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;
pub mod poll;
pub mod quiz;

pub use error::{Error, Result};
