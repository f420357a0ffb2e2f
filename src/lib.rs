#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]

pub mod config;
pub mod error;
pub mod logging;
pub mod simulation;
pub mod ui;

pub use error::{Error, Result};
