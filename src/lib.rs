#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod remote;
pub mod session;
pub mod tools;

pub use config::Config;
pub use driver::RunDriver;
pub use session::SessionLoop;
