pub mod archive;
pub mod config;
pub mod error;
pub mod generate;
pub mod menu;
pub mod nutrislice;
pub mod plan;
pub mod render;
pub mod school;
pub mod source;
pub mod templates;

pub use error::{MenuError, Result};
