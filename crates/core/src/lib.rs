pub mod config;
pub mod error;
pub mod logging;

pub mod emit;
pub mod fetch;
pub mod indexing;
pub mod model;
pub mod parser;
pub mod plan;
pub mod project;
pub mod reconcile;
pub mod resolver;
pub mod vendor;

pub use error::{ObjgenError, Result};
