pub mod command;
pub mod error;
pub mod executor;
pub mod io;
pub mod parser;
pub mod paths;
pub mod segment;
pub mod serializer;
pub mod store;

pub use error::{LalError, Result};
pub use store::{AliasNode, AliasStore, AppendOutcome};
