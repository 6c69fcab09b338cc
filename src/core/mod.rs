pub mod error;

pub use error::{PersistError, Result};
