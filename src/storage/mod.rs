pub mod identity;
pub mod local;
pub mod resolver;

pub use identity::FileIdentity;
pub use local::LocalStorage;
pub use resolver::{StorageReader, StorageResolver, StorageWriter};
