pub mod file;
pub mod repository;

pub use file::{Document, Store, StoreError};
pub use repository::{Owned, Record, Repository};
