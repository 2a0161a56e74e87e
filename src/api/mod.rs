pub mod extract;

pub use extract::{Body, RecordId};
