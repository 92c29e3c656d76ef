pub mod storage;
pub mod store;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{AddOutcome, InterestStore, INTEREST_KEY};
