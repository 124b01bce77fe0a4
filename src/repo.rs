mod contacts;

pub use contacts::{ContactStore, MemoryContactStore, PgContactStore};
