//! Persistence implementations
//!
//! Three interchangeable backends for the `Dealership` and `ContractList`
//! traits: plain in-memory lists, pipe-delimited text resources, and SQLite.

mod file_contract_list;
mod file_dealership;
mod memory;
pub mod resource;
pub mod schema;
mod sqlite_contract_list;
mod sqlite_dealership;

pub use file_contract_list::FileBackedContractList;
pub use file_dealership::FileBackedDealership;
pub use memory::{InMemoryContractList, InMemoryDealership};
pub use resource::{FileResource, MemoryResource, TextResource, WriteMode, LINE_ENDING};
pub use schema::{open_database, open_memory};
pub use sqlite_contract_list::SqliteContractList;
pub use sqlite_dealership::SqliteDealership;
