pub mod json_file;
pub mod memory;
pub mod traits;


pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;
pub use traits::{ListingEdit, ListingRepository};
