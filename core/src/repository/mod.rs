pub mod document;
pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use document::{DocumentBackend, StoreDocument};
pub use file::FileRepository;
pub use memory::MemoryRepository;
pub use traits::{CatalogRepository, ScheduleRepository};
