mod file_catalog;
mod memory_catalog;

pub use file_catalog::FileBusinessCatalog;
pub use memory_catalog::InMemoryBusinessCatalog;
