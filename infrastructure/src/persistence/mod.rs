pub mod in_memory_repository;

// Re-export the repository type
pub use in_memory_repository::InMemoryDocumentRepository;
