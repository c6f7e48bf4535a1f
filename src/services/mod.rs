pub mod directory_service;
pub mod error;

pub use directory_service::DirectoryService;
pub use error::ServiceError;
