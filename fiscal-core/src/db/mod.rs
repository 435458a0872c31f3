pub mod repository;

pub use repository::{FiscalRepository, RepositoryError};
