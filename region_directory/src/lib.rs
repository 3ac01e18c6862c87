pub mod cache;
pub mod contracts;
pub mod data_transfer;
mod error;

pub use contracts::RegionDirectory;
pub use error::DirectoryError;
