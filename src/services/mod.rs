pub mod loader;
pub mod server;
pub mod summary;
pub mod transfer;
