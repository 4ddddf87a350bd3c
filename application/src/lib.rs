pub mod receipt;
pub mod service;
pub mod transfer;
