pub mod db;
pub mod error;
pub mod pagination;
pub mod repository;
pub mod seed;
pub mod status;
pub mod types;
pub mod validation;
