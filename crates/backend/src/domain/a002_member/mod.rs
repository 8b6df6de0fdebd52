pub mod membership_sync;
pub mod repository;
pub mod service;
