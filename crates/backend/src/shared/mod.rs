pub mod config;
pub mod data;
pub mod error;
pub mod mail;
pub mod request;
#[cfg(test)]
pub mod test_support;
