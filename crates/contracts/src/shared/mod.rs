pub mod envelope;
pub mod paging;
