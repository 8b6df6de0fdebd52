// Aggregate handlers
pub mod a001_store;
pub mod a002_member;

// Dashboard handlers
pub mod d001_club_summary;
