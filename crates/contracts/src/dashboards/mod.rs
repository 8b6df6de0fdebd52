pub mod d001_club_summary;
