pub mod spots;
