pub mod assets;
pub mod spots;
