pub mod place;
pub mod region;
