pub mod geo;
pub mod jwt;
