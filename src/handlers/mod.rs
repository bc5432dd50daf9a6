pub mod admin;
pub mod zones;
