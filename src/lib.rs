pub mod geo;
pub mod read;
