pub mod geo;
pub mod money;
pub mod token;
