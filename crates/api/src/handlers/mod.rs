pub mod generator;
pub mod item;
pub mod user;
