pub mod clip;
pub mod creation;
pub mod modification;
pub mod query;
pub mod transform;
