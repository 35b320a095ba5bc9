//! Domain layer - stage payload types and pure scoring logic

pub mod value_objects;
