pub mod category;
pub mod repository;
pub mod task;
