pub mod budget;
pub mod dashboard;
pub mod todo;
