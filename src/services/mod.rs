pub mod budget_store;
pub mod clock;
pub mod geometry;
pub mod overdue;
pub mod pie_chart;
pub mod scheduler;
pub mod suggestion;
pub mod time_source;
pub mod todo_store;
