pub mod budget;
pub mod dashboard;
pub mod settings;
pub mod suggestion;
pub mod todo;

pub use budget::*;
pub use dashboard::*;
pub use settings::*;
pub use suggestion::*;
pub use todo::*;
