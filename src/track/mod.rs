mod load;
mod model;

pub use load::{BoardSource, collect_board};
pub use model::{BubbleSeed, Company, CompanyBoard, EventKind, LoggedEvent};
