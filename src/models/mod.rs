pub mod row;
pub mod workout;

pub use row::{HEADERS, SheetRow, ToSheetRow};
pub use workout::Workout;
