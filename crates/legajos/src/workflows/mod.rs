pub mod field;
pub mod personnel;
pub mod probation;
pub mod spreadsheet;
