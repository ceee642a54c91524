pub mod multiply;
pub mod report;
