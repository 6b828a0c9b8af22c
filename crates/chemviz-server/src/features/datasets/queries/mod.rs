pub mod get;
pub mod history;
pub mod report;

pub use get::GetDatasetQuery;
pub use history::HistoryQuery;
pub use report::ReportQuery;
