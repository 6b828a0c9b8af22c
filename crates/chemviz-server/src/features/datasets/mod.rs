pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::UploadDatasetCommand;
pub use queries::{GetDatasetQuery, HistoryQuery, ReportQuery};
pub use routes::datasets_routes;
