pub mod db;
pub mod memory;

pub use db::PgReportStore;
pub use memory::MemoryReportStore;
