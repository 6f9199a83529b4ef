pub mod table;

pub use table::TableConfig;
