pub mod date_filter;
pub mod file_size;
pub mod sort;
