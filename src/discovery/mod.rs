//! Input discovery: single files, directories, and zip archives inside them

pub mod input_files;
pub mod unzip;

pub use input_files::{is_zip_name, list_input_files, stat_input_file};
pub use unzip::{expand_archives, extract_archive};
