pub mod environment;
pub mod paths;

pub use environment::{STORE_ENV, default_store_path};
pub use paths::{MAX_PATH_LEN, format_path_with_tilde, validate_entry_name, validate_path_len};
