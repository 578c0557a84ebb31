pub mod paths;
pub mod terminal;

pub use paths::{default_config_file, default_data_dir, format_path_with_tilde};
pub use terminal::strip_ansi_codes;
