pub mod script_loader;

pub use script_loader::{list_script_files, load_all_scripts};
