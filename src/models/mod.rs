pub mod loaders;
pub mod scenario;

pub use loaders::{list_script_files, load_all_scripts};
pub use scenario::Scenario;
