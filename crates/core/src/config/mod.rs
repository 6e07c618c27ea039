//! Project configuration: discovery, parsing and rewrite.

mod discovery;
mod model;
mod store;

pub use discovery::{
    discover_configuration, discover_source_root, resolve_output_dir, CONFIGURATION_FILE_NAMES,
    DEFAULT_OUT_DIR, SOURCE_DIR_NAME,
};
pub use model::Configuration;
pub use store::persist;
