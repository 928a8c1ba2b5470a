pub mod loader;

pub use loader::{load, load_path, validate_upload};
