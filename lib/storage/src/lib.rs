pub mod artifacts;
pub mod bundle;
pub mod manager;

pub use artifacts::{ArtifactDescription, ArtifactStore};
pub use bundle::{load_bundle_from_path, BundleData, BundleManager};
pub use manager::{ModelInfo, ModelManager, ModelSource};
