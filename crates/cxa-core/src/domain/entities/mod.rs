pub mod addon_selection;
pub mod manifest;
pub mod stage;
pub mod template;

pub use addon_selection::AddonSelection;
pub use manifest::{CombinedManifest, DependencySpec, Manifest, ProjectManifest, Scripts};
pub use stage::InitStage;
pub use template::{ADDONS_DIR, FILES_DIR, MANIFEST_FILE, TemplateDescriptor};
