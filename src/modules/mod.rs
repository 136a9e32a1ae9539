pub mod books;

use catalog_kernel::{settings::Settings, ModuleRegistry};

/// Register all feature modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    registry.register(books::create_module(&settings.catalog));
}
