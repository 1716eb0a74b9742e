pub mod departments;
pub mod employees;

use roster_kernel::ModuleRegistry;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(departments::create_module());
    registry.register(employees::create_module());
}
