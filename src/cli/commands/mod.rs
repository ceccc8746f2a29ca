pub mod backup;
pub mod config;
pub mod expense;
pub mod roommate;
pub mod settlement;
pub mod summary;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        system::definitions(),
        roommate::definitions(),
        expense::definitions(),
        settlement::definitions(),
        summary::definitions(),
        backup::definitions(),
        config::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}
