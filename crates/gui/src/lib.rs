// Library crate: exposes the guide tool and headless harness for integration tests
// and the JSON command interface. GUI-specific modules (app, ui, viewport painting)
// remain in the binary crate.

pub mod command;
pub mod fixtures;
pub mod guides;
pub mod harness;
pub mod state;

/// Camera and ray math shared by picking and the guide tool.
/// Painting and input routing stay in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod picking;
}
