pub mod actions;
pub mod assertions;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::{received_types, MessageAssertion};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
