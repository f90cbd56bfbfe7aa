pub mod profile;
pub mod project;

pub use profile::*;
pub use project::*;
