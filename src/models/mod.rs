pub mod group;
pub mod seed;

pub use group::*;
pub use seed::default_groups;
