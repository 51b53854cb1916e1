mod generate;
mod objects;

pub use generate::{GenerateFlags, cmd_generate};
pub use objects::cmd_objects;
