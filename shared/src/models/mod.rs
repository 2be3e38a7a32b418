//! Domain models for CultivaLab

mod condition;
mod crop;
mod crop_type;
mod user;

pub use condition::*;
pub use crop::*;
pub use crop_type::*;
pub use user::*;
