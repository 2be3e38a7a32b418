//! Business logic services for CultivaLab

pub mod crop_types;
pub mod crops;
pub mod users;

pub use crop_types::CropTypeService;
pub use crops::CropService;
pub use users::UserService;
