pub mod ahv;
pub mod error;
pub mod resource;

pub use ahv::{Ahv, Category};
pub use resource::Connection;
