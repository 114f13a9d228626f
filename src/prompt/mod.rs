pub mod collector;
pub mod error;
pub mod label;
pub mod menu;

pub use collector::{FieldCollector, FieldKind};
pub use error::PromptError;
pub use label::humanize;
pub use menu::{select_index, select_value};
