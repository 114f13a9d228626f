pub mod create;
pub mod schema;
pub mod validate;

pub use create::CreateCommand;
pub use schema::SchemaCommand;
pub use validate::ValidateCommand;
