pub mod error;
pub mod node;
pub mod provider;
pub mod resolver;
pub mod validator;

pub use node::SchemaNode;
pub use provider::ProviderSchema;
pub use resolver::resolve;
pub use validator::FieldValidator;
