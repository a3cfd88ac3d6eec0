#![doc = include_str!("../README.md")]

pub mod ast;
pub mod diagnostic;
pub mod extend;
mod name;
mod node;
pub mod parser;
pub mod schema;

pub use self::extend::extend_schema;
pub use self::extend::ExtensionError;
pub use self::extend::SchemaExtender;
pub use self::name::InvalidNameError;
pub use self::name::Name;
pub use self::node::FileId;
pub use self::node::Node;
pub use self::node::NodeLocation;
pub use self::parser::Parser;
pub use self::parser::SourceFile;
pub use self::parser::SourceMap;
pub use self::schema::Resolver;
pub use self::schema::Schema;
