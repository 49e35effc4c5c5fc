pub mod context;
pub mod environment;
pub mod error;
mod tree;
pub mod value;

pub use context::{BufferedContext, StdioContext};
pub use environment::Environment;
pub use error::{RuntimeError, RuntimeErrorKind};
pub use tree::TreeWalkInterpreter;
pub use value::Value;

/// Where program output goes.
pub trait SystemContext {
    fn writeln(&mut self, text: &str);
}
