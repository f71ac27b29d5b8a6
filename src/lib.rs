pub mod codegen;
pub mod error;
pub mod limits;
pub mod parse;
pub mod plugin;
pub mod registry;
pub mod store;
pub mod validate;
pub mod wasm;

pub use codegen::Compiler;
pub use error::{CompilerError, Phase};
pub use limits::Limits;
pub use plugin::{CompiledPlugin, TriggerDescriptor, compile_plugin};
pub use registry::PluginRegistry;
