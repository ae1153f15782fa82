pub mod error;
pub mod types;
pub mod value;

pub use error::{EasyScriptError, ErrorKind};
pub use types::*;
pub use value::*;
