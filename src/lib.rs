pub mod error;
pub mod program;
pub mod tape;
pub mod executor;
pub mod config;
pub mod logging;

pub use error::{Error, ExecError, Result, ValidationError};
pub use executor::{Executor, Halt, Limits, Outcome, execute};
pub use program::{Instruction, Program, validate};
pub use tape::Tape;
