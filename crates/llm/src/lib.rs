pub mod factcheck;
pub mod provider;
pub mod providers;

pub use factcheck::{
    FactCheckError, FactCheckResult, FactChecker, LlmFactChecker, StubFactChecker,
};
pub use provider::{LlmError, LlmProvider, Message, Role};
