pub mod agent;
pub mod config;
pub mod error;
pub mod executor;
pub mod response;
pub mod session;

pub use agent::{Agent, AgentBuilder};
pub use config::AgentConfig;
pub use error::{AgentError, Result};
pub use executor::Executor;
pub use response::{AgentResponse, ToolCallRecord};
pub use session::{Session, SessionStats};

pub mod prelude {
    pub use crate::agent::{Agent, AgentBuilder};
    pub use crate::config::AgentConfig;
    pub use crate::error::{AgentError, Result};
    pub use crate::response::{AgentResponse, ToolCallRecord};
    pub use crate::session::{Session, SessionStats};
}
