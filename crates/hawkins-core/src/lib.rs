pub mod capability;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod message;
pub mod tool;
pub mod types;

pub use config::Config;
pub use context::Context;
pub use error::{Error, Result};
pub use event::{TokenUsage, ToolInvocation, ToolObserver};
pub use message::{ContentBlock, Message, Role};
pub use tool::{ToolDefinition, ToolParameter};
pub use types::{Id, InvocationId, MessageId, Metadata, SessionId, Timestamp};

pub mod prelude {
    pub use crate::capability::{Capabilities, Capability};
    pub use crate::config::Config;
    pub use crate::context::Context;
    pub use crate::error::{Error, Result};
    pub use crate::event::{TokenUsage, ToolInvocation, ToolObserver};
    pub use crate::message::{ContentBlock, Message, Role};
    pub use crate::tool::{ToolDefinition, ToolParameter};
    pub use crate::types::{Id, InvocationId, MessageId, Metadata, SessionId, Timestamp};
}
