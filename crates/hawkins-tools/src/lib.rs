pub mod error;
pub mod executor;
pub mod random;
pub mod registry;
pub mod tracker;
pub mod traits;
#[cfg(feature = "bureau")]
pub mod bureau;

pub use error::{Result, ToolError};
pub use executor::ToolExecutor;
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use registry::ToolRegistry;
pub use tracker::{TrackerState, UsageStats, UsageTracker};
pub use traits::{parse_input, Tool, ToolOutput};

#[cfg(feature = "bureau")]
pub use bureau::{
    bureau_registry, register_bureau_tools, CastInterdimensionalSpellTool,
    CheckHawkinsRecordsTool, ConsultDemogorgonTool, CreativityLevel, GatherPartyWisdomTool,
};

pub mod prelude {
    pub use crate::error::{Result, ToolError};
    pub use crate::executor::ToolExecutor;
    pub use crate::random::{RandomSource, StdRandom};
    pub use crate::registry::ToolRegistry;
    pub use crate::tracker::{UsageStats, UsageTracker};
    pub use crate::traits::{Tool, ToolOutput};

    #[cfg(feature = "bureau")]
    pub use crate::bureau::{bureau_registry, register_bureau_tools};
}
