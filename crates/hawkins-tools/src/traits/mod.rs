mod tool;

pub use tool::{parse_input, Tool, ToolOutput};
