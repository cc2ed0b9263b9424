pub mod script_ctx;
pub mod script_flow;

pub use script_ctx::ScriptCtx;
pub use script_flow::ScriptFlow;
