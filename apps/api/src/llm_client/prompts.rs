// Shared prompt constants used by every generative call.
// Section-specific prompts live in optimizer/prompts.rs.

/// Literal line separating the rewritten text from its explanation in model output.
pub const EXPLANATION_MARKER: &str = "EXPLANATION:";

