pub mod config;
pub mod errors;
pub mod llm_client;
pub mod logging;
pub mod mcp;
pub mod optimizer;
pub mod routes;
pub mod state;
