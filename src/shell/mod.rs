// Composition root for the time entries service.
//
// Responsibilities
// - Read config from environment.
// - Instantiate concrete store and cache implementations.
// - Wire them into the repository and the router.

pub mod config;
pub mod http;
pub mod state;
