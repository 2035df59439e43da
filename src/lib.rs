// Library root
// -----------
// The binary (`main.rs`) only loads the config and hands over to `runner`.
//
// Module responsibilities:
// - `config`: INI config file with placeholder defaults.
// - `api`: blocking HTTP helpers, the session and authorization.
// - `solver`: the computations behind each task, free of I/O.
// - `tasks`: fetch, answer and submit one task.
// - `runner`: the fixed order of a full run.
// - `error`: typed errors for the modules above.
pub mod api;
pub mod config;
pub mod error;
pub mod runner;
pub mod solver;
pub mod tasks;
