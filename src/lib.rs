// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod hint;
pub mod journal;
pub mod profile;
pub mod round;
pub mod runtime;
pub mod sampler;
pub mod scramble;
pub mod timer;
pub mod ui;
pub mod words;
