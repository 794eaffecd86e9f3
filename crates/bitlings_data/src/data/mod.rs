pub mod command;
pub mod entity;
pub mod environment;
pub mod snapshot;
