pub mod args;
pub mod cli;
pub mod environment;
