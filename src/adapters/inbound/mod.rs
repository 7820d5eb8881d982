mod cli;

pub use cli::{Args, CliDriver};
