mod prompt;
mod root;

pub use root::Cli;
