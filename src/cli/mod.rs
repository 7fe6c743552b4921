pub mod commands;

pub use commands::{Cli, Commands, ReadArgs, format_thread, platform_label, run};
