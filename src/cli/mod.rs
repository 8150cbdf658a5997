mod commands;
mod handlers;
mod shell;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_add, handle_delete, handle_edit, handle_list, handle_shell, handle_show,
    TerminalPrompter,
};
pub use shell::run_shell;
