use clap::Parser;
use notekit::cli::{
    handle_add, handle_delete, handle_edit, handle_list, handle_shell, handle_show, Cli, Commands,
};
use notekit::{logging, Config};

fn main() {
    let cli = Cli::parse();

    let result = Config::load(cli.data_dir).and_then(|config| {
        logging::init(&config.log_filter);
        tracing::debug!(data_dir = %config.data_dir.display(), "config loaded");

        match cli.command {
            Commands::List { json } => handle_list(&config, json),
            Commands::Show { id, json } => handle_show(&config, id, json),
            Commands::Add {
                title,
                content,
                stdin,
                json,
            } => handle_add(&config, title, content, stdin, json),
            Commands::Edit {
                id,
                title,
                content,
                stdin,
                json,
            } => handle_edit(&config, id, title, content, stdin, json),
            Commands::Delete { id, force } => handle_delete(&config, id, force),
            Commands::Shell => handle_shell(&config),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
