use rostrum::commands::command_argument_builder;
use rostrum::handlers::{
    exit_code_for, handle_extract, handle_retrieve, handle_update, init_logging, print_error,
};
use rostrum_core::print_banner;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    init_logging(chosen_command.get_count("verbose"));

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let result = match chosen_command.subcommand() {
        Some(("update", primary_command)) => handle_update(primary_command).await,
        Some(("retrieve", primary_command)) => handle_retrieve(primary_command).await,
        Some(("extract", primary_command)) => handle_extract(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        print_error(&e);
        std::process::exit(exit_code_for(&e));
    }
}
