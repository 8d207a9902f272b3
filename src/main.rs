use clap::Parser;
use meridian::cli::{
    backends, handle_completions, handle_config_init, BackendsCommands, Cli, Commands,
    ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => meridian::cli::serve::run_serve(args).await,
        Commands::Backends(cmd) => match cmd {
            BackendsCommands::List(args) => match backends::handle_backends_list(&args) {
                Ok(output) => {
                    println!("{}", output);
                    Ok(())
                }
                Err(e) => Err(e),
            },
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
