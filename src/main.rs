//! Shell-probe binary entry point: run one query against the local
//! command source and print the resulting item as JSON.

use shell_probe::config::Config;
use shell_probe::source::{local_context, CommandSource, Source};
use shell_probe::{cli, logging};
use tracing::info;

#[tokio::main]
async fn main() {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("shell-probe: {err}");
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return;
    }

    if args.version {
        cli::print_version();
        return;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("shell-probe: {err}");
            std::process::exit(2);
        }
    };

    let _ = logging::try_init_with_filter(config.log_filter());

    let Some(query) = args.query.clone() else {
        cli::print_help();
        std::process::exit(2);
    };

    let executor = match config.to_executor() {
        Ok(executor) => executor,
        Err(err) => {
            eprintln!("shell-probe: {err}");
            std::process::exit(2);
        }
    };

    let source = CommandSource::with_executor(executor);
    let context = local_context();
    info!(context = %context, search = args.search, "running query");

    let output = if args.search {
        source
            .search(context, &query)
            .await
            .map(|items| serde_json::json!(items))
    } else {
        source.get(context, &query).await.map(|item| serde_json::json!(item))
    };

    match output {
        Ok(value) => println!("{value:#}"),
        Err(err) => {
            eprintln!("shell-probe: {err}");
            std::process::exit(1);
        }
    }
}
