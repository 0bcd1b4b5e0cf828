use std::process::ExitCode;

use clap::Parser;
use log::info;

use nextcloud_cli::cli::{NextcloudCli, Transport};
use nextcloud_cli::config::connection_context;
use nextcloud_cli::{CliError, logging};
use nextcloud_dav::NextcloudClient;
use nextcloud_mcp::NextcloudMcpServer;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = NextcloudCli::parse();
    logging::initialize_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.report());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: NextcloudCli) -> Result<(), CliError> {
    let context = connection_context(
        cli.url.as_deref(),
        cli.username.as_deref(),
        cli.password.as_deref(),
    )?;
    info!(
        "Connecting to {} as {}",
        context.base_url(),
        context.username()
    );

    let server = NextcloudMcpServer::new(NextcloudClient::new(context)?);
    match cli.transport {
        Transport::Stdio => server.serve_stdio().await?,
        Transport::Http => server.serve_http(&cli.host, cli.port).await?,
    }
    Ok(())
}
