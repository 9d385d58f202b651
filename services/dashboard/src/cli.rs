use crate::render::{run_render, RenderArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use spend_watch::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Medicaid Spend Watch",
    about = "Serve or render the Medicaid spend compliance dashboard",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the dashboard HTTP service (default command)
    Serve(ServeArgs),
    /// Run one dashboard flow against the backend and print the result
    Render(RenderArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the backend base URL (SPEND_WATCH_API_BASE)
    #[arg(long)]
    pub(crate) api_base: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Render(args) => run_render(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderFormat, RenderScope};

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["spend-watch-dashboard"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_provider_render() {
        let cli = Cli::try_parse_from([
            "spend-watch-dashboard",
            "render",
            "provider",
            "--npi",
            "1003000126",
            "--format",
            "json",
        ])
        .expect("parses");

        let Some(Command::Render(args)) = cli.command else {
            panic!("render command expected");
        };
        assert_eq!(args.format, RenderFormat::Json);
        assert!(matches!(
            args.scope,
            RenderScope::Provider { ref npi } if npi == "1003000126"
        ));
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "spend-watch-dashboard",
            "serve",
            "--port",
            "8080",
            "--api-base",
            "http://10.0.0.5:8000",
        ])
        .expect("parses");

        let Some(Command::Serve(args)) = cli.command else {
            panic!("serve command expected");
        };
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.api_base.as_deref(), Some("http://10.0.0.5:8000"));
    }
}
