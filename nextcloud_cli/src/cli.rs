use clap::{Parser, ValueEnum};

/// Defines the interface of the `nextcloud-mcp` binary with clap.
#[derive(Parser, Debug)]
#[command(name = "nextcloud-mcp")]
#[command(version, about = "MCP server for Nextcloud files, calendars and contacts.")]
pub struct NextcloudCli {
    /// Transport used to talk to the MCP client.
    #[arg(short, long, value_enum, default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// Port for the HTTP transport.
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Address the HTTP transport binds to.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Base URL of the Nextcloud instance (e.g. https://cloud.example.com).
    #[arg(long, env = "NEXTCLOUD_URL")]
    pub url: Option<String>,

    /// Nextcloud username.
    #[arg(long, env = "NEXTCLOUD_USERNAME")]
    pub username: Option<String>,

    /// Nextcloud app password.
    #[arg(long, env = "NEXTCLOUD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Enable verbose output?
    #[arg(short, long)]
    pub verbose: bool,
}

/// How the server talks to its MCP client.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    /// Line delimited JSON-RPC over stdin and stdout.
    Stdio,
    /// Streamable HTTP at /mcp, with /health for probes.
    #[value(alias = "sse")]
    Http,
}
