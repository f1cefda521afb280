use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration_sdk::{
    CallContext, ClientConfig, ConfigStatus, ConfigurationApi, ConfigurationGrpcClient,
    GlobalConfig, GrpcClientConfig,
};
use tracing_subscriber::EnvFilter;

/// Configuration CLI - query the configuration service
#[derive(Parser)]
#[command(name = "configuration-cli")]
#[command(about = "Configuration CLI - query the configuration service")]
#[command(version)]
struct Cli {
    /// gRPC endpoint of the configuration server
    #[arg(short, long, default_value = "http://127.0.0.1:50051")]
    endpoint: String,

    /// Deadline for each call in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List live client configurations
    ListClients,
    /// Show the client configuration for a tenant key
    GetClient { tenant_key: String },
    /// List global configurations
    ListGlobals,
    /// Show one global configuration
    GetGlobal { global_id: i32 },
    /// Show the active global configuration (or the default)
    GetActive,
    /// Make a global configuration the active one
    Activate { global_id: i32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let timeout = Duration::from_millis(cli.timeout_ms);
    let transport = GrpcClientConfig::default().with_rpc_timeout(timeout);
    let client = ConfigurationGrpcClient::connect_with(cli.endpoint.clone(), &transport)
        .await
        .with_context(|| format!("Failed to connect to {}", cli.endpoint))?;
    let ctx = CallContext::with_timeout(timeout);

    match cli.command {
        Commands::ListClients => {
            for record in client.list_clients(&ctx).await? {
                println!("{}", render_client(&record));
            }
        }
        Commands::GetClient { tenant_key } => {
            let record = client.get_client(&ctx, &tenant_key).await?;
            println!("{}", render_client(&record));
        }
        Commands::ListGlobals => {
            for record in client.list_globals(&ctx).await? {
                println!("{}", render_global(&record));
            }
        }
        Commands::GetGlobal { global_id } => {
            let record = client.get_global(&ctx, global_id).await?;
            println!("{}", render_global(&record));
        }
        Commands::GetActive => {
            let record = client.get_active_global(&ctx).await?;
            println!("{}", render_global(&record));
        }
        Commands::Activate { global_id } => activate(&client, &ctx, global_id).await?,
    }

    Ok(())
}

async fn activate(
    client: &ConfigurationGrpcClient,
    ctx: &CallContext,
    global_id: i32,
) -> Result<()> {
    let target = client.get_global(ctx, global_id).await?;
    tracing::debug!(global_id, active = target.active, "Activating global configuration");
    match client.activate_global(ctx, target).await {
        Ok(persisted) => {
            println!("{}", render_status(persisted.status));
            println!("{}", render_global(&persisted.record));
            Ok(())
        }
        Err(e) => {
            if e.is_transient() {
                tracing::warn!(global_id, error = %e, "Activation failed, safe to retry");
            }
            println!("{}", render_status(ConfigStatus::default()));
            Err(e.into())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn render_client(client: &ClientConfig) -> String {
    format!(
        "{}\ttenant={}\tlanguage={}\tapp={}\ttitle={}",
        client.client_uuid,
        client.tenant_key,
        client.language_id,
        client.app_name,
        client.report_title
    )
}

fn render_global(global: &GlobalConfig) -> String {
    let marker = if global.active { "*" } else { " " };
    format!(
        "{marker} {}\tsmtp={}:{}\tssl={}\tauth={}\tfooter={}",
        global.global_id,
        global.transport.host,
        global.transport.port,
        global.transport.use_ssl,
        global.transport.use_auth,
        global.footer_text
    )
}

fn render_status(status: ConfigStatus) -> String {
    format!(
        "created={} updated={} deleted={}",
        status.created, status.updated, status.deleted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration_sdk::MailTransport;

    #[test]
    fn failed_mutation_renders_all_flags_false() {
        assert_eq!(
            render_status(ConfigStatus::default()),
            "created=false updated=false deleted=false"
        );
    }

    #[test]
    fn global_rendering_marks_active_and_hides_password() {
        let global = GlobalConfig {
            global_id: 3,
            footer_text: "Regards".to_owned(),
            transport: MailTransport {
                host: "smtp.example.com".to_owned(),
                port: 587,
                password: "hunter2".to_owned(),
                ..MailTransport::default()
            },
            active: true,
        };

        let line = render_global(&global);
        assert!(line.starts_with("* 3"));
        assert!(line.contains("smtp=smtp.example.com:587"));
        assert!(!line.contains("hunter2"));
    }

    #[test]
    fn cli_parses_activate() {
        let cli = Cli::try_parse_from(["configuration-cli", "activate", "7"]).unwrap();
        assert!(matches!(cli.command, Commands::Activate { global_id: 7 }));
        assert_eq!(cli.timeout_ms, 5000);
    }
}
