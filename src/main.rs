use std::path::Path;

use clap::Parser;
use ticketd::{
    AppState, build_router,
    config::TicketdConfig,
    db::DbPool,
    models::CreateUser,
};
use validator::Validate;

const DEFAULT_CONFIG_PATH: &str = "ticketd.toml";

#[derive(Parser, Debug)]
#[command(version, about = "ticketd support ticket service", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to config file (defaults to ./ticketd.toml if it exists,
    /// otherwise built-in defaults are used)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Run database migrations and exit
    ///
    /// Useful for init containers or deployments that disable
    /// database.run_migrations.
    Migrate,
    /// Write a default configuration file
    Init {
        /// Path to create the config file (defaults to ./ticketd.toml)
        #[arg(short, long)]
        output: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Manage users in the local user store
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
}

#[derive(clap::Subcommand, Debug)]
enum UserCommand {
    /// Create a user and print its id
    Add {
        /// Display name
        name: String,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Grant admin privileges
        #[arg(long)]
        admin: bool,
    },
}

/// Default configuration for zero-config startup.
fn default_config_toml() -> &'static str {
    r#"# ticketd configuration
# Generated automatically for local development

[server]
host = "127.0.0.1"
port = 8080

# SQLite database for persistent storage
[database]
path = "ticketd.db"

# Header the authenticating reverse proxy uses to assert the caller's
# user id. Do not expose the server beyond localhost without such a proxy.
[auth]
identity_header = "x-ticketd-user"
"#
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ticketd=info,tower_http=info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&str>) -> TicketdConfig {
    let result = match path {
        Some(path) => TicketdConfig::from_file(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            TicketdConfig::from_file(DEFAULT_CONFIG_PATH)
        }
        None => Ok(TicketdConfig::default()),
    };

    match result {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.log_json);

    match args.command {
        Some(Command::Migrate) => {
            run_migrate(args.config.as_deref()).await;
        }
        Some(Command::Init { output, force }) => {
            run_init(output, force);
        }
        Some(Command::User { command }) => {
            let UserCommand::Add { name, email, admin } = command;
            run_user_add(args.config.as_deref(), name, email, admin).await;
        }
        Some(Command::Serve) | None => {
            run_server(args.config.as_deref()).await;
        }
    }
}

async fn run_server(config_path: Option<&str>) {
    let config = load_config(config_path);
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    let app = build_router(state, None);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn run_migrate(config_path: Option<&str>) {
    let config = load_config(config_path);

    let pool = match DbPool::from_config(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        eprintln!("Migration failed: {}", e);
        std::process::exit(1);
    }

    println!("Migrations completed successfully");
}

fn run_init(output: Option<String>, force: bool) {
    let output_path = output.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    if Path::new(&output_path).exists() && !force {
        eprintln!(
            "Config file already exists: {}\nUse --force to overwrite.",
            output_path
        );
        std::process::exit(1);
    }

    if let Err(e) = std::fs::write(&output_path, default_config_toml()) {
        eprintln!("Failed to write config file: {}", e);
        std::process::exit(1);
    }

    println!("Created config file: {}", output_path);
    println!();
    println!("To start the server, run:");
    println!("  ticketd serve --config {}", output_path);
}

async fn run_user_add(
    config_path: Option<&str>,
    name: String,
    email: Option<String>,
    admin: bool,
) {
    let config = load_config(config_path);

    let input = CreateUser {
        name,
        email,
        is_admin: admin,
    };
    if let Err(e) = input.validate() {
        eprintln!("Invalid user: {}", e);
        std::process::exit(1);
    }

    let pool = match DbPool::from_config(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if config.database.run_migrations {
        if let Err(e) = pool.run_migrations().await {
            eprintln!("Migration failed: {}", e);
            std::process::exit(1);
        }
    }

    match pool.users().create(input).await {
        Ok(user) => {
            println!("{}", user.id);
        }
        Err(e) => {
            eprintln!("Failed to create user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}
