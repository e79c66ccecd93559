//! Clinica CLI
//!
//! Command-line access to the dashboard core:
//! - Inspect and resolve the route table
//! - Sign in and out of the backend
//! - Send requests through the authenticated pipeline

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use clinica::client::{ApiClient, ApiRequest, Method, ReqwestTransport};
use clinica::config::Config;
use clinica::navigation::{Navigator, RequireToken};
use clinica::routes::{app_routes, Layout};
use clinica::token::{FileTokenStore, TokenStore};
use clinica::{auth, logging, LoginRequest};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "clinica")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clinical records dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overrides config
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the route table in evaluation order
    Routes,

    /// Resolve a URL to its page and layout
    Resolve {
        /// URL path, e.g. /usuarios/doctores
        path: String,
    },

    /// Check that the backend is reachable
    Ping,

    /// Sign in and store the access token
    Login {
        /// Account email
        email: String,
        /// Password (default: read one line from stdin)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show whether a token is stored
    Token,

    /// Send a request through the authenticated pipeline
    Request {
        /// HTTP method (GET, POST, PUT, PATCH, DELETE)
        method: String,
        /// Backend path, e.g. /pacientes/
        path: String,
        /// JSON body
        #[arg(short, long)]
        data: Option<String>,
        /// Extra headers in Name:Value format
        #[arg(short = 'H', long)]
        header: Vec<String>,
        /// Query parameters in key=value format
        #[arg(short, long)]
        query: Vec<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    // A subscriber may already be installed when embedded; logging is best-effort
    let _ = logging::init(&config.logging);

    let tokens = Arc::new(FileTokenStore::new(config.token_path()));

    match cli.command {
        Commands::Routes => print_routes(&cli.format)?,

        Commands::Resolve { path } => {
            let navigator = if config.auth.require_sign_in {
                Navigator::new(app_routes()).with_guard(RequireToken::new(tokens.clone()))
            } else {
                Navigator::new(app_routes())
            };
            let matched = navigator.resolve(&path);

            if cli.format == "json" {
                let value = serde_json::json!({
                    "path": matched.path,
                    "route": matched.descriptor.path(),
                    "page": format!("{:?}", matched.page()),
                    "title": matched.page().title(),
                    "layout": format!("{:?}", matched.layout()),
                    "params": matched.params,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Path:   {}", matched.path);
                println!("Route:  {}", matched.descriptor.path());
                println!("Page:   {:?} ({})", matched.page(), matched.page().title());
                println!("Layout: {}", layout_name(matched.layout()));
                for (key, value) in &matched.params {
                    println!("  {} = {}", key, value);
                }
            }
        }

        Commands::Ping => {
            let client = build_client(&config, tokens)?;
            match client.ping().await {
                Ok(message) => println!("{}: {}", client.base_url(), message),
                Err(e) => {
                    eprintln!("Cannot reach backend at {}", client.base_url());
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password()?,
            };

            let client = build_client(&config, tokens.clone())?;
            let response = auth::sign_in(&client, &*tokens, &LoginRequest::new(&email, password))
                .await
                .context("Sign-in failed")?;

            match response.mensaje {
                Some(mensaje) => println!("{}", mensaje),
                None => println!("Signed in as {}", email),
            }
            println!("Token stored at {:?}", tokens.path());
        }

        Commands::Logout => {
            auth::sign_out(&*tokens)?;
            println!("Signed out");
        }

        Commands::Token => match tokens.read_token() {
            Some(token) => println!("Token stored ({} chars) at {:?}", token.len(), tokens.path()),
            None => println!("No token stored"),
        },

        Commands::Request {
            method,
            path,
            data,
            header,
            query,
        } => {
            let method: Method = method.parse().map_err(anyhow::Error::msg)?;
            let mut request = ApiRequest::new(method, path);

            for h in header {
                let Some((name, value)) = h.split_once(':') else {
                    bail!("Invalid header (expected Name:Value): {}", h);
                };
                request = request.header(name.trim(), value.trim());
            }

            for q in query {
                let Some((key, value)) = q.split_once('=') else {
                    bail!("Invalid query parameter (expected key=value): {}", q);
                };
                request = request.query(key, value);
            }

            if let Some(data) = data {
                let body: serde_json::Value =
                    serde_json::from_str(&data).context("--data is not valid JSON")?;
                request = request.json(&body)?;
            }

            let client = build_client(&config, tokens)?;
            let response = client.send(request).await?;

            eprintln!("HTTP {}", response.status);
            println!("{}", serde_json::to_string_pretty(&response.body)?);
        }

        Commands::Config { output } => {
            let config = clinica::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn build_client(
    config: &Config,
    tokens: Arc<FileTokenStore>,
) -> anyhow::Result<ApiClient<ReqwestTransport>> {
    let transport = ReqwestTransport::new(Duration::from_secs(config.api.request_timeout_secs))
        .context("Failed to build HTTP client")?;
    Ok(ApiClient::new(config.api.base_url.clone(), transport, tokens))
}

fn read_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string())
}

fn layout_name(layout: Layout) -> &'static str {
    match layout {
        Layout::Authenticated => "app layout",
        Layout::Standalone => "standalone",
        Layout::Bare => "none (catch-all)",
    }
}

fn print_routes(format: &str) -> anyhow::Result<()> {
    let table = app_routes();

    if format == "json" {
        let routes: Vec<serde_json::Value> = table
            .iter()
            .map(|d| {
                serde_json::json!({
                    "path": d.path(),
                    "page": format!("{:?}", d.page),
                    "layout": format!("{:?}", d.layout),
                    "props": d.props,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    println!("{:<28} {:<24} {:<18} {}", "Path", "Page", "Layout", "Props");
    println!("{}", "-".repeat(80));

    for d in table.iter() {
        let props = d
            .props
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "{:<28} {:<24} {:<18} {}",
            d.path(),
            format!("{:?}", d.page),
            layout_name(d.layout),
            props
        );
    }

    Ok(())
}
