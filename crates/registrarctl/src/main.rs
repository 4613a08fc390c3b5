// # registrarctl - Registrar command-line front end
//
// This binary is a THIN integration layer: it reads configuration, sets up
// logging, registers adapters, and runs a single operation. All registrar
// logic lives in the adapter crates.
//
// ## Configuration
//
// Credentials are read from environment variables only:
//
// - `REGISTRAR_TYPE`: Registrar type (default: porkbun)
// - `REGISTRAR_API_KEY`: API key
// - `REGISTRAR_SECRET_API_KEY`: Secret API key
// - `REGISTRAR_API_URL`: API base URL (optional)
// - `REGISTRAR_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Commands
//
// ```bash
// registrarctl ping
// registrarctl check example.com
// registrarctl details example.com
// registrarctl register example.com [years]
// registrarctl update-ns example.com ns1.example.net ns2.example.net [ns3] [ns4]
// ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use registrar_core::{Registrar, RegistrableDomain, RegistrarConfig, RegistrarRegistry};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum CtlExitCode {
    /// Operation succeeded
    Success = 0,
    /// Configuration or usage error
    ConfigError = 1,
    /// The registrar operation failed
    OperationFailed = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    registrar_type: String,
    api_key: String,
    secret_api_key: String,
    api_url: Option<String>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            registrar_type: env::var("REGISTRAR_TYPE").unwrap_or_else(|_| "porkbun".to_string()),
            api_key: env::var("REGISTRAR_API_KEY").context("REGISTRAR_API_KEY is not set")?,
            secret_api_key: env::var("REGISTRAR_SECRET_API_KEY")
                .context("REGISTRAR_SECRET_API_KEY is not set")?,
            api_url: env::var("REGISTRAR_API_URL").ok().filter(|url| !url.trim().is_empty()),
            log_level: env::var("REGISTRAR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        match self.registrar_type.as_str() {
            "porkbun" => {}
            _ => anyhow::bail!(
                "REGISTRAR_TYPE '{}' is not supported. Supported registrars: porkbun",
                self.registrar_type
            ),
        }

        if let Some(ref url) = self.api_url
            && !url.starts_with("https://")
            && !url.starts_with("http://")
        {
            anyhow::bail!("REGISTRAR_API_URL must use HTTP or HTTPS scheme. Got: {}", url);
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "REGISTRAR_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.registrar_config()
            .validate()
            .map_err(|e| anyhow::anyhow!(e))
    }

    fn registrar_config(&self) -> RegistrarConfig {
        RegistrarConfig::porkbun(
            self.api_key.clone(),
            self.secret_api_key.clone(),
            self.api_url.clone(),
        )
    }
}

/// registrarctl - run one registrar operation
#[derive(Parser, Debug)]
#[command(name = "registrarctl")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Credentials are read from REGISTRAR_API_KEY and REGISTRAR_SECRET_API_KEY.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Check that the configured credentials are accepted
    Ping,

    /// Check whether a domain can be registered
    Check {
        /// Fully-qualified domain name
        domain: String,
    },

    /// Show dates, flags and nameservers of a domain in the account
    Details {
        /// Fully-qualified domain name
        domain: String,
    },

    /// Register a domain
    Register {
        /// Fully-qualified domain name
        domain: String,

        /// Registration term in years (default: the TLD minimum)
        years: Option<u32>,
    },

    /// Replace the nameservers of a domain
    UpdateNs {
        /// Fully-qualified domain name
        domain: String,

        /// Two to four nameservers, in order
        #[arg(num_args = 2..=4, required = true)]
        nameservers: Vec<String>,
    },
}

fn main() -> ExitCode {
    let command = match Cli::try_parse() {
        Ok(cli) => cli.command,
        Err(e) => {
            // --help and --version are not usage errors
            let code = if e.use_stderr() {
                CtlExitCode::ConfigError
            } else {
                CtlExitCode::Success
            };
            let _ = e.print();
            return code.into();
        }
    };

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let registry = RegistrarRegistry::new();
    register_builtin(&registry);

    let registrar = match registry.create_registrar(&config.registrar_config()) {
        Ok(registrar) => registrar,
        Err(e) => {
            error!("Failed to create registrar: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::OperationFailed.into();
        }
    };

    match rt.block_on(run(registrar.as_ref(), command)) {
        Ok(output) => {
            println!("{}", output);
            CtlExitCode::Success.into()
        }
        Err(e) => {
            error!("{} operation failed: {}", registrar.registrar_name(), e);
            CtlExitCode::OperationFailed.into()
        }
    }
}

/// Register every adapter compiled into this binary
fn register_builtin(registry: &RegistrarRegistry) {
    #[cfg(feature = "porkbun")]
    registrar_porkbun::register(registry);

    info!("Registered registrars: {}", registry.list_registrars().join(", "));
}

/// Run one command and render its result
async fn run(registrar: &dyn Registrar, command: Command) -> registrar_core::Result<String> {
    match command {
        Command::Ping => {
            registrar.verify_credentials().await?;
            Ok("credentials accepted".to_string())
        }
        Command::Check { domain } => {
            let domain = RegistrableDomain::new(domain);
            let available = registrar.is_domain_available(&domain).await?;
            Ok(format!(
                "{} is {}",
                domain.name,
                if available { "available" } else { "not available" }
            ))
        }
        Command::Details { domain } => {
            let mut domain = RegistrableDomain::new(domain);
            registrar.domain_details(&mut domain).await?;
            Ok(render_details(&domain))
        }
        Command::Register { domain, years } => {
            let mut domain = RegistrableDomain::new(domain);
            domain.registration_period = years;
            registrar.register_domain(&domain).await?;
            Ok(format!("{} registered", domain.name))
        }
        Command::UpdateNs {
            domain,
            nameservers,
        } => {
            let domain = RegistrableDomain::new(domain).with_nameservers(nameservers);
            registrar.modify_ns(&domain).await?;
            Ok(format!("nameservers updated for {}", domain.name))
        }
    }
}

fn render_details(domain: &RegistrableDomain) -> String {
    let registered = domain
        .registered_at
        .map_or_else(|| "unknown".to_string(), |ts| ts.to_rfc3339());
    let expires = domain
        .expires_at
        .map_or_else(|| "unknown".to_string(), |ts| ts.to_rfc3339());
    let nameservers: Vec<&str> = domain.nameservers().into_iter().flatten().collect();

    format!(
        "domain:      {}\nregistered:  {}\nexpires:     {}\nlocked:      {}\nprivacy:     {}\nnameservers: {}",
        domain.name,
        registered,
        expires,
        domain.locked,
        domain.privacy_enabled,
        nameservers.join(", ")
    )
}
