//! Command-line interface for the notices client.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::NoticesClient;
use crate::config::{format_request_date, validate_date, ClientConfig};
use crate::error::Result;
use crate::notices::Notices;
use crate::types::Notice;

/// KAMAR Notices - Read the daily notices of a KAMAR school portal.
#[derive(Parser)]
#[command(name = "kamar-notices")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the notices for one day.
    Fetch {
        /// Portal host or URL (default: $KAMAR_HOST)
        host: Option<String>,

        /// Date in DD/MM/YYYY format (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Use http:// instead of https:// when the host has no scheme
        #[arg(long)]
        http: bool,

        /// Proxy URL to send the request through
        #[arg(long)]
        proxy: Option<String>,

        /// Log the raw response from the portal
        #[arg(long)]
        debug: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Only show meeting notices
        #[arg(short, long)]
        meetings: bool,
    },
}

impl Cli {
    /// Parse the process arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether `--debug` was passed.
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        match &self.command {
            Commands::Fetch { debug, .. } => *debug,
        }
    }
}

/// Run the CLI, returning the process exit code.
///
/// A portal-reported error is printed and yields exit code 1.
pub fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Fetch {
            host,
            date,
            http,
            proxy,
            debug,
            json,
            meetings,
        } => {
            let config = resolve_config(host, http, proxy, debug)?;
            fetch_command(&config, date.as_deref(), json, meetings)
        }
    }
}

/// Combine command-line flags with `KAMAR_*` environment configuration.
fn resolve_config(
    host: Option<String>,
    http: bool,
    proxy: Option<String>,
    debug: bool,
) -> Result<ClientConfig> {
    let mut config = match host {
        Some(host) => ClientConfig::new(host),
        None => ClientConfig::from_env()?,
    };
    if http {
        config.https = false;
    }
    if proxy.is_some() {
        config.proxy = proxy;
    }
    config.debug |= debug;
    Ok(config)
}

/// Execute the fetch command.
fn fetch_command(config: &ClientConfig, date: Option<&str>, json: bool, meetings: bool) -> Result<i32> {
    // Use today if no date provided
    let effective_date = date
        .map(String::from)
        .unwrap_or_else(|| format_request_date(chrono::Local::now().date_naive()));

    // Validate inputs before making HTTP requests
    validate_date(&effective_date)?;
    let client = NoticesClient::new(config)?;

    let pb = if json {
        ProgressBar::hidden()
    } else {
        println!(
            "{} notices from {} for {}",
            style("Fetching").bold(),
            style(client.endpoint()).cyan(),
            style(&effective_date).green()
        );
        println!();
        ProgressBar::new_spinner()
    };
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Waiting for KAMAR...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let notices = match client.retrieve(&effective_date) {
        Ok(notices) => notices,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    let code = i32::from(notices.error_message().is_some());

    if json {
        print_json(&notices, meetings)?;
        return Ok(code);
    }

    if let Some(message) = notices.error_message() {
        eprintln!("{} {}", style("KAMAR error:").red().bold(), message);
        return Ok(code);
    }

    let selected = if meetings {
        notices.filter(Notice::is_meeting)
    } else {
        notices.filter(|_| true)
    };

    if selected.is_empty() {
        println!("{}", style("No notices.").dim());
    }
    for notice in selected {
        print_notice(notice);
    }

    Ok(code)
}

fn print_json(notices: &Notices, meetings: bool) -> Result<()> {
    let output = if meetings {
        serde_json::to_string_pretty(&notices.meetings())?
    } else {
        serde_json::to_string_pretty(notices)?
    };
    println!("{output}");
    Ok(())
}

fn print_notice(notice: &Notice) {
    println!(
        "{} {}",
        style(format!("[{}]", notice.level())).cyan(),
        style(notice.subject()).bold()
    );
    for line in notice.body().lines() {
        println!("  {line}");
    }
    if let Some(meeting) = notice.as_meeting() {
        let when = [meeting.date.as_str(), meeting.time.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  {} {}  {} {}",
            style("Where:").yellow(),
            meeting.place,
            style("When:").yellow(),
            when
        );
    }
    println!("  {}", style(format!("- {}", notice.teacher())).dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_fetch() {
        let cli = Cli::parse_from(["kamar-notices", "fetch", "demo.school.kiwi"]);

        let Commands::Fetch {
            host,
            date,
            http,
            proxy,
            debug,
            json,
            meetings,
        } = cli.command;
        assert_eq!(host, Some("demo.school.kiwi".to_string()));
        assert!(date.is_none());
        assert!(!http);
        assert!(proxy.is_none());
        assert!(!debug);
        assert!(!json);
        assert!(!meetings);
    }

    #[test]
    fn test_cli_parse_fetch_with_flags() {
        let cli = Cli::parse_from([
            "kamar-notices",
            "fetch",
            "demo.school.kiwi",
            "--date",
            "01/01/2020",
            "--http",
            "--debug",
            "--meetings",
        ]);
        assert!(cli.debug_enabled());

        let Commands::Fetch {
            date, http, meetings, ..
        } = cli.command;
        assert_eq!(date, Some("01/01/2020".to_string()));
        assert!(http);
        assert!(meetings);
    }

    #[test]
    fn test_resolve_config_from_flags() {
        let config = resolve_config(
            Some("demo.school.kiwi".to_string()),
            true,
            Some("http://127.0.0.1:3128".to_string()),
            true,
        )
        .unwrap();
        assert_eq!(config.host, "demo.school.kiwi");
        assert!(!config.https);
        assert_eq!(config.proxy.as_deref(), Some("http://127.0.0.1:3128"));
        assert!(config.debug);
    }

    #[test]
    fn test_fetch_rejects_bad_date_before_request() {
        let config = ClientConfig::new("demo.school.kiwi");
        let err = fetch_command(&config, Some("2020-01-01"), true, false).unwrap_err();
        assert!(err.to_string().contains("DD/MM/YYYY"));
    }
}
