//! Domain Tracker CLI Application
//!
//! A command-line interface for tracking domain availability via the WhoisXML
//! API, with Slack alerts when a watched domain becomes truly available.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use domain_tracker_lib::{
    format_domain_message, load_domains, ConfigManager, DomainTracker, DomainVerdict,
    SlackNotifier, Settings, TrackerConfig,
};
use futures_util::StreamExt;
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-tracker
#[derive(Parser, Debug)]
#[command(name = "domain-tracker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track domain availability and get Slack alerts when domains free up")]
#[command(
    long_about = "Track domain availability using the WhoisXML API.\n\nDomains flagged available by the registry but still carrying problematic\nstatuses (pendingDelete, redemptionPeriod, clientHold, ...) are reported\nas not yet registrable, so alerts only fire for truly available domains."
)]
#[command(styles = STYLES)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", global = true)]
    pub json: bool,

    /// Show detailed debug information
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a single domain and send a Slack alert if it is truly available
    Check {
        /// Domain name to check (e.g. example.com)
        #[arg(value_name = "DOMAIN")]
        domain: String,

        /// Fetch the full WHOIS record with registration details
        #[arg(long = "details")]
        details: bool,

        /// Send a Slack alert regardless of the verdict
        #[arg(long = "notify-all")]
        notify_all: bool,

        /// Skip Slack notification entirely
        #[arg(long = "no-notify")]
        no_notify: bool,
    },

    /// Sweep the watchlist file and alert on truly available domains
    CheckDomains {
        /// Watchlist file, one domain per line (default from config)
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        file: Option<String>,

        /// Send a Slack alert for every domain, not only available ones
        #[arg(long = "notify-all")]
        notify_all: bool,

        /// Skip Slack notifications entirely
        #[arg(long = "no-notify")]
        no_notify: bool,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(&args);

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Initialize tracing output on stderr so stdout stays machine-readable.
fn init_logging(args: &Args) {
    let default_filter = if args.debug {
        "domain_tracker=debug,domain_tracker_lib=debug"
    } else if args.verbose {
        "domain_tracker=info,domain_tracker_lib=info"
    } else {
        "domain_tracker=warn,domain_tracker_lib=warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(&args)?;

    let tracker_config =
        TrackerConfig::default().with_lookup_timeout(settings.lookup_timeout);
    let tracker = DomainTracker::with_config(&settings.whois_api_key, tracker_config)?;
    let notifier = SlackNotifier::new(&settings.slack_webhook_url)?;

    match args.command {
        Command::Check {
            ref domain,
            details,
            notify_all,
            no_notify,
        } => {
            let notify_all = notify_all || settings.notify_all;
            run_single_check(
                &args, &tracker, &notifier, domain, details, notify_all, no_notify,
            )
            .await
        }
        Command::CheckDomains {
            ref file,
            notify_all,
            no_notify,
        } => {
            let notify_all = notify_all || settings.notify_all;
            let watchlist = file
                .as_ref()
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|| settings.domains_file_path.clone());
            run_sweep(&args, &tracker, &notifier, &watchlist, notify_all, no_notify).await
        }
    }
}

/// Resolve settings from config files and the environment.
fn load_settings(args: &Args) -> Result<Settings, Box<dyn std::error::Error>> {
    let manager = ConfigManager::new(args.verbose);

    let file_config = match &args.config {
        Some(path) => {
            if args.verbose {
                eprintln!("Using explicit config file: {}", path);
            }
            manager.load_file(path)?
        }
        None => manager.discover_and_load()?,
    };

    Ok(Settings::load(&file_config)?)
}

/// Check one domain, print the result, and notify if warranted.
async fn run_single_check(
    args: &Args,
    tracker: &DomainTracker,
    notifier: &SlackNotifier,
    domain: &str,
    details: bool,
    notify_all: bool,
    no_notify: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if details {
        let report = tracker.domain_report(domain).await;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            ui::print_verdict(&report.verdict, None);
            ui::print_report_details(&report);
        }

        maybe_notify(notifier, &report.verdict, notify_all, no_notify).await;
        return Ok(());
    }

    let verdict = tracker.check_domain(domain).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        ui::print_verdict(&verdict, None);
    }

    maybe_notify(notifier, &verdict, notify_all, no_notify).await;
    Ok(())
}

/// Sweep the watchlist sequentially, printing results as they complete.
async fn run_sweep(
    args: &Args,
    tracker: &DomainTracker,
    notifier: &SlackNotifier,
    watchlist: &std::path::Path,
    notify_all: bool,
    no_notify: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let domains = load_domains(watchlist)?;

    if domains.is_empty() {
        eprintln!("No valid domains found in {}", watchlist.display());
        return Ok(());
    }

    if !args.json {
        ui::print_header(domains.len(), watchlist);
    }

    let started = Instant::now();
    let total = domains.len();
    let mut verdicts: Vec<DomainVerdict> = Vec::with_capacity(total);

    let mut stream = tracker.check_domains_stream(&domains);
    while let Some(verdict) = stream.next().await {
        if !args.json {
            ui::print_verdict(&verdict, Some((verdicts.len() + 1, total)));
        }

        maybe_notify(notifier, &verdict, notify_all, no_notify).await;
        verdicts.push(verdict);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&verdicts)?);
    } else {
        ui::print_summary(&verdicts, started.elapsed());
    }

    Ok(())
}

/// Send the Slack alert when the verdict (or --notify-all) calls for one.
///
/// Delivery failures are logged, never fatal: one broken webhook must not
/// abort a sweep halfway through the watchlist.
async fn maybe_notify(
    notifier: &SlackNotifier,
    verdict: &DomainVerdict,
    notify_all: bool,
    no_notify: bool,
) {
    if no_notify {
        tracing::debug!(domain = %verdict.domain, "Slack notification suppressed by --no-notify");
        return;
    }

    let should_notify = notify_all || verdict.is_truly_available();
    if should_notify {
        tracing::info!(domain = %verdict.domain, "Sending Slack alert");
        notifier
            .send_alert_safely(&format_domain_message(verdict))
            .await;
    }
}
