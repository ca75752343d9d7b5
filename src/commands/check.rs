use crate::core::aggregator::AggregateReport;
use crate::core::config::Config;
use crate::core::metric::Metric;
use crate::core::threshold::{CheckKind, ThresholdSpec};
use crate::error::{CheckError, Result};
use crate::source::{HttpSource, MetricSource, SnapshotSource};
use crate::ui::report::{self, Outcome};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub fn command() -> Command {
    Command::new("check_vsphere")
        .version(env!("CARGO_PKG_VERSION"))
        .about("This Nagios plugin checks the health of vmware hosts.")
        .arg(
            Arg::new("host")
                .short('H')
                .long("host")
                .value_name("HOST")
                .help("The hostname you want to connect to (default: 127.0.0.1)"),
        )
        .arg(
            Arg::new("user")
                .short('u')
                .long("user")
                .value_name("USER")
                .help("The username you want to login as"),
        )
        .arg(
            Arg::new("pass")
                .short('p')
                .long("pass")
                .value_name("PASSWORD")
                .help("The password you want to use for that user"),
        )
        .arg(
            Arg::new("action")
                .short('A')
                .long("action")
                .value_name("ACTION")
                .help("The check you want to run")
                .value_parser(CheckKind::ALL)
                .default_value("connect"),
        )
        .arg(
            Arg::new("warning")
                .short('W')
                .long("warning")
                .value_name("THRESHOLD")
                .allow_hyphen_values(true)
                .help("The warning threshold (datastore: GIB#PERCENT free)"),
        )
        .arg(
            Arg::new("critical")
                .short('C')
                .long("critical")
                .value_name("THRESHOLD")
                .allow_hyphen_values(true)
                .help("The critical threshold (datastore: GIB#PERCENT free)"),
        )
        .arg(
            Arg::new("snapshot")
                .short('s')
                .long("snapshot")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Read the inventory from a snapshot file instead of over HTTP"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECS")
                .value_parser(clap::value_parser!(u64))
                .help("Request timeout in seconds (default: 10)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Config file with connection defaults"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more to stderr (repeat for more detail)")
                .action(ArgAction::Count),
        )
}

/// Options for one run, command line merged over the config file
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOptions {
    pub kind: CheckKind,
    pub warning: Option<String>,
    pub critical: Option<String>,
    pub host: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub snapshot: Option<PathBuf>,
    pub timeout: Duration,
}

impl CheckOptions {
    pub fn resolve(matches: &ArgMatches, config: Config) -> Result<Self> {
        let kind = matches
            .get_one::<String>("action")
            .map(|action| action.parse())
            .transpose()?
            .unwrap_or(CheckKind::Connect);

        let timeout_secs = matches
            .get_one::<u64>("timeout")
            .copied()
            .or(config.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            kind,
            warning: matches.get_one::<String>("warning").cloned(),
            critical: matches.get_one::<String>("critical").cloned(),
            host: matches
                .get_one::<String>("host")
                .cloned()
                .or(config.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            user: matches.get_one::<String>("user").cloned().or(config.user),
            password: matches.get_one::<String>("pass").cloned().or(config.password),
            snapshot: matches
                .get_one::<PathBuf>("snapshot")
                .cloned()
                .or(config.snapshot),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Run the check selected on the command line; never fails, errors become output
pub fn execute(matches: &ArgMatches) -> Outcome {
    match try_execute(matches) {
        Ok(outcome) => outcome,
        Err(err) => {
            log::debug!("check aborted: {:?}", err);
            Outcome::from_error(&err)
        }
    }
}

fn try_execute(matches: &ArgMatches) -> Result<Outcome> {
    let config = Config::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .map_err(|e| CheckError::config(format!("{:#}", e)))?;
    let options = CheckOptions::resolve(matches, config)?;
    run(&options)
}

/// Thresholds are parsed before any source is opened.
pub fn run(options: &CheckOptions) -> Result<Outcome> {
    let spec = ThresholdSpec::parse(
        options.kind,
        options.warning.as_deref(),
        options.critical.as_deref(),
    )?;
    let mut source = open_source(options)?;
    run_with_source(options.kind, &spec, source.as_mut())
}

fn open_source(options: &CheckOptions) -> Result<Box<dyn MetricSource>> {
    if let Some(path) = &options.snapshot {
        log::info!("using snapshot source {:?}", path);
        return Ok(Box::new(SnapshotSource::open(path)?));
    }

    let user = options
        .user
        .as_deref()
        .ok_or_else(|| CheckError::config("You need to enter a username"))?;
    let password = options
        .password
        .as_deref()
        .ok_or_else(|| CheckError::config("You need to enter a password"))?;

    log::info!("using HTTP source for {}", options.host);
    Ok(Box::new(HttpSource::new(
        &options.host,
        user,
        password,
        options.timeout,
    )?))
}

pub fn run_with_source(
    kind: CheckKind,
    spec: &ThresholdSpec,
    source: &mut dyn MetricSource,
) -> Result<Outcome> {
    let metrics = collect_metrics(kind, source)?;
    log::debug!("{}: {} metrics retrieved", kind, metrics.len());

    if metrics.is_empty() {
        return Err(CheckError::no_data(report::no_data(kind)));
    }

    let aggregate = AggregateReport::build(metrics, spec);
    Ok(report::render(kind, &aggregate, spec))
}

fn collect_metrics(kind: CheckKind, source: &mut dyn MetricSource) -> Result<Vec<Metric>> {
    let metrics = match kind {
        // Reported in whole seconds whatever the source measured
        CheckKind::Connect => vec![Metric::latency(source.latency_seconds()?.round())],
        CheckKind::GeneralHealth => source
            .host_statuses()?
            .iter()
            .map(|host| Metric::host_status(&host.name, &host.status))
            .collect(),
        CheckKind::Datastore => source
            .datastores()?
            .iter()
            .map(|ds| {
                Metric::datastore(
                    &ds.id,
                    &ds.name,
                    &ds.datacenter,
                    ds.capacity_bytes,
                    ds.free_bytes,
                )
            })
            .collect(),
    };
    Ok(metrics)
}
