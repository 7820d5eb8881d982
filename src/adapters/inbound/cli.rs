//! CLI Adapter
//!
//! Parses flags, settles which range list is active, and prints either
//! the range list or a report for one address.

use crate::application::NodeCheckService;
use crate::config::{Config, VERSION};
use crate::domain::entities::{NodeReport, QueryRequest, RangeCatalog};
use crate::domain::errors::CheckError;
use crate::domain::ports::LocationResolver;
use crate::domain::services::CatalogLoader;
use clap::{CommandFactory, Parser};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

const EXAMPLES: &str = "\
Examples:
  checknodeip -a 1.1.1.1
  checknodeip -a 1.1.1.1 -f ip.txt
  checknodeip -p";

const FORMAT_HINT: &str = "the first line must be a date (format 'YYYY-mm-dd') \
and the following lines must be legal CIDRs";

/// Check whether an IP belongs to the known node ranges.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "checknodeip", version = VERSION, after_help = EXAMPLES)]
pub struct Args {
    /// IP address to check (required unless -p is given)
    #[arg(short = 'a', value_name = "IP")]
    pub address: Option<String>,

    /// Node range file to use instead of the built-in list
    #[arg(short = 'f', value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print the node range list and exit
    #[arg(short = 'p')]
    pub print: bool,
}

/// CLI driver - inbound adapter for one invocation.
pub struct CliDriver {
    config: Config,
    resolvers: Vec<Arc<dyn LocationResolver>>,
}

impl CliDriver {
    pub fn new(config: Config, resolvers: Vec<Arc<dyn LocationResolver>>) -> Self {
        Self { config, resolvers }
    }

    /// Run one invocation, writing the report to `out` and diagnostics to
    /// `err`. The returned error has already been reported on `err`.
    pub async fn run<O, E>(self, args: Args, out: &mut O, err: &mut E) -> Result<(), CheckError>
    where
        O: Write,
        E: Write,
    {
        let result = self.execute(args, out).await;
        if let Err(e) = &result {
            // a failing diagnostic write has nowhere left to go
            let _ = Self::report_error(e, err);
        }
        result
    }

    async fn execute<O: Write>(self, args: Args, out: &mut O) -> Result<(), CheckError> {
        let catalog = self.active_catalog(&args)?;

        self.print_banner(&catalog, out)?;

        if args.print {
            Self::print_catalog(&catalog, out)?;
            return Ok(());
        }

        let raw = args.address.ok_or(CheckError::MissingAddress)?;
        let request = QueryRequest::parse(&raw)?;

        let service = NodeCheckService::new(catalog, self.resolvers);
        let report = service.check(request).await;
        Self::print_report(&report, out)?;
        Ok(())
    }

    /// The embedded list, replaced wholesale by `-f` when given.
    ///
    /// A broken `-f` file aborts the run; there is no fallback to the
    /// embedded list.
    fn active_catalog(&self, args: &Args) -> Result<RangeCatalog, CheckError> {
        let embedded = CatalogLoader::parse(self.config.embedded_nodes).map_err(|e| {
            tracing::debug!("built-in range list is invalid: {}", e);
            e
        })?;

        match &args.file {
            Some(path) => {
                let catalog = CatalogLoader::from_file(path)?;
                tracing::debug!(
                    "using {} ranges from {} instead of {} built-in",
                    catalog.len(),
                    path.display(),
                    embedded.len()
                );
                Ok(catalog)
            }
            None => Ok(embedded),
        }
    }

    fn print_banner<O: Write>(&self, catalog: &RangeCatalog, out: &mut O) -> std::io::Result<()> {
        writeln!(
            out,
            "checknodeip {}, A tool to check if an IP is a node ip",
            self.config.version
        )?;
        writeln!(out, "Node IPs Update At:     {}", catalog.date())?;
        for resolver in &self.resolvers {
            if let Some(date) = resolver.database_date() {
                writeln!(out, "IP Database Update At:  {} ({})", date, resolver.name())?;
            }
        }
        writeln!(out)
    }

    fn print_catalog<O: Write>(catalog: &RangeCatalog, out: &mut O) -> std::io::Result<()> {
        writeln!(out, "Node IP CIDRs:")?;
        for (i, range) in catalog.ranges().iter().enumerate() {
            writeln!(out, "{:>4}) {}", i + 1, range)?;
        }
        Ok(())
    }

    fn print_report<O: Write>(report: &NodeReport, out: &mut O) -> std::io::Result<()> {
        writeln!(out, "IP:           {}", report.request.raw)?;
        for (i, result) in report.locations.iter().enumerate() {
            let label = format!("Location[{}]:", i + 1);
            writeln!(out, "{:<14}{}", label, result)?;
        }
        if report.is_node() {
            writeln!(out, "Node IP:      [ Yes ]")
        } else {
            writeln!(out, "Node IP:      [ No ]")
        }
    }

    fn report_error<E: Write>(error: &CheckError, err: &mut E) -> std::io::Result<()> {
        match error {
            CheckError::MissingAddress => {
                writeln!(err, "{}", Args::command().render_help())
            }
            CheckError::Catalog(e) if e.is_format_error() => {
                writeln!(err, "Node range list format error: {e}\n{FORMAT_HINT}")
            }
            other => writeln!(err, "{other}"),
        }
    }
}
