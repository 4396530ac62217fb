use clap::Parser;

use crate::application::config::ConfigOverrides;
use crate::domain::answers::QueryWindow;
use crate::domain::dates::parse_timestamp;
use crate::domain::errors::DateError;
use crate::presentation::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "stackstats",
    author,
    version,
    about = "Answer statistics for a time window from the Stack Exchange API",
    long_about = None
)]
pub struct Cli {
    /// Start date, UTC (e.g. "20220807 10:00:00")
    #[arg(short, long)]
    pub since: String,

    /// End date, UTC (e.g. "20220807 10:20:00")
    #[arg(short, long)]
    pub until: String,

    #[arg(
        short = 'f',
        long,
        env = "STACKSTATS_OUTPUT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Json
    )]
    pub output_format: OutputFormat,

    /// Write diagnostic logs to stderr
    #[arg(short = 'l', long, env = "STACKSTATS_ENABLE_LOGGING")]
    pub enable_logging: bool,

    /// Override the answers endpoint URL
    #[arg(short = 'd', long, env = "STACKSTATS_URL")]
    pub development_url: Option<String>,

    /// Override the API filter token
    #[arg(short = 'c', long, env = "STACKSTATS_FILTER")]
    pub custom_filter: Option<String>,

    /// Override the maximum number of pages a run may fetch
    #[arg(
        short = 'm',
        long,
        env = "STACKSTATS_MAX_PAGES",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_pages: Option<u64>,

    /// Stack Exchange site to query
    #[arg(long, env = "STACKSTATS_SITE")]
    pub site: Option<String>,

    /// Pages fetched at once after the first
    #[arg(long, env = "STACKSTATS_CONCURRENCY")]
    pub concurrency: Option<usize>,
}

impl Cli {
    pub fn window(&self) -> Result<QueryWindow, DateError> {
        Ok(QueryWindow::new(
            parse_timestamp(&self.since)?,
            parse_timestamp(&self.until)?,
        ))
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            url: self.development_url.clone(),
            filter: self.custom_filter.clone(),
            site: self.site.clone(),
            max_pages: self.max_pages,
            concurrency: self.concurrency,
        }
    }
}
