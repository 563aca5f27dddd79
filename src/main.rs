use leaders_scraper_lib::{export, logger};
use leaders_scraper_lib::{
    Assembler, CatalogFetcher, Extractor, FailurePolicy, Gateway, HttpSession, ScraperConfig,
};

use clap::Parser;
use log::{error, info, warn, LevelFilter};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "leaders-scraper",
    about = "Collect world leaders from the country-leaders API with their Wikipedia intros",
    version
)]
struct Cli {
    /// Base URL of the country-leaders API.
    #[arg(long, env = "LEADERS_API_URL")]
    base_url: Option<String>,

    /// Where to write the JSON dataset.
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Where to write the CSV dataset.
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Skip countries or leaders that fail instead of aborting the run.
    #[arg(long)]
    skip_failures: bool,

    /// Minimum number of characters for an intro paragraph.
    #[arg(long)]
    min_paragraph_chars: Option<usize>,

    /// HTTP timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn into_config(self) -> ScraperConfig {
        let mut config = ScraperConfig::from_env();
        if let Some(base_url) = self.base_url {
            config.api.base_url = base_url;
        }
        if let Some(path) = self.json_out {
            config.output.json_path = path;
        }
        if let Some(path) = self.csv_out {
            config.output.csv_path = path;
        }
        if self.skip_failures {
            config.failure_policy = FailurePolicy::Skip;
        }
        if let Some(min) = self.min_paragraph_chars {
            config.extractor.min_paragraph_chars = min;
        }
        if let Some(secs) = self.timeout_secs {
            config.http.timeout_secs = secs;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logger::init(cli.log_level);

    let config = cli.into_config();
    config.validate()?;
    info!("Using API at {} (failure policy: {:?})", config.api.base_url, config.failure_policy);

    println!("Processing your request...");
    println!("Please be patient. This may take a few minutes.");

    let extractor = Extractor::new(&config.extractor)?;
    let gateway = Gateway::new(HttpSession::new(&config.http)?, &config.api);
    let catalog = CatalogFetcher::new(&gateway, &config.api, config.failure_policy);
    // Encyclopedia pages do not need the API cookie.
    let pages = HttpSession::new(&config.http)?;
    let assembler = Assembler::new(pages, &extractor, config.failure_policy);

    let assembly = match assembler.run(&catalog) {
        Ok(assembly) => assembly,
        Err(e) => {
            error!("Run aborted: {}", e);
            return Err(e.into());
        }
    };

    for failure in &assembly.failures {
        match &failure.leader {
            Some(name) => warn!("Skipped {} ({}): {}", name, failure.country_code, failure.error),
            None => warn!("Skipped country {}: {}", failure.country_code, failure.error),
        }
    }

    export::to_json_file(&assembly.dataset, &config.output.json_path)?;
    export::to_csv_file(&assembly.dataset, &config.output.csv_path)?;

    info!(
        "Scraping completed. {} leaders written, {} skipped.",
        assembly.dataset.len(),
        assembly.failures.len()
    );
    println!("Your files are ready: {}", config.output.describe());
    Ok(())
}
