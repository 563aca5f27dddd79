use std::path::PathBuf;
use url::Url;

use crate::error::{Result, ScrapeError};

pub const DEFAULT_BASE_URL: &str = "https://country-leaders.onrender.com/";
pub const DEFAULT_USER_AGENT: &str =
    "leaders-scraper/0.1 (https://github.com/leaders-scraper; educational use)";

/// Encyclopedia intros bold the subject's name and run longer than this.
pub const MIN_PARAGRAPH_CHARS: usize = 100;

const ENV_BASE_URL: &str = "LEADERS_API_URL";
const ENV_OUTPUT_DIR: &str = "LEADERS_OUTPUT_DIR";

/// What to do when one country or one leader cannot be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole run on the first error.
    #[default]
    FailFast,
    /// Log a warning, remember the failure and keep going.
    Skip,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub countries_path: String,
    pub leaders_path: String,
    pub cookie_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            countries_path: "countries/".to_string(),
            leaders_path: "leaders/".to_string(),
            cookie_path: "cookie/".to_string(),
        }
    }
}

impl ApiConfig {
    fn join(&self, path: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn countries_url(&self) -> String {
        self.join(&self.countries_path)
    }

    pub fn leaders_url(&self, country: &str) -> String {
        format!("{}?country={}", self.join(&self.leaders_path), urlencoding::encode(country))
    }

    pub fn cookie_url(&self) -> String {
        self.join(&self.cookie_path)
    }
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Knobs for the first-paragraph heuristic.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub paragraph_selector: String,
    pub emphasis_selector: String,
    pub min_paragraph_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            paragraph_selector: "p".to_string(),
            emphasis_selector: "b".to_string(),
            min_paragraph_chars: MIN_PARAGRAPH_CHARS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig::in_dir(PathBuf::from("./data"))
    }
}

impl OutputConfig {
    pub fn in_dir(dir: PathBuf) -> Self {
        OutputConfig {
            json_path: dir.join("leaders_data.json"),
            csv_path: dir.join("leaders_data.csv"),
        }
    }

    /// Both target paths, for the end-of-run message.
    pub fn describe(&self) -> String {
        format!("{} and {}", self.json_path.display(), self.csv_path.display())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScraperConfig {
    pub api: ApiConfig,
    pub http: HttpConfig,
    pub extractor: ExtractorConfig,
    pub output: OutputConfig,
    pub failure_policy: FailurePolicy,
}

impl ScraperConfig {
    /// Defaults with `LEADERS_API_URL` / `LEADERS_OUTPUT_DIR` applied.
    pub fn from_env() -> Self {
        let mut config = ScraperConfig::default();

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            if !base_url.trim().is_empty() {
                config.api.base_url = base_url.trim().to_string();
            }
        }

        if let Ok(dir) = std::env::var(ENV_OUTPUT_DIR) {
            if !dir.trim().is_empty() {
                config.output = OutputConfig::in_dir(PathBuf::from(dir.trim()));
            }
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ScrapeError::Config("base url is empty".to_string()));
        }
        Url::parse(&self.api.base_url)
            .map_err(|e| ScrapeError::Config(format!("base url {:?}: {}", self.api.base_url, e)))?;

        if self.http.timeout_secs == 0 {
            return Err(ScrapeError::Config("timeout must be at least one second".to_string()));
        }
        if self.extractor.paragraph_selector.trim().is_empty()
            || self.extractor.emphasis_selector.trim().is_empty()
        {
            return Err(ScrapeError::Config("extractor selectors must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_follow_the_api_layout() {
        let api = ApiConfig::default();
        assert_eq!(api.countries_url(), "https://country-leaders.onrender.com/countries/");
        assert_eq!(api.cookie_url(), "https://country-leaders.onrender.com/cookie/");
        assert_eq!(
            api.leaders_url("us"),
            "https://country-leaders.onrender.com/leaders/?country=us"
        );
    }

    #[test]
    fn base_url_without_trailing_slash_still_joins() {
        let api = ApiConfig {
            base_url: "http://localhost:5000".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(api.countries_url(), "http://localhost:5000/countries/");
    }

    #[test]
    fn country_parameter_is_encoded() {
        let api = ApiConfig::default();
        assert!(api.leaders_url("a b").ends_with("?country=a%20b"));
    }

    #[test]
    fn output_description_names_the_configured_paths() {
        let output = OutputConfig {
            json_path: PathBuf::from("/tmp/out/leaders.json"),
            csv_path: PathBuf::from("exports/leaders.csv"),
        };
        assert_eq!(output.describe(), "/tmp/out/leaders.json and exports/leaders.csv");

        let in_dir = OutputConfig::in_dir(PathBuf::from("results"));
        assert!(in_dir.describe().starts_with("results"));
        assert!(!in_dir.describe().contains("./data"));
    }

    #[test]
    fn defaults_validate() {
        assert!(ScraperConfig::default().validate().is_ok());
        assert_eq!(ScraperConfig::default().failure_policy, FailurePolicy::FailFast);
    }

    #[test]
    fn rejects_bad_base_url_and_zero_timeout() {
        let mut config = ScraperConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ScrapeError::Config(_))));

        let mut config = ScraperConfig::default();
        config.http.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ScrapeError::Config(_))));
    }
}
