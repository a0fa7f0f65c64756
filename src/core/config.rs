use super::market::ChartPeriod;
use super::metrics::DividendYieldStyle;
use super::news::MAX_ARTICLES;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const NEWS_API_KEY_VAR: &str = "NEWS_API_KEY";
pub const LLM_API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct YahooProviderConfig {
    pub base_url: String,
    /// Page that hands out the session cookie needed for fundamentals
    #[serde(default = "default_yahoo_cookie_url")]
    pub cookie_url: String,
}

fn default_yahoo_cookie_url() -> String {
    "https://fc.yahoo.com".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewsProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmProviderConfig {
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub yahoo: Option<YahooProviderConfig>,
    pub news: Option<NewsProviderConfig>,
    pub llm: Option<LlmProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            yahoo: Some(YahooProviderConfig {
                base_url: "https://query1.finance.yahoo.com".to_string(),
                cookie_url: default_yahoo_cookie_url(),
            }),
            news: Some(NewsProviderConfig {
                base_url: "https://newsapi.org".to_string(),
            }),
            llm: Some(LlmProviderConfig {
                base_url: "https://api.openai.com".to_string(),
                model: default_llm_model(),
            }),
        }
    }
}

impl ProvidersConfig {
    pub fn yahoo_base_url(&self) -> &str {
        self.yahoo
            .as_ref()
            .map_or("https://query1.finance.yahoo.com", |p| &p.base_url)
    }

    pub fn yahoo_cookie_url(&self) -> &str {
        self.yahoo
            .as_ref()
            .map_or("https://fc.yahoo.com", |p| &p.cookie_url)
    }

    pub fn news_base_url(&self) -> &str {
        self.news
            .as_ref()
            .map_or("https://newsapi.org", |p| &p.base_url)
    }

    pub fn llm_base_url(&self) -> &str {
        self.llm
            .as_ref()
            .map_or("https://api.openai.com", |p| &p.base_url)
    }

    pub fn llm_model(&self) -> String {
        self.llm
            .as_ref()
            .map_or_else(default_llm_model, |p| p.model.clone())
    }
}

/// Secrets read from the environment once at startup.
#[derive(Clone, Default)]
pub struct ApiKeys {
    pub news: Option<String>,
    pub llm: Option<String>,
}

impl ApiKeys {
    pub fn from_env() -> Self {
        let read = |var: &str| std::env::var(var).ok().filter(|v| !v.trim().is_empty());
        ApiKeys {
            news: read(NEWS_API_KEY_VAR),
            llm: read(LLM_API_KEY_VAR),
        }
    }
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("news", &self.news.as_ref().map(|_| "<set>"))
            .field("llm", &self.llm.as_ref().map(|_| "<set>"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub period: ChartPeriod,
    #[serde(default = "default_news_page_size")]
    pub news_page_size: usize,
    #[serde(default = "default_about_preview_chars")]
    pub about_preview_chars: usize,
    #[serde(default)]
    pub dividend_yield_style: DividendYieldStyle,
    #[serde(skip)]
    pub api_keys: ApiKeys,
}

fn default_news_page_size() -> usize {
    MAX_ARTICLES
}

fn default_about_preview_chars() -> usize {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            period: ChartPeriod::default(),
            news_page_size: default_news_page_size(),
            about_preview_chars: default_about_preview_chars(),
            dividend_yield_style: DividendYieldStyle::default(),
            api_keys: ApiKeys::default(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "tickerview", "tickerview")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn with_api_keys(mut self, api_keys: ApiKeys) -> Self {
        self.api_keys = api_keys;
        self
    }

    /// Page size requested from the news provider, kept within 1..=5.
    pub fn effective_news_page_size(&self) -> usize {
        self.news_page_size.clamp(1, MAX_ARTICLES)
    }
}
