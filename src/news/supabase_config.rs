use std::env;

use anyhow::{Context, Result, anyhow};
use url::Url;

#[derive(Clone)]
pub struct SupabaseConfig {
    pub base_url: Url,
    pub api_key: String,
    pub table: String,
}

impl SupabaseConfig {
    const DEFAULT_TABLE: &'static str = "market_news";

    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("invalid SUPABASE_URL {base_url}"))?;

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            table: Self::DEFAULT_TABLE.to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("SUPABASE_URL").map_err(|_| anyhow!("SUPABASE_URL not set"))?;

        let api_key = env::var("SUPABASE_KEY").map_err(|_| anyhow!("SUPABASE_KEY not set"))?;

        let mut config = Self::new(&base_url, api_key)?;
        if let Ok(table) = env::var("SUPABASE_NEWS_TABLE") {
            config.table = table;
        }

        Ok(config)
    }
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}
