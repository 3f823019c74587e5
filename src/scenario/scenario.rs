use anyhow::Result;

use crate::{
    news::{
        NewsSource, mock_news::MockNews, supabase_config::SupabaseConfig,
        supabase_news::SupabaseNews,
    },
    scenario::sources::NewsSourceKind,
};

pub struct Scenario;

pub type DynamicNewsSource = Box<dyn NewsSource>;

impl Scenario {
    pub fn news_source(kind: NewsSourceKind) -> Result<DynamicNewsSource> {
        tracing::info!(source = %kind, "creating news source");

        let source: DynamicNewsSource = match kind {
            NewsSourceKind::Mock => Box::new(MockNews::default()),
            NewsSourceKind::Supabase => {
                let config = SupabaseConfig::from_env()?;

                Box::new(SupabaseNews::new(config))
            }
        };

        Ok(source)
    }
}
