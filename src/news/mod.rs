pub mod mock_news;
pub mod supabase_config;
pub mod supabase_news;

use anyhow::Result;
use async_trait::async_trait;

use crate::market::news_window::NewsWindow;
use crate::types::news_item::NewsItem;

#[async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Newest first, at most `window.limit` items.
    async fn fetch(&self, window: &NewsWindow) -> Result<Vec<NewsItem>>;
}
