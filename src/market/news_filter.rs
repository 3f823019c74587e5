use crate::types::market_phase::MarketStatus;
use crate::types::news_item::NewsItem;

const WEEKEND_KEYWORDS: &[&str] = &[
    "rbi", "policy", "budget", "global", "fed", "s&p", "nasdaq", "sebi",
];

const PRE_MARKET_KEYWORDS: &[&str] = &[
    "global",
    "overnight",
    "asia",
    "europe",
    "us markets",
    "sgx",
];

const AFTER_HOURS_KEYWORDS: &[&str] = &[
    "results",
    "earnings",
    "announcement",
    "closing",
    "board meeting",
];

/// Keywords a headline must contain to be shown in `status`; `None` keeps everything.
pub fn keywords_for(status: MarketStatus) -> Option<&'static [&'static str]> {
    match status {
        MarketStatus::Open => None,
        MarketStatus::ClosedWeekend => Some(WEEKEND_KEYWORDS),
        MarketStatus::PreMarket => Some(PRE_MARKET_KEYWORDS),
        MarketStatus::AfterHours => Some(AFTER_HOURS_KEYWORDS),
    }
}

/// Case-insensitive substring match against any keyword.
pub fn headline_matches(headline: &str, keywords: &[&str]) -> bool {
    let headline = headline.to_lowercase();
    keywords.iter().any(|keyword| headline.contains(keyword))
}

pub fn filter_for_status(status: MarketStatus, items: Vec<NewsItem>) -> Vec<NewsItem> {
    let Some(keywords) = keywords_for(status) else {
        return items;
    };

    items
        .into_iter()
        .filter(|item| headline_matches(item.headline(), keywords))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn items(headlines: &[&str]) -> Vec<NewsItem> {
        let published_at = Utc.with_ymd_and_hms(2024, 8, 10, 6, 0, 0).unwrap();
        headlines
            .iter()
            .map(|headline| NewsItem::new(*headline, published_at))
            .collect()
    }

    fn headlines(items: &[NewsItem]) -> Vec<&str> {
        items.iter().map(NewsItem::headline).collect()
    }

    #[test]
    fn open_session_keeps_everything_in_order() {
        let input = items(&["Local bakery opens", "RBI cuts repo rate", "Metal stocks slide"]);

        let output = filter_for_status(MarketStatus::Open, input.clone());

        assert_eq!(output, input);
    }

    #[test]
    fn weekend_keeps_macro_headlines_only() {
        let input = items(&["RBI cuts repo rate", "Local bakery opens"]);

        let output = filter_for_status(MarketStatus::ClosedWeekend, input);

        assert_eq!(headlines(&output), vec!["RBI cuts repo rate"]);
    }

    #[test]
    fn pre_market_keeps_overnight_cues() {
        let input = items(&[
            "SGX Nifty points to gap-up",
            "TCS beats estimates",
            "Asia shares mixed after US Markets rally",
            "Europe closes higher",
        ]);

        let output = filter_for_status(MarketStatus::PreMarket, input);

        assert_eq!(
            headlines(&output),
            vec![
                "SGX Nifty points to gap-up",
                "Asia shares mixed after US Markets rally",
                "Europe closes higher"
            ]
        );
    }

    #[test]
    fn after_hours_keeps_results_and_announcements() {
        let input = items(&[
            "Infosys Q1 results beat street",
            "Sensex rallies 300 points",
            "Board Meeting on Friday to consider dividend",
            "Closing bell: Nifty ends flat",
        ]);

        let output = filter_for_status(MarketStatus::AfterHours, input);

        assert_eq!(
            headlines(&output),
            vec![
                "Infosys Q1 results beat street",
                "Board Meeting on Friday to consider dividend",
                "Closing bell: Nifty ends flat"
            ]
        );
    }

    #[test]
    fn matches_substrings_not_whole_words() {
        assert!(headline_matches("Fedex shares jump", WEEKEND_KEYWORDS));
        assert!(headline_matches("GLOBALISATION debate", WEEKEND_KEYWORDS));
        assert!(!headline_matches("", WEEKEND_KEYWORDS));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(filter_for_status(MarketStatus::AfterHours, Vec::new()).is_empty());
    }
}
