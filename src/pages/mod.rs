//! Request-per-interaction page pipelines
//!
//! Each page rebuilds its view from the store on every interaction; nothing
//! is kept between calls except the user's inputs.

pub mod analytics;
pub mod crypto;
pub mod snapshot;

pub use analytics::AnalyticsPage;
pub use crypto::{build_crypto_analysis, CryptoAnalysis, CryptoView};
pub use snapshot::{build_snapshot, MarketSnapshot, SnapshotView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    MarketSnapshot,
    SqlAnalytics,
    CryptoAnalysis,
}

impl Page {
    pub fn all() -> [Page; 4] {
        [
            Page::Home,
            Page::MarketSnapshot,
            Page::SqlAnalytics,
            Page::CryptoAnalysis,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::MarketSnapshot => "Market Snapshot",
            Page::SqlAnalytics => "SQL Analytics",
            Page::CryptoAnalysis => "Crypto Analysis",
        }
    }

    pub fn index(&self) -> usize {
        Page::all().iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Page::all().get(index).copied()
    }

    pub fn next(&self) -> Self {
        let all = Page::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Self {
        let all = Page::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}
