//! SQL Analytics: pick a catalog query, run it on demand

use crate::error::MarketError;
use crate::market_core::{run_query, AnalyticsParams, AnalyticsQuery, QueryTable};
use crate::store::MarketStore;

#[derive(Debug, Clone)]
pub struct AnalyticsPage {
    params: AnalyticsParams,
    selected: usize,
    result: Option<(AnalyticsQuery, QueryTable)>,
}

impl AnalyticsPage {
    pub fn new(params: AnalyticsParams) -> Self {
        Self {
            params,
            selected: 0,
            result: None,
        }
    }

    pub fn params(&self) -> &AnalyticsParams {
        &self.params
    }

    pub fn selected(&self) -> AnalyticsQuery {
        let all = AnalyticsQuery::all();
        all[self.selected % all.len()]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Titles in menu order
    pub fn titles(&self) -> Vec<String> {
        AnalyticsQuery::all().iter().map(|q| q.title(&self.params)).collect()
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % AnalyticsQuery::all().len();
    }

    pub fn select_previous(&mut self) {
        let len = AnalyticsQuery::all().len();
        self.selected = (self.selected + len - 1) % len;
    }

    /// Last query run and its table
    pub fn result(&self) -> Option<&(AnalyticsQuery, QueryTable)> {
        self.result.as_ref()
    }

    /// Run the selected query; a failed run clears the previous result
    pub fn run_selected(&mut self, store: &MarketStore) -> Result<&QueryTable, MarketError> {
        let query = self.selected();
        self.result = None;
        let table = run_query(store, query, &self.params)?;
        log::info!("🔎 {}: {} rows", query.title(&self.params), table.rows.len());
        Ok(&self.result.insert((query, table)).1)
    }
}

impl Default for AnalyticsPage {
    fn default() -> Self {
        Self::new(AnalyticsParams::default())
    }
}
