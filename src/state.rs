use {
    crate::{
        config::DashboardConfig,
        error::MarketError,
        market_core::{AnalyticsParams, CompanionSet, CrossMarketAggregator, RangeInput, SeriesCatalog, DATE_FORMAT},
        pages::{build_crypto_analysis, build_snapshot, AnalyticsPage, CryptoView, Page, SnapshotView},
        store::MarketStore,
    },
    chrono::NaiveDate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl DateField {
    pub fn label(&self) -> &'static str {
        match self {
            DateField::Start => "Start Date",
            DateField::End => "End Date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a date; an empty buffer clears the field back to its default
    Editing { field: DateField, buffer: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Dashboard state: user inputs plus the last view built for each page
///
/// Views are rebuilt from the store on every interaction. Non-fatal errors
/// (bad ranges, unknown series) end up in the status line; store failures
/// are returned to the caller.
pub struct DashboardState<'a> {
    store: &'a MarketStore,
    aggregator: CrossMarketAggregator,
    primary: String,
    catalog: SeriesCatalog,
    coin_index: usize,
    page: Page,
    snapshot_input: RangeInput,
    crypto_input: RangeInput,
    snapshot: Option<SnapshotView>,
    crypto: Option<CryptoView>,
    analytics: AnalyticsPage,
    mode: InputMode,
    status: Option<(String, StatusLevel)>,
    running: bool,
}

impl<'a> DashboardState<'a> {
    pub fn new(store: &'a MarketStore, config: &DashboardConfig) -> Result<Self, MarketError> {
        let catalog = SeriesCatalog::load(store)?;
        let coin_index = catalog
            .crypto
            .iter()
            .position(|c| *c == config.primary_coin)
            .unwrap_or(0);

        let mut state = Self {
            store,
            aggregator: CrossMarketAggregator::new(CompanionSet::from_config(config)),
            primary: config.primary_coin.clone(),
            catalog,
            coin_index,
            page: Page::Home,
            snapshot_input: RangeInput::default(),
            crypto_input: RangeInput::default(),
            snapshot: None,
            crypto: None,
            analytics: AnalyticsPage::new(AnalyticsParams::from_config(config)),
            mode: InputMode::Normal,
            status: None,
            running: true,
        };

        if state.catalog.crypto.is_empty() {
            state.set_status("No crypto series found in the store", StatusLevel::Warning);
        }

        Ok(state)
    }

    pub fn store(&self) -> &MarketStore {
        self.store
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn catalog(&self) -> &SeriesCatalog {
        &self.catalog
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn snapshot(&self) -> Option<&SnapshotView> {
        self.snapshot.as_ref()
    }

    pub fn crypto(&self) -> Option<&CryptoView> {
        self.crypto.as_ref()
    }

    pub fn analytics(&self) -> &AnalyticsPage {
        &self.analytics
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn status(&self) -> Option<&(String, StatusLevel)> {
        self.status.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status = Some((message.into(), level));
    }

    /// Coin selected on the Crypto Analysis page
    pub fn coin(&self) -> Option<&str> {
        self.catalog.crypto.get(self.coin_index).map(String::as_str)
    }

    /// Date inputs of the current page, if it has any
    pub fn range_input(&self) -> Option<&RangeInput> {
        match self.page {
            Page::MarketSnapshot => Some(&self.snapshot_input),
            Page::CryptoAnalysis => Some(&self.crypto_input),
            Page::Home | Page::SqlAnalytics => None,
        }
    }

    fn range_input_mut(&mut self) -> Option<&mut RangeInput> {
        match self.page {
            Page::MarketSnapshot => Some(&mut self.snapshot_input),
            Page::CryptoAnalysis => Some(&mut self.crypto_input),
            Page::Home | Page::SqlAnalytics => None,
        }
    }

    pub fn set_page(&mut self, page: Page) -> Result<(), MarketError> {
        self.mode = InputMode::Normal;
        self.page = page;
        self.refresh()
    }

    pub fn next_page(&mut self) -> Result<(), MarketError> {
        self.set_page(self.page.next())
    }

    pub fn previous_page(&mut self) -> Result<(), MarketError> {
        self.set_page(self.page.previous())
    }

    /// Start typing into a date field, prefilled with its current value
    pub fn begin_edit(&mut self, field: DateField) {
        let Some(input) = self.range_input() else {
            return;
        };
        let current = match field {
            DateField::Start => input.start,
            DateField::End => input.end,
        };
        let buffer = current
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        self.mode = InputMode::Editing { field, buffer };
    }

    pub fn edit_push(&mut self, c: char) {
        if let InputMode::Editing { buffer, .. } = &mut self.mode {
            if buffer.len() < 10 && (c.is_ascii_digit() || c == '-') {
                buffer.push(c);
            }
        }
    }

    pub fn edit_pop(&mut self) {
        if let InputMode::Editing { buffer, .. } = &mut self.mode {
            buffer.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.mode = InputMode::Normal;
    }

    /// Commit the edited date and rebuild the page
    ///
    /// A buffer that is not `YYYY-MM-DD` leaves the input untouched.
    pub fn apply_edit(&mut self) -> Result<(), MarketError> {
        let InputMode::Editing { field, buffer } = std::mem::replace(&mut self.mode, InputMode::Normal) else {
            return Ok(());
        };

        let value = if buffer.trim().is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(buffer.trim(), DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    self.set_status(
                        format!("Invalid date '{}' (expected YYYY-MM-DD)", buffer),
                        StatusLevel::Warning,
                    );
                    return Ok(());
                }
            }
        };

        if let Some(input) = self.range_input_mut() {
            match field {
                DateField::Start => input.start = value,
                DateField::End => input.end = value,
            }
        }
        self.refresh()
    }

    pub fn next_coin(&mut self) -> Result<(), MarketError> {
        let len = self.catalog.crypto.len();
        if len == 0 {
            return Ok(());
        }
        self.coin_index = (self.coin_index + 1) % len;
        self.refresh()
    }

    pub fn previous_coin(&mut self) -> Result<(), MarketError> {
        let len = self.catalog.crypto.len();
        if len == 0 {
            return Ok(());
        }
        self.coin_index = (self.coin_index + len - 1) % len;
        self.refresh()
    }

    pub fn select_next_query(&mut self) {
        self.analytics.select_next();
    }

    pub fn select_previous_query(&mut self) {
        self.analytics.select_previous();
    }

    pub fn run_selected_query(&mut self) -> Result<(), MarketError> {
        let result = self.analytics.run_selected(self.store).map(|table| table.rows.len());
        if let Some(rows) = self.absorb(result)? {
            let title = self.analytics.selected().title(self.analytics.params());
            self.set_status(format!("{}: {} rows", title, rows), StatusLevel::Info);
        }
        Ok(())
    }

    /// Rebuild the view of the current page from the store
    pub fn refresh(&mut self) -> Result<(), MarketError> {
        match self.page {
            Page::Home | Page::SqlAnalytics => {}
            Page::MarketSnapshot => {
                self.snapshot = None;
                let result = build_snapshot(self.store, &self.aggregator, &self.primary, &self.snapshot_input);
                if let Some(view) = self.absorb(result)? {
                    if view.is_empty() {
                        self.set_status("No data available for selected dates.", StatusLevel::Warning);
                    } else {
                        self.status = None;
                    }
                    self.snapshot = Some(view);
                }
            }
            Page::CryptoAnalysis => {
                self.crypto = None;
                let Some(coin) = self.coin().map(str::to_string) else {
                    self.set_status("No crypto series found in the store", StatusLevel::Warning);
                    return Ok(());
                };
                let result = build_crypto_analysis(self.store, &coin, &self.crypto_input);
                if let Some(view) = self.absorb(result)? {
                    if view.is_empty() {
                        self.set_status("No data available.", StatusLevel::Warning);
                    } else {
                        self.status = None;
                    }
                    self.crypto = Some(view);
                }
            }
        }
        Ok(())
    }

    /// Turn non-fatal errors into a status message; pass store failures up
    fn absorb<T>(&mut self, result: Result<T, MarketError>) -> Result<Option<T>, MarketError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_fatal() => {
                log::error!("❌ {}", e);
                self.set_status(e.to_string(), StatusLevel::Error);
                Err(e)
            }
            Err(e) => {
                log::warn!("⚠️  {}", e);
                self.set_status(e.to_string(), StatusLevel::Warning);
                Ok(None)
            }
        }
    }
}
