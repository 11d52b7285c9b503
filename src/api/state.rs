use std::sync::Arc;

use crate::config::Settings;
use crate::fetch_data::QuoteInput;
use crate::fetch_data::prices::PriceSource;

#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    /// Base settings; each request overrides the spread parameters.
    pub settings: Settings,
    pub input: QuoteInput,
    pub client: reqwest::Client,
    pub prices: Box<dyn PriceSource>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        input: QuoteInput,
        client: reqwest::Client,
        prices: Box<dyn PriceSource>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                settings,
                input,
                client,
                prices,
            }),
        }
    }
}
