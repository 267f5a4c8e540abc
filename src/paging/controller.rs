use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::render::ListRenderer;
use super::transport::{PageRequest, Transport, TransportError};
use super::widget::RefreshWidget;
use crate::config::{Config, PagingConfig, RequestConfig};
use crate::normalize::{NormalizeOptions, normalize};
use crate::numeric::is_truthy;
use crate::observability::Metrics;

#[derive(Debug, Error)]
pub enum PagingError {
    #[error("request url is empty")]
    EmptyUrl,

    #[error("page request failed: {0}")]
    Transport(#[from] TransportError),
}

/// Mutable paging state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub current_page: i64,
    /// The request in flight came from a pull-down
    pub is_pull_down: bool,
    pub loading_down: bool,
    pub loading_up: bool,
    /// Last page came back empty; load-more stays locked until reset
    pub no_more_data: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage {
    pub page: i64,
    pub rendered: usize,
    /// The list was replaced rather than extended
    pub refreshed: bool,
    /// Extracted list data (or the raw payload when normalization is off)
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// A request of the same direction is still in flight
    Busy,
    /// The backend returned an empty payload
    Empty,
    Loaded(LoadedPage),
}

/// Replaces the normalization step: turns a raw payload into list data
pub type DataChange = Box<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Extra request parameters for a page, merged over the configured ones
pub type DataRequest = Box<dyn Fn(i64) -> Map<String, Value> + Send + Sync>;

/// Runs once after the next successfully loaded page
pub type LoadedCallback = Box<dyn FnOnce(&LoadedPage) + Send>;

/// Drives pull-down refresh and pull-up pagination against a transport,
/// normalizing each response and rendering the extracted list.
///
/// Responses go through the normalization pipeline with the configured data
/// paths unless a [`DataChange`] hook is set. Per-page parameters can be
/// added with a [`DataRequest`] hook.
pub struct PagingController<T, W, R> {
    request: RequestConfig,
    paging: PagingConfig,
    options: NormalizeOptions,
    transport: T,
    widget: W,
    renderer: R,
    state: PageState,
    metrics: Arc<Metrics>,
    data_change: Option<DataChange>,
    data_request: Option<DataRequest>,
    on_loaded: Option<LoadedCallback>,
}

impl<T, W, R> PagingController<T, W, R>
where
    T: Transport,
    W: RefreshWidget,
    R: ListRenderer,
{
    pub fn new(config: &Config, transport: T, widget: W, renderer: R) -> Self {
        let paging = config.paging.clone();
        let mut current_page = paging.init_page_index;
        if paging.pull_up && paging.auto_load {
            // The automatic first pull-up increments back to the initial page
            current_page -= 1;
        }

        Self {
            request: config.request.clone(),
            options: config.normalize_options(),
            paging,
            transport,
            widget,
            renderer,
            state: PageState {
                current_page,
                ..PageState::default()
            },
            metrics: Arc::new(Metrics::new()),
            data_change: None,
            data_request: None,
            on_loaded: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Transform responses with `hook` instead of the normalization pipeline
    pub fn with_data_change<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.data_change = Some(Box::new(hook));
        self
    }

    /// Add per-page request parameters; they override configured params and
    /// the page parameter on key clashes
    pub fn with_data_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(i64) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.data_request = Some(Box::new(hook));
        self
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Load the first page: an automatic pull-up when enabled, otherwise a
    /// pull-down.
    pub async fn start(&mut self) -> Result<PageOutcome, PagingError> {
        if self.paging.pull_up && self.paging.auto_load {
            self.pull_up().await
        } else {
            self.pull_down().await
        }
    }

    /// Reload from the initial page, replacing the list
    pub async fn pull_down(&mut self) -> Result<PageOutcome, PagingError> {
        if self.state.loading_down {
            debug!("Pull-down ignored, already loading");
            return Ok(PageOutcome::Busy);
        }

        self.state.is_pull_down = true;
        self.state.loading_down = true;
        self.state.current_page = self.paging.init_page_index;

        self.wait().await;
        self.request_page().await
    }

    /// Load the next page, extending the list
    pub async fn pull_up(&mut self) -> Result<PageOutcome, PagingError> {
        if self.state.loading_up {
            debug!("Pull-up ignored, already loading");
            return Ok(PageOutcome::Busy);
        }

        self.state.is_pull_down = false;
        self.state.loading_up = true;
        self.state.current_page += 1;

        self.wait().await;
        self.request_page().await
    }

    /// Clear the list and reload it from the initial page
    pub async fn refresh(&mut self) -> Result<PageOutcome, PagingError> {
        if !self.paging.pull_up || self.widget.is_up_locked() {
            self.clear_list();
            self.pull_down().await
        } else if !self.state.loading_up {
            self.clear_list();
            self.state.current_page = self.paging.init_page_index - 1;
            self.load_more().await
        } else {
            Ok(PageOutcome::Busy)
        }
    }

    /// Unlock load-more if it was exhausted and fetch the next page
    pub async fn load_more(&mut self) -> Result<PageOutcome, PagingError> {
        if self.state.no_more_data {
            self.widget.reset_up_loading();
            self.state.no_more_data = false;
        }
        self.widget.trigger_up_loading();
        self.pull_up().await
    }

    /// Like [`load_more`](Self::load_more), running `callback` once after the
    /// next page loads successfully
    pub async fn load_more_then<F>(&mut self, callback: F) -> Result<PageOutcome, PagingError>
    where
        F: FnOnce(&LoadedPage) + Send + 'static,
    {
        self.on_loaded = Some(Box::new(callback));
        self.load_more().await
    }

    /// Release the loading guards after an abandoned request
    pub fn abort(&mut self) {
        if self.state.loading_down || self.state.loading_up {
            warn!(page = self.state.current_page, "Abandoning in-flight page request");
            self.refresh_state(false, 0);
        }
    }

    async fn wait(&self) {
        if !self.paging.delay.is_zero() {
            tokio::time::sleep(self.paging.delay.as_duration()).await;
        }
    }

    async fn request_page(&mut self) -> Result<PageOutcome, PagingError> {
        let Some(url) = self.request.url.clone().filter(|u| !u.is_empty()) else {
            error!("Request url is empty, cannot load page");
            self.fail();
            return Err(PagingError::EmptyUrl);
        };

        let mut request = PageRequest::from_config(&url, &self.request, self.state.current_page);
        if let Some(hook) = &self.data_request {
            request.params.extend(hook(request.page));
        }
        self.metrics.page_requested();

        match self.transport.fetch(&request).await {
            Ok(payload) => Ok(self.succeed(payload)),
            Err(e) => {
                warn!(request_id = %request.request_id, page = request.page, error = %e, "Page request failed");
                self.fail();
                Err(e.into())
            }
        }
    }

    fn succeed(&mut self, payload: Value) -> PageOutcome {
        if !is_truthy(&payload) {
            warn!(page = self.state.current_page, "Empty payload returned");
            self.state.no_more_data = true;
            self.refresh_state(false, 0);
            return PageOutcome::Empty;
        }

        debug!(page = self.state.current_page, payload = %payload, "Page payload received");

        let data = match &self.data_change {
            Some(hook) => hook(&payload),
            None => normalize(Some(&payload), &self.options).into_data(),
        };
        let rendered = self.render(data.as_ref());
        let page = self.state.current_page;
        let refreshed = self.state.is_pull_down || page == self.paging.init_page_index;
        let loaded = LoadedPage {
            page,
            rendered,
            refreshed,
            data,
        };

        if let Some(callback) = self.on_loaded.take() {
            callback(&loaded);
        }

        self.metrics.page_loaded(rendered);
        info!(page, rendered, refreshed, "Page loaded");
        self.refresh_state(true, rendered);

        PageOutcome::Loaded(loaded)
    }

    fn fail(&mut self) {
        self.metrics.page_failed();
        self.refresh_state(false, 0);
        self.state.current_page = (self.state.current_page - 1).max(self.paging.init_page_index);
    }

    fn render(&mut self, data: Option<&Value>) -> usize {
        if !self.paging.auto_render {
            return 0;
        }

        if self.state.is_pull_down {
            self.renderer.clear();
        }

        match data {
            Some(Value::Array(items)) if !items.is_empty() => self.renderer.render(items),
            _ => {
                self.state.no_more_data = true;
                0
            }
        }
    }

    fn clear_list(&mut self) {
        if self.paging.auto_render {
            self.renderer.clear();
        }
    }

    fn refresh_state(&mut self, success: bool, rendered: usize) {
        if self.state.is_pull_down {
            self.widget
                .end_down_loading(success, &format!("updated {} items", rendered));
            if self.state.no_more_data {
                self.widget.reset_up_loading();
                self.state.no_more_data = false;
            }
        }

        self.widget.end_up_loading(self.state.no_more_data);
        self.state.loading_down = false;
        self.state.loading_up = false;
    }
}
