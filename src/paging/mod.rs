//! Pull-to-refresh pagination
//!
//! [`PagingController`] keeps the page counter and loading guards, asks a
//! [`Transport`] for each page, normalizes the response and hands the
//! extracted list to a [`ListRenderer`], reporting state changes to a
//! [`RefreshWidget`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use pagefeed::config::Config;
//! use pagefeed::paging::{HttpTransport, LogWidget, PagingController, TemplateRenderer};
//!
//! let config = Config::load()?;
//! let renderer = TemplateRenderer::new(config.render.template.clone());
//! let mut controller = PagingController::new(&config, HttpTransport::new(), LogWidget::new(), renderer);
//!
//! controller.start().await?;
//! controller.pull_up().await?;
//! println!("{}", controller.renderer().output());
//! ```

mod controller;
mod render;
mod transport;
mod widget;

pub use controller::{
    DataChange, DataRequest, LoadedCallback, LoadedPage, PageOutcome, PageState, PagingController,
    PagingError,
};
pub use render::{ListRenderer, TemplateRenderer};
pub use transport::{HttpTransport, PageRequest, Transport, TransportError, decode_body};
pub use widget::{LogWidget, RefreshWidget};
