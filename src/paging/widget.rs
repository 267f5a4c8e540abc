use tracing::info;

/// Pull-to-refresh widget driven by the controller.
///
/// The controller only reports state changes; gesture handling and drawing
/// belong to the widget.
pub trait RefreshWidget: Send {
    /// A pull-down finished; `tip` is a short status line for the user
    fn end_down_loading(&mut self, success: bool, tip: &str);

    /// Re-enable load-more after it was exhausted
    fn reset_up_loading(&mut self);

    /// A pull-up finished; `no_more_data` locks further loading
    fn end_up_loading(&mut self, no_more_data: bool);

    /// Show the load-more indicator for a programmatic load
    fn trigger_up_loading(&mut self);

    /// Pull-up currently locked by the host
    fn is_up_locked(&self) -> bool {
        false
    }
}

/// Widget that only reports transitions through tracing
#[derive(Debug, Default, Clone)]
pub struct LogWidget {
    up_locked: bool,
}

impl LogWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock_up(&mut self, locked: bool) {
        self.up_locked = locked;
    }
}

impl RefreshWidget for LogWidget {
    fn end_down_loading(&mut self, success: bool, tip: &str) {
        info!(success, tip, "Pull-down finished");
    }

    fn reset_up_loading(&mut self) {
        info!("Load-more reset");
    }

    fn end_up_loading(&mut self, no_more_data: bool) {
        info!(no_more_data, "Pull-up finished");
    }

    fn trigger_up_loading(&mut self) {
        info!("Load-more triggered");
    }

    fn is_up_locked(&self) -> bool {
        self.up_locked
    }
}
