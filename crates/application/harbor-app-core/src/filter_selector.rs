use tracing::warn;

use harbor_core::{filter_options, Category, Filter, FilterOption};

use crate::ports::{CategorySource, ServiceError};

/// Raised when the user picks a boat type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChanged {
    pub filter: Filter,
}

/// Lists the boat types and raises the chosen one upward.
#[derive(Debug, Clone, Default)]
pub struct FilterSelector {
    options: Option<Vec<FilterOption>>,
    selected: Filter,
    error: Option<String>,
}

impl FilterSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, source: &dyn CategorySource) {
        let result = source.categories().await;
        self.apply_categories(result);
    }

    pub fn apply_categories(&mut self, result: Result<Vec<Category>, ServiceError>) {
        match result {
            Ok(categories) => {
                self.options = Some(filter_options(&categories));
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to load boat types");
                self.options = None;
                self.error = Some(e.message());
            }
        }
    }

    pub fn options(&self) -> Option<&[FilterOption]> {
        self.options.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> &Filter {
        &self.selected
    }

    /// Picks `value` (a category key, or empty for all types). Values absent
    /// from the loaded options are ignored.
    pub fn choose(&mut self, value: &str) -> Option<FilterChanged> {
        if let Some(options) = &self.options {
            if !options.iter().any(|o| o.value == value.trim()) {
                warn!(value, "ignoring unknown boat type");
                return None;
            }
        }
        self.selected = Filter::from_wire(value);
        Some(FilterChanged {
            filter: self.selected.clone(),
        })
    }
}
