use std::str::FromStr;

use sitetrack_core::error::CoreError;
use sitetrack_core::filter::{CategoryFilter, StatusFilter, WorkFilter};
use sitetrack_core::selection::ProjectScope;
use sitetrack_core::sort::SortMode;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "sitetrack=info,sitetrack_client=info,sitetrack_store=debug";

/// How the dashboard should be set up, loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardConfig {
    pub scope: ProjectScope,
    pub filter: WorkFilter,
    pub sort: SortMode,
    /// Print the view as JSON instead of a table.
    pub json: bool,
}

impl DashboardConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var          | Default   |
    /// |------------------|-----------|
    /// | `ACTIVE_PROJECT` | `all`     |
    /// | `STATUS_FILTER`  | `all`     |
    /// | `CATEGORY`       | `all`     |
    /// | `SEARCH`         | (empty)   |
    /// | `SORT`           | `default` |
    /// | `OUTPUT`         | `table`   |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let output = var("OUTPUT").unwrap_or_default();
        let json = match output.trim() {
            "" | "table" => false,
            "json" => true,
            other => {
                return Err(CoreError::Validation(format!(
                    "OUTPUT must be table or json, got {other:?}"
                )))
            }
        };

        Ok(Self {
            scope: parse_or_default(var("ACTIVE_PROJECT"))?,
            filter: WorkFilter {
                status: parse_or_default(var("STATUS_FILTER"))?,
                category: parse_or_default::<CategoryFilter>(var("CATEGORY"))?,
                search: var("SEARCH").unwrap_or_default(),
            },
            sort: parse_or_default(var("SORT"))?,
            json,
        })
    }
}

fn parse_or_default<T>(raw: Option<String>) -> Result<T, CoreError>
where
    T: FromStr<Err = CoreError> + Default,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(value) => value.parse(),
    }
}
