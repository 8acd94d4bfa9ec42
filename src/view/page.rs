//! Main content area.

use serde::Serialize;

/// Which blocks of the main area are shown.
///
/// Blocks are independent: while a new search loads, the previous grid
/// stays visible under the loading indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Welcome block, before any search.
    pub welcome: bool,
    /// Loading indicator.
    pub loading: bool,
    /// "No books found" block.
    pub no_results: bool,
    /// Heading above the grid, present when there are results.
    pub results_heading: Option<String>,
}

impl PageView {
    /// Computes the page from the result count and search flags.
    pub fn compute(result_count: usize, loading: bool, has_searched: bool) -> Self {
        Self {
            welcome: !has_searched,
            loading,
            no_results: has_searched && !loading && result_count == 0,
            results_heading: (result_count > 0).then(|| format!("Found {} books", result_count)),
        }
    }
}
