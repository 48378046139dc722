use std::path::PathBuf;

use clap::Parser;
use dg_core::{SortState, ViewState};
use dg_data::GridConfig;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "datagrid",
    version,
    about = "Filter, sort and page through CSV or JSON records",
    long_about = "Loads a CSV file or a JSON array of objects and prints one page of it.\n\nExamples:\n  datagrid people.csv -q engineer --sort age --desc\n  datagrid people.json --config grid.json -p 3 --json"
)]
pub struct GridArgs {
    #[arg(value_name = "FILE", help = "CSV or JSON file to load, chosen by extension.")]
    pub file: PathBuf,

    #[arg(long, value_name = "FILE", help = "JSON grid configuration. Flags override it.")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'q',
        long = "query",
        value_name = "QUERY",
        default_value = "",
        help = "Case-insensitive text to search for."
    )]
    pub query: String,

    #[arg(
        long = "filter-keys",
        value_name = "KEYS",
        value_delimiter = ',',
        help = "Only search these keys (comma separated)."
    )]
    pub filter_keys: Vec<String>,

    #[arg(long, value_name = "KEY", help = "Sort by this column.")]
    pub sort: Option<String>,

    #[arg(long, requires = "sort", help = "Sort descending instead of ascending.")]
    pub desc: bool,

    #[arg(short = 'p', long, value_name = "PAGE", help = "Page to show, starting at 1.")]
    pub page: Option<usize>,

    #[arg(long = "page-size", value_name = "N", help = "Rows per page; 0 shows all rows.")]
    pub page_size: Option<usize>,

    #[arg(long, value_name = "N", help = "Pages shown on each side of the current page.")]
    pub siblings: Option<usize>,

    #[arg(long, value_name = "N", help = "Pages always shown at each end.")]
    pub boundaries: Option<usize>,

    #[arg(long, help = "Print the page and its pagination tokens as JSON.")]
    pub json: bool,
}

impl GridArgs {
    /// Layer the command line flags over `config`
    pub fn apply_to(&self, mut config: GridConfig) -> GridConfig {
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(siblings) = self.siblings {
            config.sibling_count = siblings;
        }
        if let Some(boundaries) = self.boundaries {
            config.boundary_count = boundaries;
        }
        config
    }

    /// Starting view state; the page is applied separately so it can be
    /// clamped against the filtered rows.
    pub fn view_state(&self, config: &GridConfig) -> ViewState {
        let mut state = config.initial_state().with_filter(self.query.clone());

        if !self.filter_keys.is_empty() {
            let keys = self.filter_keys.iter().map(|key| key.trim().to_string());
            state = state.with_filter_keys(keys);
        }

        let sort = self.sort.as_ref().map(|key| {
            if self.desc {
                SortState::descending(key.as_str())
            } else {
                SortState::ascending(key.as_str())
            }
        });
        state.with_sort(sort)
    }
}
