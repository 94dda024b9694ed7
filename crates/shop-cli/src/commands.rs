use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::Table;
use serde::Serialize;
use tracing::{info, info_span};

use shop_listing::{
    FilterStore, LayoutResolver, PAGE_SIZE_OPTIONS, PageChange, PageSummary, Paginator,
    QueryHistory, QueryParams,
};
use shop_model::{ActiveFilter, FilterState, GridLayout, GridMode, PageToken};
use shop_persistence::FilePreferenceStore;

use crate::cli::{FiltersArgs, LayoutArgs, PagesArgs, mode_choices};
use crate::output::{apply_table_style, print_json, render_tokens};
use shop_cli::settings::Settings;

// =============================================================================
// FILTERS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct FiltersReport {
    pub state: FilterState,
    pub query: QueryParams,
    pub has_active_filters: bool,
    pub active_filters: Vec<ActiveFilter>,
    /// Number of query publications the changes produced.
    pub publications: usize,
}

pub fn run_filters(args: FiltersArgs, settings: &Settings, json: bool) -> Result<()> {
    let report = build_filters_report(args, settings.listing.search_debounce())?;
    if json {
        return print_json(&report);
    }

    let mut table = Table::new();
    table.set_header(vec!["Field", "Value", "Query"]);
    apply_table_style(&mut table);
    let state = &report.state;
    let rows = [
        ("search", format!("{:?}", state.search)),
        (
            "min_price",
            state.min_price.map(|p| p.to_string()).unwrap_or_default(),
        ),
        (
            "max_price",
            state.max_price.map(|p| p.to_string()).unwrap_or_default(),
        ),
        ("in_stock", state.in_stock_only.to_string()),
        ("sort", state.sort.label().to_string()),
        ("page", state.page.to_string()),
        ("limit", state.page_size.to_string()),
    ];
    for (key, value) in rows {
        let query = report.query.get(key).cloned().unwrap_or_default();
        table.add_row(vec![key.to_string(), value, query]);
    }
    println!("{table}");

    if report.active_filters.is_empty() {
        println!("No active filters");
    } else {
        let labels: Vec<&str> = report
            .active_filters
            .iter()
            .map(|active| active.label.as_str())
            .collect();
        println!("Active filters: {}", labels.join(" · "));
    }
    Ok(())
}

/// Replay the requested changes through a filter store.
///
/// Order: `--set` (one atomic update), `--clear`, typed search, `--page`,
/// `--reset`.
pub fn build_filters_report(args: FiltersArgs, debounce: Duration) -> Result<FiltersReport> {
    let span = info_span!("filters");
    let _guard = span.enter();

    let params: QueryParams = args.query.into_iter().collect();
    let mut store = FilterStore::initialize(&params, QueryHistory::new())
        .with_search_debounce(debounce);

    if !args.set.is_empty() {
        store.update_multiple_filters(args.set);
    }
    for key in args.clear {
        store.clear_filter(key);
    }
    if !args.keystrokes.is_empty() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("start search timer runtime")?;
        runtime.block_on(async {
            for text in args.keystrokes {
                store.queue_search(text);
            }
            store.settle_search().await;
        });
    }
    if let Some(page) = args.page {
        store.set_page(page);
    }
    if args.reset {
        store.reset_filters();
    }

    info!(
        publications = store.publisher().len(),
        "Applied filter changes"
    );

    Ok(FiltersReport {
        state: store.state().clone(),
        query: store.query(),
        has_active_filters: store.has_active_filters(),
        active_filters: store.active_filters(),
        publications: store.publisher().len(),
    })
}

// =============================================================================
// PAGES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PagesReport {
    pub current: u32,
    pub total_pages: u32,
    pub window: Vec<PageToken>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationReport>,
}

#[derive(Debug, Serialize)]
pub struct NavigationReport {
    pub requested: u32,
    pub page: u32,
    pub scroll_to_top: bool,
}

pub fn run_pages(args: &PagesArgs, settings: &Settings, json: bool) -> Result<()> {
    let report = build_pages_report(args, settings.listing.max_visible_pages)?;
    if json {
        return print_json(&report);
    }

    println!("{}", render_tokens(&report.window));
    if let Some(summary) = &report.summary {
        println!("{summary}");
    }
    println!(
        "Previous: {}  Next: {}",
        enabled(report.can_go_previous),
        enabled(report.can_go_next)
    );
    if let Some(nav) = &report.navigation {
        if nav.scroll_to_top {
            println!("Go to {}: moved to page {}", nav.requested, nav.page);
        } else {
            println!("Go to {}: ignored, staying on page {}", nav.requested, nav.page);
        }
    }
    Ok(())
}

pub fn build_pages_report(args: &PagesArgs, default_max_visible: u32) -> Result<PagesReport> {
    let max_visible = args.max_visible.unwrap_or(default_max_visible);

    if !PAGE_SIZE_OPTIONS.contains(&args.page_size) {
        bail!(
            "page size {} is not offered (choose from {})",
            args.page_size,
            page_size_choices()
        );
    }

    let mut paginator = match (args.total, args.items) {
        (Some(total), _) => Paginator::new(args.current, total, args.has_more),
        (None, Some(items)) => Paginator::from_total_items(args.current, args.page_size, items),
        (None, None) => bail!("either --total or --items is required"),
    }
    .with_max_visible(max_visible);

    let navigation = args.goto.map(|requested| {
        let PageChange {
            page,
            scroll_to_top,
        } = paginator.go_to(requested);
        NavigationReport {
            requested,
            page,
            scroll_to_top,
        }
    });

    let summary = args
        .items
        .filter(|_| args.total.is_none())
        .map(|items| PageSummary::new(paginator.current(), args.page_size, items).to_string());

    Ok(PagesReport {
        current: paginator.current(),
        total_pages: paginator.total_pages(),
        window: paginator.window(),
        can_go_previous: paginator.can_go_previous(),
        can_go_next: paginator.can_go_next(),
        summary,
        navigation,
    })
}

fn page_size_choices() -> String {
    PAGE_SIZE_OPTIONS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn enabled(flag: bool) -> &'static str {
    if flag { "enabled" } else { "disabled" }
}

// =============================================================================
// LAYOUT
// =============================================================================

pub fn run_layout_show(args: &LayoutArgs, settings: &Settings, json: bool) -> Result<()> {
    let resolver = LayoutResolver::mount(preference_store(args, settings), args.width);
    print_layout(&resolver.layout(), json)
}

pub fn run_layout_set(mode: &str, args: &LayoutArgs, settings: &Settings, json: bool) -> Result<()> {
    let layout = apply_layout_mode(mode, args, settings)?;
    print_layout(&layout, json)
}

/// Persist `mode` and return the layout it produces at the requested width.
pub fn apply_layout_mode(mode: &str, args: &LayoutArgs, settings: &Settings) -> Result<GridLayout> {
    let mode: GridMode = mode
        .parse()
        .with_context(|| format!("expected {}", mode_choices()))?;
    let store = preference_store(args, settings);
    let path = store.path().to_path_buf();
    let mut resolver = LayoutResolver::mount(store, args.width);
    let layout = resolver
        .try_change_mode(mode)
        .map_err(|e| anyhow!(e.user_message()))?;
    info!(path = %path.display(), %mode, "Saved grid layout preference");
    Ok(layout)
}

fn preference_store(args: &LayoutArgs, settings: &Settings) -> FilePreferenceStore {
    match &args.preferences {
        Some(path) => FilePreferenceStore::new(path),
        None => settings.preference_store(),
    }
}

fn print_layout(layout: &GridLayout, json: bool) -> Result<()> {
    if json {
        return print_json(layout);
    }

    let mut table = Table::new();
    table.set_header(vec!["Property", "Value"]);
    apply_table_style(&mut table);
    table.add_row(vec!["Viewport".to_string(), layout.viewport.to_string()]);
    table.add_row(vec!["Preferred mode".to_string(), layout.preferred.to_string()]);
    table.add_row(vec!["Rendered mode".to_string(), layout.mode.to_string()]);
    table.add_row(vec!["Columns".to_string(), layout.columns.to_string()]);
    table.add_row(vec!["Gap".to_string(), layout.gap.css_class().to_string()]);
    table.add_row(vec![
        "Wide available".to_string(),
        layout.wide_available.to_string(),
    ]);
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_model::{FilterKey, FilterUpdate, Price};

    fn filters_args() -> FiltersArgs {
        FiltersArgs {
            query: Vec::new(),
            set: Vec::new(),
            clear: Vec::new(),
            keystrokes: Vec::new(),
            page: None,
            reset: false,
        }
    }

    fn pages_args() -> PagesArgs {
        PagesArgs {
            current: 1,
            total: None,
            items: None,
            page_size: 12,
            has_more: false,
            goto: None,
            max_visible: None,
        }
    }

    #[test]
    fn test_set_resets_page() {
        let args = FiltersArgs {
            query: vec![("page".to_string(), "3".to_string())],
            set: vec![FilterUpdate::MinPrice(Price::new(500.0))],
            ..filters_args()
        };
        let report = build_filters_report(args, Duration::from_millis(1)).unwrap();

        assert_eq!(report.state.page, 1);
        assert_eq!(report.query.get("min_price").map(String::as_str), Some("500"));
        assert!(!report.query.contains_key("page"));
        assert_eq!(report.publications, 1);
    }

    #[test]
    fn test_clear_and_page() {
        let args = FiltersArgs {
            query: vec![
                ("in_stock".to_string(), "true".to_string()),
                ("sort".to_string(), "title".to_string()),
            ],
            clear: vec![FilterKey::Sort],
            page: Some(4),
            ..filters_args()
        };
        let report = build_filters_report(args, Duration::from_millis(1)).unwrap();

        assert_eq!(report.state.page, 4);
        assert!(report.has_active_filters);
        assert_eq!(report.active_filters.len(), 1);
        assert_eq!(report.publications, 2);
    }

    #[test]
    fn test_typed_search_applies_last_keystroke() {
        let args = FiltersArgs {
            keystrokes: vec!["r".to_string(), "ru".to_string(), "rug".to_string()],
            ..filters_args()
        };
        let report = build_filters_report(args, Duration::from_millis(1)).unwrap();

        assert_eq!(report.state.search, "rug");
        assert_eq!(report.publications, 1);
    }

    #[test]
    fn test_pages_from_items() {
        let args = PagesArgs {
            current: 2,
            items: Some(57),
            ..pages_args()
        };
        let report = build_pages_report(&args, 5).unwrap();

        assert_eq!(report.total_pages, 5);
        assert_eq!(report.summary.as_deref(), Some("Showing 13–24 of 57"));
        assert!(report.can_go_next);
    }

    #[test]
    fn test_pages_goto_out_of_range() {
        let args = PagesArgs {
            current: 2,
            total: Some(5),
            has_more: true,
            goto: Some(999),
            ..pages_args()
        };
        let report = build_pages_report(&args, 5).unwrap();
        let nav = report.navigation.unwrap();

        assert_eq!(nav.page, 2);
        assert!(!nav.scroll_to_top);
        assert_eq!(report.current, 2);
    }

    #[test]
    fn test_pages_rejects_unoffered_page_size() {
        let args = PagesArgs {
            items: Some(57),
            page_size: 20,
            ..pages_args()
        };
        let err = build_pages_report(&args, 5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "page size 20 is not offered (choose from 12, 24, 48)"
        );

        let args = PagesArgs {
            items: Some(57),
            page_size: 24,
            ..pages_args()
        };
        assert_eq!(build_pages_report(&args, 5).unwrap().total_pages, 3);
    }

    #[test]
    fn test_pages_from_items_on_last_page() {
        let args = PagesArgs {
            current: 5,
            items: Some(57),
            ..pages_args()
        };
        let report = build_pages_report(&args, 5).unwrap();

        assert!(!report.can_go_next);
        assert!(report.can_go_previous);
        assert_eq!(report.summary.as_deref(), Some("Showing 49–57 of 57"));
    }

    #[test]
    fn test_layout_mode_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let args = LayoutArgs {
            width: 1300,
            preferences: Some(dir.path().join("prefs.toml")),
        };
        let layout = apply_layout_mode("wide", &args, &Settings::default()).unwrap();
        assert_eq!(layout.columns, 5);

        let narrow = LayoutArgs {
            width: 800,
            ..args
        };
        let layout = apply_layout_mode("5", &narrow, &Settings::default()).unwrap();
        assert_eq!(layout.columns, 2);
        assert!(!layout.wide_available);
    }

    #[test]
    fn test_layout_rejects_unknown_mode() {
        let dir = tempfile::tempdir().unwrap();
        let args = LayoutArgs {
            width: 1300,
            preferences: Some(dir.path().join("prefs.toml")),
        };
        let err = apply_layout_mode("huge", &args, &Settings::default()).unwrap_err();
        assert!(format!("{err:#}").contains("compact (3), wide (5)"));
        assert!(!dir.path().join("prefs.toml").exists());
    }

    #[test]
    fn test_layout_write_failure_uses_user_message() {
        let dir = tempfile::tempdir().unwrap();
        let args = LayoutArgs {
            width: 1300,
            preferences: Some(dir.path().to_path_buf()),
        };
        let err = apply_layout_mode("wide", &args, &Settings::default()).unwrap_err();
        assert!(err.to_string().starts_with("Could not read the preferences file"));
    }

    #[test]
    fn test_pages_requires_a_total() {
        assert!(build_pages_report(&pages_args(), 5).is_err());
    }
}
