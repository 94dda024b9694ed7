//! Grid layout resolver against real preference stores.

use shop_listing::{LayoutResolver, classify_viewport, is_wide_mode_available};
use shop_model::{GapToken, GridMode, ViewportClass};
use shop_persistence::{
    FilePreferenceStore, LAYOUT_PREFERENCE_KEY, MemoryPreferenceStore, PreferenceStore,
};
use tempfile::tempdir;

#[test]
fn defaults_to_compact_without_preference() {
    let resolver = LayoutResolver::mount(MemoryPreferenceStore::new(), 1300);
    let layout = resolver.layout();

    assert_eq!(layout.preferred, GridMode::Compact);
    assert_eq!(layout.viewport, ViewportClass::Xl);
    assert_eq!(layout.columns, 3);
    assert_eq!(layout.gap, GapToken::Relaxed);
    assert!(layout.wide_available);
}

#[test]
fn change_mode_persists_and_shares_across_views() {
    let store = MemoryPreferenceStore::new();
    let mut first = LayoutResolver::mount(store.clone(), 1300);
    let mut second = LayoutResolver::mount(store.clone(), 1300);

    let layout = first.change_mode(GridMode::Wide);
    assert_eq!(layout.columns, 5);
    assert_eq!(layout.gap, GapToken::Snug);
    assert_eq!(
        store.get(LAYOUT_PREFERENCE_KEY).unwrap().as_deref(),
        Some("5")
    );

    // Already-mounted views read the preference again on reload
    assert_eq!(second.preference(), GridMode::Compact);
    assert_eq!(second.reload().columns, 5);

    // A newly mounted view sees it immediately
    let third = LayoutResolver::mount(store, 1300);
    assert_eq!(third.preference(), GridMode::Wide);
}

#[test]
fn invalid_raw_mode_is_rejected() {
    let store = MemoryPreferenceStore::with_entries([(LAYOUT_PREFERENCE_KEY, "5")]);
    let mut resolver = LayoutResolver::mount(store.clone(), 1300);

    assert!(!resolver.change_mode_raw("4"));
    assert!(!resolver.change_mode_raw("huge"));
    assert_eq!(resolver.preference(), GridMode::Wide);
    assert_eq!(
        store.get(LAYOUT_PREFERENCE_KEY).unwrap().as_deref(),
        Some("5")
    );

    assert!(resolver.change_mode_raw("compact"));
    assert_eq!(resolver.preference(), GridMode::Compact);
    assert_eq!(
        store.get(LAYOUT_PREFERENCE_KEY).unwrap().as_deref(),
        Some("3")
    );
}

#[test]
fn resize_never_writes_the_preference() {
    let store = MemoryPreferenceStore::with_entries([(LAYOUT_PREFERENCE_KEY, "5")]);
    let mut resolver = LayoutResolver::mount(store.clone(), 1300);

    for width in [320, 700, 900, 1100, 1600] {
        resolver.resize(width);
        assert_eq!(
            store.get(LAYOUT_PREFERENCE_KEY).unwrap().as_deref(),
            Some("5")
        );
    }

    assert_eq!(resolver.resize(700).columns, 1);
    assert_eq!(resolver.resize(900).columns, 2);
    assert!(!resolver.is_wide_mode_available());
    assert_eq!(resolver.resize(1100).columns, 3);
    assert!(resolver.is_wide_mode_available());
    assert_eq!(resolver.resize(1300).columns, 5);
}

#[test]
fn wide_mode_is_not_offered_below_1024px() {
    assert!(!is_wide_mode_available(classify_viewport(1023)));
    assert!(is_wide_mode_available(classify_viewport(1024)));

    let store = MemoryPreferenceStore::with_entries([(LAYOUT_PREFERENCE_KEY, "5")]);
    let layout = LayoutResolver::mount(store, 800).layout();
    assert_eq!(layout.viewport, ViewportClass::Md);
    assert_eq!(layout.mode, GridMode::Compact);
    assert_eq!(layout.preferred, GridMode::Wide);
    assert_eq!(layout.columns, 2);
    assert!(!layout.wide_available);
}

#[test]
fn preference_survives_restart_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.toml");

    let mut resolver = LayoutResolver::mount(FilePreferenceStore::new(&path), 1280);
    resolver.change_mode(GridMode::Wide);
    drop(resolver);

    let reopened = LayoutResolver::mount(FilePreferenceStore::new(&path), 1280);
    assert_eq!(reopened.preference(), GridMode::Wide);
    assert_eq!(reopened.columns(), 5);
}

#[test]
fn corrupted_value_on_disk_falls_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.toml");
    std::fs::write(&path, "[preferences]\n\"shop.grid_layout\" = \"7\"\n").unwrap();

    let resolver = LayoutResolver::mount(FilePreferenceStore::new(&path), 1280);
    assert_eq!(resolver.preference(), GridMode::Compact);
    assert_eq!(resolver.columns(), 3);
}

#[test]
fn failed_write_is_reported_but_view_still_switches() {
    let dir = tempdir().unwrap();
    // A directory where the preferences file should be cannot be read or replaced
    let mut resolver = LayoutResolver::mount(FilePreferenceStore::new(dir.path()), 1300);

    let err = resolver.try_change_mode(GridMode::Wide).unwrap_err();
    assert!(err.user_message().contains("preferences file"));
    assert_eq!(resolver.preference(), GridMode::Wide);
    assert_eq!(resolver.columns(), 5);

    // The infallible variant swallows the same failure
    assert_eq!(resolver.change_mode(GridMode::Compact).columns, 3);
}
