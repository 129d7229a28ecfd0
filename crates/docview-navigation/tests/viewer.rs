//! End-to-end viewer scenarios on a bundle written to disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use docview_navigation::{
    HashRouting, LanguageSet, Layout, LoadOutcome, MemoryLocation, NavigationController,
    NavigationEvent, PathRouting, Route, RouteCodec, RoutingMode, codec_for,
};
use docview_site::{Site, SiteOptions};
use docview_storage::{FilePreferences, FsStorage, MemoryPreferences, Preferences, Storage};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn bundle() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "manifest.json",
        r#"{"categories": [{"order": 1, "title": {"ko": "설정"}, "items": [{"slug": "setup/x", "title": {"ko": "엑스"}}]}]}"#,
    );
    write(
        dir.path(),
        "search_index.json",
        r#"[{"slug": "setup/x", "title": "Installation Guide", "desc": "Install"}]"#,
    );
    write(dir.path(), "content/v1.0/ko/setup/x.md", "# 엑스\n\n![diagram](../assets/x.png)");
    write(dir.path(), "content/v1.0/en/setup/x.md", "# X");
    write(
        dir.path(),
        "content/landing/en.json",
        r#"{"hero": {"title": "Docs", "subtitle": "Welcome"},
            "actions": {
                "manual": {"title": "Manual", "description": "Read"},
                "download": {"title": "Download", "description": "Get"},
                "email": {"title": "Email", "description": "Ask"}
            },
            "footer": {"copyright": "RBWare", "website": "rbware.example"}}"#,
    );
    dir
}

fn site(dir: &TempDir) -> Arc<Site> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(dir.path().to_path_buf()));
    Arc::new(Site::load(storage, SiteOptions::default()))
}

fn controller(
    dir: &TempDir,
    codec: Box<dyn RouteCodec>,
    href: &str,
) -> NavigationController<MemoryLocation> {
    NavigationController::new(
        site(dir),
        codec,
        MemoryLocation::new("localhost", href),
        Arc::new(MemoryPreferences::new()),
        LanguageSet::default(),
    )
}

#[test]
fn test_boot_on_fragment_shows_document() {
    let dir = bundle();
    let mut viewer = controller(&dir, Box::new(HashRouting), "/#/setup/x");

    let pending = viewer.boot();
    assert_eq!(viewer.run(pending), Some(LoadOutcome::Applied));

    assert_eq!(viewer.state().route(), Route::new("ko", "setup/x"));
    let shell = viewer.shell();
    assert_eq!(shell.layout(), Layout::Document);

    let sidebar = shell.visible_sidebar().unwrap();
    assert_eq!(sidebar.categories().len(), 1);
    let category = &sidebar.categories()[0];
    assert_eq!(category.title, "설정");
    assert!(category.expanded);
    assert_eq!(category.items.len(), 1);
    assert_eq!(category.items[0].title, "엑스");
    assert!(category.items[0].active);

    assert!(shell.content().starts_with("<h1>엑스</h1>"));
    assert!(shell.content().contains(r#"src="./assets/x.png""#));
    assert!(shell.content().contains("doc-footer"));
}

#[test]
fn test_round_trip_for_every_language_and_mode() {
    let dir = bundle();
    for mode in [RoutingMode::Hash, RoutingMode::Path] {
        let mut viewer = controller(&dir, codec_for(mode, "docs-platform"), "/");
        viewer.boot();
        for language in ["ko", "en"] {
            for slug in ["setup/x", "a", "a/b/c", ""] {
                viewer.navigate(language, slug, true);

                assert_eq!(
                    viewer.parse_current_route(),
                    Route::new(language, slug),
                    "{:?}",
                    viewer.routing_mode()
                );
            }
        }
    }
}

#[test]
fn test_language_fallback_without_localized_landing() {
    let dir = bundle();
    let mut viewer = controller(&dir, Box::new(HashRouting), "/");

    viewer.boot();

    // No ko landing file in the bundle: the en page is shown.
    assert_eq!(viewer.shell().layout(), Layout::Landing);
    assert!(viewer.shell().content().contains("Welcome"));
}

#[test]
fn test_missing_document_keeps_sidebar() {
    let dir = bundle();
    let mut viewer = controller(&dir, Box::new(HashRouting), "/#/setup/x");
    let pending = viewer.boot();
    viewer.run(pending);

    let pending = viewer.dispatch(NavigationEvent::UserSelectedSlug("setup/missing".to_owned()));
    viewer.run(pending);

    let shell = viewer.shell();
    assert_eq!(shell.layout(), Layout::Document);
    assert!(shell.content().contains("content-error"));
    assert!(shell.content().contains("v1.0/ko/setup/missing.md"));
    assert!(shell.visible_sidebar().is_some());
    assert!(shell.toast().is_some());
}

#[test]
fn test_language_preference_survives_restart() {
    let dir = bundle();
    let prefs_dir = TempDir::new().unwrap();
    let prefs_path = prefs_dir.path().join("state").join("preferences.json");

    let mut first = NavigationController::new(
        site(&dir),
        Box::new(HashRouting),
        MemoryLocation::new("localhost", "/#/setup/x"),
        Arc::new(FilePreferences::new(prefs_path.clone())),
        LanguageSet::default(),
    );
    first.boot();
    first.dispatch(NavigationEvent::LanguageChanged("en".to_owned()));

    let mut second = NavigationController::new(
        site(&dir),
        Box::new(HashRouting),
        MemoryLocation::new("localhost", "/#/setup/x"),
        Arc::new(FilePreferences::new(prefs_path.clone())),
        LanguageSet::default(),
    );
    let pending = second.boot();
    second.run(pending);

    assert_eq!(second.state().route(), Route::new("en", "setup/x"));
    assert!(second.shell().content().starts_with("<h1>X</h1>"));
    assert_eq!(
        FilePreferences::new(prefs_path).get("lang").unwrap().as_deref(),
        Some("en")
    );
}

#[test]
fn test_path_mode_unsupported_language_keeps_slug() {
    let dir = bundle();
    let mut viewer = controller(
        &dir,
        Box::new(PathRouting::new("docs-platform")),
        "/docs-platform/fr/setup/x",
    );

    let pending = viewer.boot();
    viewer.run(pending);

    assert_eq!(viewer.state().route(), Route::new("ko", "setup/x"));
    assert!(viewer.shell().content().starts_with("<h1>엑스</h1>"));
}

#[test]
fn test_malformed_location_degrades_to_default_landing() {
    let dir = bundle();
    let mut viewer = controller(&dir, Box::new(HashRouting), "/#/%FF");

    assert!(viewer.boot().is_none());

    assert_eq!(viewer.state().route(), Route::landing("ko"));
    assert_eq!(viewer.shell().layout(), Layout::Landing);
}

#[test]
fn test_search_states() {
    let dir = bundle();
    let mut viewer = controller(&dir, Box::new(HashRouting), "/");
    viewer.boot();

    let results = viewer.search("install");
    assert_eq!(results.entries()[0].title, "Installation Guide");

    assert!(!viewer.search("").is_visible());

    let results = viewer.search("zzzznomatch");
    assert!(results.is_visible());
    assert!(results.is_empty());
}
