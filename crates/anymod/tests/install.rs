use anymod::handlers::{image::ImageUnit, ini::ConfigUnit, json::JsonUnit};
use anymod::{HandlerSet, RegisterOptions, ResolveError, Resolver, ResolverSettings, Source, Tier};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn tiff_fixture() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../handlers/image/tests/fixtures/tagged.tiff"))
}

#[test]
fn all_features_are_enabled_by_default() {
    assert_eq!(anymod::features::ENABLED, ["ini", "json", "image"]);
    assert!(anymod::features::is_enabled("json"));
    assert!(!anymod::features::is_enabled("yaml"));
}

#[test]
fn install_binds_declared_extensions_in_the_open_tier() {
    let mut resolver = Resolver::builder().search_path(".").build().unwrap();
    let installed = anymod::install(resolver.registry_mut(), HandlerSet::ALL).unwrap();

    assert_eq!(installed, ["ini", "json", "image"]);
    for ext in [".ini", ".cfg", ".json", ".jpg", ".jpeg", ".png", ".bmp", ".tif", ".tiff"] {
        assert_eq!(resolver.registry().binding(ext).map(|b| b.tier), Some(Tier::Open), "{ext}");
    }
    assert_eq!(resolver.handler_for("txt").unwrap().1, Source::Native);
}

#[test]
fn install_only_the_requested_subset() {
    let mut resolver = Resolver::builder().search_path(".").build().unwrap();
    anymod::install(resolver.registry_mut(), HandlerSet::JSON).unwrap();

    assert_eq!(resolver.registry().len(), 1);
    assert!(resolver.registry().lookup("ini").is_none());
}

#[test]
fn installing_twice_reports_the_occupied_extension() {
    let mut resolver = Resolver::builder().search_path(".").build().unwrap();
    anymod::install(resolver.registry_mut(), HandlerSet::INI).unwrap();

    let err = anymod::install(resolver.registry_mut(), HandlerSet::INI).unwrap_err();
    assert!(matches!(err, ResolveError::OccupiedExtension { .. }));
}

#[test]
fn one_search_path_mixed_formats() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("settings.ini"), "[main]\nmode = fast\n").unwrap();
    fs::write(root.path().join("data.json"), "[1, 2, 3]").unwrap();
    fs::copy(tiff_fixture(), root.path().join("photo.tiff")).unwrap();

    let settings =
        ResolverSettings { search_paths: vec![root.path().to_path_buf()], handlers: HandlerSet::ALL };
    let mut resolver = anymod::resolver(&settings).unwrap();

    let settings = resolver.resolve("settings").unwrap();
    assert_eq!(settings.read::<ConfigUnit>().unwrap().get("main", "mode"), Some("fast"));

    let data = resolver.resolve("data").unwrap();
    assert_eq!(data.read::<JsonUnit>().unwrap().len().unwrap(), 3);

    let photo = resolver.resolve("photo").unwrap();
    assert_eq!(photo.read::<ImageUnit>().unwrap().channels(), 3);

    assert_eq!(resolver.cached_names().len(), 3);
}

#[test]
fn third_party_handler_can_shadow_a_reference_one() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("notes.json"), "not json at all").unwrap();

    let mut resolver = Resolver::builder().search_path(root.path()).build().unwrap();
    anymod::install(resolver.registry_mut(), HandlerSet::JSON).unwrap();
    assert_eq!(resolver.resolve("notes").unwrap_err().kind(), "Content");

    let options = RegisterOptions::new().extensions([".json"]).override_existing(true);
    resolver.registry_mut().register::<anymod::TextHandler>(options).unwrap();

    let module = resolver.resolve("notes").unwrap();
    assert_eq!(module.read::<anymod::TextUnit>().unwrap().text(), Some("not json at all"));
}
