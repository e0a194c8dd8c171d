mod common;

use anymod_resolver::{
    BytesUnit, HandlerType, RegisterOptions, Registry, ResolveError, Resolver, Source, TextHandler,
    TextUnit,
};
use common::{Alpha, Beta, Tagged, write};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn resolver(root: &TempDir) -> Resolver {
    Resolver::builder().search_path(root.path()).build().unwrap()
}

#[test]
fn resolves_native_text_by_dotted_name() {
    let root = TempDir::new().unwrap();
    let path = write(root.path(), "pkg/settings.txt", "alpha\nbeta\n");
    let mut resolver = resolver(&root);

    let module = resolver.resolve("pkg.settings").unwrap();
    assert_eq!(module.name().as_str(), "pkg.settings");
    assert_eq!(module.origin(), path);
    assert!(module.handler().is::<TextHandler>());
    assert!(module.is_populated());

    let text = module.read::<TextUnit>().unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(module.read::<BytesUnit>().is_none());
}

#[test]
fn second_resolution_returns_the_same_module() {
    let root = TempDir::new().unwrap();
    write(root.path(), "data.bin", "\x01\x02");
    let mut resolver = resolver(&root);

    let first = resolver.resolve("data").unwrap();
    let second = resolver.resolve("data").unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let forgotten = resolver.forget("data").unwrap();
    assert!(Arc::ptr_eq(&first, &forgotten));
    let fresh = resolver.resolve("data").unwrap();
    assert!(!Arc::ptr_eq(&first, &fresh));
    assert_eq!(fresh.read::<BytesUnit>().unwrap().bytes(), Some(&[1u8, 2][..]));
}

#[test]
fn reload_refreshes_content_in_place() {
    let root = TempDir::new().unwrap();
    let path = write(root.path(), "notes.txt", "v1");
    let mut resolver = resolver(&root);

    let module = resolver.resolve("notes").unwrap();
    fs::write(&path, "v2").unwrap();

    let reloaded = resolver.reload("notes").unwrap();
    assert!(Arc::ptr_eq(&module, &reloaded));
    assert_eq!(module.read::<TextUnit>().unwrap().text(), Some("v2"));
}

#[test]
fn reload_on_unchanged_file_is_content_equal() {
    let root = TempDir::new().unwrap();
    write(root.path(), "notes.txt", "same");
    let mut resolver = resolver(&root);

    let module = resolver.resolve("notes").unwrap();
    let before = module.read::<TextUnit>().unwrap().text().map(str::to_owned);
    module.reload().unwrap();

    assert_eq!(module.read::<TextUnit>().unwrap().text().map(str::to_owned), before);
}

#[test]
fn failed_reload_leaves_unit_cleared() {
    let root = TempDir::new().unwrap();
    let path = write(root.path(), "notes.txt", "v1");
    let mut resolver = resolver(&root);

    let module = resolver.resolve("notes").unwrap();
    fs::remove_file(&path).unwrap();

    let err = resolver.reload("notes").unwrap_err();
    assert_eq!(err.kind(), "Content");
    assert!(!module.is_populated());
}

#[test]
fn reload_of_unknown_name_is_unresolved() {
    let root = TempDir::new().unwrap();
    let mut resolver = resolver(&root);

    assert!(matches!(resolver.reload("nothing"), Err(ResolveError::UnresolvedName { .. })));
}

#[test]
fn reload_while_a_guard_is_held_fails_without_blocking() {
    let root = TempDir::new().unwrap();
    write(root.path(), "notes.txt", "v1");
    let mut resolver = resolver(&root);
    let module = resolver.resolve("notes").unwrap();

    let guard = module.read::<TextUnit>().unwrap();
    let err = module.reload().unwrap_err();
    assert_eq!(err.kind(), "Internal");
    assert_eq!(guard.text(), Some("v1"));
    drop(guard);

    module.reload().unwrap();
    assert!(module.is_populated());
}

#[test]
fn uppercase_suffixes_on_disk_are_found() {
    let root = TempDir::new().unwrap();
    write(root.path(), "pkg/Notes.TXT", "shouting");
    write(root.path(), "pkg/other.Bin", "\x07");
    let mut resolver = resolver(&root);

    let module = resolver.resolve("pkg.Notes").unwrap();
    assert!(module.handler().is::<TextHandler>());
    assert_eq!(module.read::<TextUnit>().unwrap().text(), Some("shouting"));

    let other = anymod_resolver::LogicalName::new("pkg.other").unwrap();
    let candidate = resolver.find(&other).unwrap();
    assert_eq!(candidate.extension.as_str(), ".bin");
    assert!(candidate.path.is_file());
}

#[test]
fn unresolved_and_invalid_names() {
    let root = TempDir::new().unwrap();
    let mut resolver = resolver(&root);

    assert!(matches!(resolver.resolve("missing"), Err(ResolveError::UnresolvedName { .. })));
    assert!(matches!(resolver.resolve("../etc/passwd"), Err(ResolveError::InvalidName { .. })));
    assert!(resolver.cached_names().is_empty());
}

#[test]
fn populate_failure_is_not_cached() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("broken.txt"), [0xff, 0xfe, 0x00]).unwrap();
    let mut resolver = resolver(&root);

    let err = resolver.resolve("broken").unwrap_err();
    assert_eq!(err.kind(), "Content");
    assert!(resolver.cached("broken").is_none());
}

#[test]
fn open_binding_adds_a_new_extension() {
    let root = TempDir::new().unwrap();
    write(root.path(), "widget.tag", "  hello  ");

    let mut registry = Registry::new();
    registry.activate([]);
    registry.register::<Alpha>(RegisterOptions::default()).unwrap();
    let mut resolver = Resolver::builder().search_path(root.path()).registry(registry).build().unwrap();

    let module = resolver.resolve("widget").unwrap();
    let unit = module.read::<Tagged>().unwrap();
    assert_eq!(unit.flavour, 1);
    assert_eq!(unit.text.as_deref(), Some("hello"));
}

#[test]
fn bindings_added_after_build_are_honored() {
    let root = TempDir::new().unwrap();
    write(root.path(), "late.tag", "x");
    let mut resolver = resolver(&root);

    assert!(matches!(resolver.resolve("late"), Err(ResolveError::UnresolvedName { .. })));

    resolver.registry_mut().register::<Beta>(RegisterOptions::default()).unwrap();
    assert_eq!(resolver.resolve("late").unwrap().read::<Tagged>().unwrap().flavour, 2);
}

#[test]
fn protected_binding_shadows_native_handler() {
    let root = TempDir::new().unwrap();
    write(root.path(), "notes.txt", "shadowed");
    let mut resolver = resolver(&root);

    assert_eq!(resolver.handler_for("txt"), Some((HandlerType::of::<TextHandler>(), Source::Native)));

    let options = RegisterOptions::new().extensions([".txt"]).override_existing(true).override_protected(true);
    resolver.registry_mut().register::<Alpha>(options).unwrap();

    assert_eq!(resolver.handler_for(".TXT"), Some((HandlerType::of::<Alpha>(), Source::Protected)));
    let module = resolver.resolve("notes").unwrap();
    assert_eq!(module.read::<Tagged>().unwrap().text.as_deref(), Some("shadowed"));

    resolver.registry_mut().unregister("txt");
    assert_eq!(resolver.handler_for("txt").unwrap().1, Source::Native);
}

#[test]
fn merged_table_reports_sources_in_probe_order() {
    let root = TempDir::new().unwrap();
    let mut resolver = resolver(&root);
    resolver.registry_mut().register::<Beta>(RegisterOptions::new().extensions(["zeta", "alpha"])).unwrap();
    resolver
        .registry_mut()
        .register::<Alpha>(RegisterOptions::new().extensions(["bin"]).override_existing(true).override_protected(true))
        .unwrap();

    let table: Vec<_> = resolver
        .merged_table()
        .into_iter()
        .map(|e| (e.extension.to_string(), e.source))
        .collect();

    assert_eq!(
        table,
        [
            (".txt".to_owned(), Source::Native),
            (".bin".to_owned(), Source::Protected),
            (".zeta".to_owned(), Source::Open),
            (".alpha".to_owned(), Source::Open),
        ]
    );
}

#[test]
fn earlier_search_path_wins_then_native_extension_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write(first.path(), "doc.bin", "first");
    write(second.path(), "doc.txt", "second");
    write(first.path(), "pair.txt", "text");
    write(first.path(), "pair.bin", "bytes");

    let resolver = Resolver::builder()
        .search_path(first.path())
        .search_path(second.path())
        .build()
        .unwrap();

    let name = anymod_resolver::LogicalName::new("doc").unwrap();
    assert!(resolver.find(&name).unwrap().path.starts_with(first.path()));

    let pair = anymod_resolver::LogicalName::new("pair").unwrap();
    assert_eq!(resolver.find(&pair).unwrap().extension.as_str(), ".txt");
}

#[test]
fn resolve_file_uses_extension_of_explicit_path() {
    let root = TempDir::new().unwrap();
    let path = write(root.path(), "elsewhere/raw.bin", "abc");
    let mut resolver = resolver(&root);

    let module = resolver.resolve_file("payload", &path).unwrap();
    assert_eq!(module.name().as_str(), "payload");
    assert!(Arc::ptr_eq(&module, &resolver.cached("payload").unwrap()));

    let unknown = write(root.path(), "x.unknown", "");
    assert!(matches!(
        resolver.resolve_file("x", &unknown),
        Err(ResolveError::UnresolvedName { .. })
    ));
}

#[test]
fn native_table_can_be_extended_at_build() {
    let root = TempDir::new().unwrap();
    write(root.path(), "readme.md", "# title");

    let mut resolver = Resolver::builder()
        .search_path(root.path())
        .native::<TextHandler>("md")
        .build()
        .unwrap();

    assert!(resolver.registry().is_reserved(".md"));
    assert_eq!(resolver.resolve("readme").unwrap().read::<TextUnit>().unwrap().text(), Some("# title"));

    let err = resolver.registry_mut().register::<Alpha>(RegisterOptions::new().extensions(["md"])).unwrap_err();
    assert!(matches!(err, ResolveError::ProtectedExtension { .. }));
}

#[test]
fn typed_write_access_mutates_shared_unit() {
    let root = TempDir::new().unwrap();
    write(root.path(), "w.tag", "before");
    let mut resolver = resolver(&root);
    resolver.registry_mut().register::<Alpha>(RegisterOptions::default()).unwrap();

    let module = resolver.resolve("w").unwrap();
    module.write::<Tagged>().unwrap().text = Some("after".to_owned());

    let again = resolver.resolve("w").unwrap();
    assert_eq!(again.read::<Tagged>().unwrap().text.as_deref(), Some("after"));
    assert_eq!(again.summary(), "tagged #1");
}

#[test]
fn empty_search_path_list_is_rejected() {
    let err = Resolver::builder().search_paths(Vec::<std::path::PathBuf>::new()).build().unwrap_err();
    assert_eq!(err.kind(), "Internal");
}
