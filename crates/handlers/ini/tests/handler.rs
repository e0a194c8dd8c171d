use anymod_ini::{ConfigUnit, IniHandler};
use anymod_resolver::{Handler, LogicalName, RegisterOptions, Resolver, ResolveError, Unit};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(dir: &TempDir, file: &str, body: &str) -> PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, body).unwrap();
    path
}

fn load(path: &Path) -> Result<ConfigUnit, ResolveError> {
    let name = LogicalName::new("fixture").unwrap();
    let handler = IniHandler::new(&name, path);
    let mut unit = handler.allocate("fixture")?;
    handler.populate(&mut unit)?;
    Ok(unit)
}

#[test]
fn single_field_is_indexable() {
    let dir = TempDir::new().unwrap();
    let unit = load(&fixture(&dir, "simple.ini", "[a]\nk=v\n")).unwrap();

    assert_eq!(&unit["a"]["k"], "v");
    assert_eq!(unit.len(), 1);
    assert_eq!(unit.get("a", "K"), Some("v"));
}

#[test]
fn duplicate_sections_collapse_to_the_last_one() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, "dup.ini", "[a]\nold = 1\n\n[b]\nx = 2\n\n[a]\nnew = 3\n");
    let unit = load(&path).unwrap();

    assert_eq!(unit.len(), 2);
    assert_eq!(unit.section_names().collect::<Vec<_>>(), ["b", "a"]);
    assert!(!unit["a"].contains("old"));
    assert_eq!(&unit["a"]["new"], "3");
}

#[test]
fn default_section_is_inherited_and_exposed() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "defaults.cfg",
        "[DEFAULT]\ntimeout = 30\nretries = 2\n\n[server]\ntimeout = 5\nhost = example.org\n",
    );
    let unit = load(&path).unwrap();

    assert!(unit.contains_section("DEFAULT"));
    assert_eq!(&unit["server"]["timeout"], "5");
    assert_eq!(&unit["server"]["retries"], "2");
    assert_eq!(unit["server"].keys().collect::<Vec<_>>(), ["timeout", "host", "retries"]);
    assert_eq!(unit["DEFAULT"].len(), 2);
}

#[test]
fn missing_section_header_is_a_content_error() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, "bad.ini", "orphan = 1\n");

    let err = load(&path).unwrap_err();
    assert_eq!(err.kind(), "Content");
    assert!(err.to_string().contains("bad.ini"));
}

#[test]
fn missing_file_is_a_content_error() {
    let dir = TempDir::new().unwrap();
    let err = load(&dir.path().join("absent.ini")).unwrap_err();
    assert_eq!(err.kind(), "Content");
}

#[test]
fn populate_twice_gives_identical_content() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, "twice.ini", "[a]\nk = v\nlist = 1\n  2\n");
    let name = LogicalName::new("twice").unwrap();
    let handler = IniHandler::new(&name, &path);

    let mut unit = handler.allocate("twice").unwrap();
    handler.populate(&mut unit).unwrap();
    let first: Vec<(String, String)> =
        unit["a"].iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();

    handler.populate(&mut unit).unwrap();
    let second: Vec<(String, String)> =
        unit["a"].iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
    assert_eq!(first, second);

    handler.reset(&mut unit).unwrap();
    assert!(unit.is_populated());
    assert_eq!(&unit["a"]["list"], "1\n2");
}

#[test]
fn clear_keeps_identity_and_drops_sections() {
    let dir = TempDir::new().unwrap();
    let mut unit = load(&fixture(&dir, "c.ini", "[a]\nk = v\n")).unwrap();

    unit.clear();
    assert!(!unit.is_populated());
    assert!(unit.is_empty());
    assert_eq!(unit.identity().name.as_str(), "fixture");
    assert!(unit.section("a").is_none());
}

#[test]
fn resolves_through_the_registry() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("app")).unwrap();
    fixture(&dir, "app/settings.cfg", "[db]\nurl = sqlite://memory\n");

    let mut resolver = Resolver::builder().search_path(dir.path()).build().unwrap();
    resolver.registry_mut().register::<IniHandler>(RegisterOptions::default()).unwrap();

    let module = resolver.resolve("app.settings").unwrap();
    assert_eq!(module.summary(), "config, 1 sections, 1 fields");

    let unit = module.read::<ConfigUnit>().unwrap();
    assert_eq!(unit.get("db", "url"), Some("sqlite://memory"));
}
