use anymod::Resolver;
use anymod::domain::config::AnymodConfig;
use anymod::handlers::{image::ImageUnit, ini::ConfigUnit, json::JsonUnit};
use anyhow::{Context, Result};

fn build(config: &AnymodConfig) -> Result<Resolver> {
    anymod::resolver(&config.resolver).context("Failed to set up the resolver")
}

/// Resolves `name` and prints what was loaded.
pub fn resolve(config: &AnymodConfig, name: &str) -> Result<()> {
    let mut resolver = build(config)?;
    let module = resolver.resolve(name).with_context(|| format!("Failed to resolve '{name}'"))?;

    println!("name:    {}", module.name());
    println!("origin:  {}", module.origin().display());
    println!("handler: {}", module.handler().short_name());
    println!("summary: {}", module.summary());

    if let Some(unit) = module.read::<ConfigUnit>() {
        println!("sections: {}", unit.section_names().collect::<Vec<_>>().join(", "));
    } else if let Some(unit) = module.read::<JsonUnit>()
        && let Ok(view) = unit.view()
    {
        println!("kind:    {}", view.kind());
    } else if let Some(unit) = module.read::<ImageUnit>() {
        println!("tags:    {}", unit.available_tags().join(", "));
    }

    Ok(())
}

/// Prints the merged extension table, native entries first.
pub fn bindings(config: &AnymodConfig) -> Result<()> {
    let resolver = build(config)?;

    for entry in resolver.merged_table() {
        println!(
            "{:<8} {:<16} {}",
            entry.extension.as_str(),
            entry.handler.short_name(),
            entry.source.as_str()
        );
    }

    Ok(())
}
