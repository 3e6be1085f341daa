use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use std::path::Path;

/// Load build configuration with cascading precedence:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (FLINT_*)
/// 3. Configuration file
/// 4. Defaults (lowest priority)
pub fn load_build_config(args: &ArgMatches) -> Result<flint_core::Config> {
    let config_file = args
        .get_one::<String>("config")
        .cloned()
        .unwrap_or_else(|| "./flint.toml".to_string());

    let mut builder = ConfigBuilder::builder();

    // 1. Start with defaults
    builder = builder.add_source(config::Config::try_from(&flint_core::Config::default())?);

    // 2. Add configuration file if it exists
    if Path::new(&config_file).exists() {
        builder = builder.add_source(File::with_name(&config_file.replace(".toml", "")));
    }

    // 3. Add environment variables with FLINT_ prefix
    builder = builder.add_source(Environment::with_prefix("FLINT").prefix_separator("_"));

    // 4. Override with CLI arguments that were actually passed
    let mut cli_overrides = std::collections::HashMap::new();

    if let Some(content) = args.get_one::<String>("content") {
        cli_overrides.insert("content".to_string(), content.clone());
    }
    if let Some(static_dir) = args.get_one::<String>("static") {
        cli_overrides.insert("static".to_string(), static_dir.clone());
    }
    if let Some(output) = args.get_one::<String>("output") {
        cli_overrides.insert("output".to_string(), output.clone());
    }
    if let Some(template) = args.get_one::<String>("template") {
        cli_overrides.insert("template".to_string(), template.clone());
    }

    if !cli_overrides.is_empty() {
        builder = builder.add_source(config::Config::try_from(&cli_overrides)?);
    }

    // Build and deserialize
    let config = builder.build()?;
    let flint_config: flint_core::Config = config.try_deserialize()?;

    Ok(flint_config)
}
