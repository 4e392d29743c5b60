use anyhow::{anyhow, Context, Result};
use rusty_validators::HostContext;

/// Pretty-printed property schema of a registered validator
pub fn render(host: &HostContext, class_name: &str) -> Result<String> {
    let schema = host.registry.property_options(class_name).ok_or_else(|| {
        let known: Vec<String> = host
            .registry
            .validators()
            .into_iter()
            .map(|info| info.class_name)
            .collect();
        anyhow!("Unknown validator {}, expected one of: {}", class_name, known.join(", "))
    })?;

    let value: serde_json::Value = serde_json::from_str(schema)
        .with_context(|| format!("Malformed property schema for {}", class_name))?;

    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn execute(host: &HostContext, class_name: &str) -> Result<()> {
    println!("{}", render(host, class_name)?);
    Ok(())
}
