use anyhow::Result;
use colored::Colorize;
use rusty_validators::{HostContext, PluginRef, Properties};

/// One line per validator: class name, label and version
pub fn validator_lines(host: &HostContext) -> Vec<String> {
    host.registry
        .validators()
        .into_iter()
        .map(|info| {
            let version = host
                .registry
                .create_validator(&PluginRef::new(&info.class_name, Properties::new()), host)
                .map(|validator| validator.version())
                .unwrap_or("?");
            format!("{:<24} {:<34} {}", info.class_name, info.label, version)
        })
        .collect()
}

pub fn execute(host: &HostContext) -> Result<()> {
    println!("{}", "Validators".green().bold());
    for line in validator_lines(host) {
        println!("  {}", line);
    }

    println!();
    println!("{}", "Options binders".green().bold());
    for class_name in host.registry.options_binders() {
        println!("  {}", class_name.cyan());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusty_validators::{Activator, Config, PluginRegistry};
    use std::sync::Arc;

    #[test]
    fn test_lists_every_validator() {
        let registry = Arc::new(PluginRegistry::new());
        let _activator = Activator::start(&registry);
        let host = HostContext::new(registry, Config::default());

        let lines = validator_lines(&host);

        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("DateTimeValidator"));
        assert!(lines[0].contains("Date Time Validator"));
        assert!(lines.iter().all(|line| line.ends_with(env!("CARGO_PKG_VERSION"))));
    }
}
