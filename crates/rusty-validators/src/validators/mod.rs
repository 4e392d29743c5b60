//! The bundled validator plugins

pub mod date_time;
pub mod file_type;
pub mod mandatory;
pub mod multi_field;
pub mod negation;
pub mod options_value;
pub mod values_matcher;

pub use date_time::DateTimeValidator;
pub use file_type::FileTypeValidator;
pub use mandatory::MandatoryValidator;
pub use multi_field::MultiFieldValidator;
pub use negation::NegationValidator;
pub use options_value::OptionsValueValidator;
pub use values_matcher::ValuesMatcherValidator;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::Config;
    use crate::host::HostContext;
    use crate::registry::{Activator, PluginRegistry};
    use std::sync::Arc;

    /// Host with every bundled plugin registered
    pub fn host() -> HostContext {
        let registry = Arc::new(PluginRegistry::new());
        // registrations live as long as the registry in tests
        let _ = Activator::start(&registry);
        HostContext::new(registry, Config::default())
    }

    pub fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }
}
