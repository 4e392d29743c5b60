// File: src/registry.rs
// Purpose: Plugin registry keyed by class name, and the activator that fills it

use crate::error::{Result, ValidatorError};
use crate::host::HostContext;
use crate::options::{OptionsBinder, StaticOptionsBinder};
use crate::properties::{PluginRef, Properties};
use crate::validator::{FormValidator, ValidatorPlugin};
use crate::validators::{
    DateTimeValidator, FileTypeValidator, MandatoryValidator, MultiFieldValidator,
    NegationValidator, OptionsValueValidator, ValuesMatcherValidator,
};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

pub type ValidatorFactory =
    Arc<dyn Fn(Properties, HostContext) -> Box<dyn FormValidator> + Send + Sync>;

pub type OptionsBinderFactory = Arc<dyn Fn(Properties) -> Box<dyn OptionsBinder> + Send + Sync>;

/// What a registration refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    Validator,
    OptionsBinder,
}

impl PluginKind {
    fn as_str(self) -> &'static str {
        match self {
            PluginKind::Validator => "validator",
            PluginKind::OptionsBinder => "options binder",
        }
    }
}

/// Handle returned by `register_*`, used to unregister
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub kind: PluginKind,
    pub class_name: String,
}

/// Listing entry for a registered validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorInfo {
    pub class_name: String,
    pub label: String,
    pub property_options: &'static str,
}

#[derive(Clone)]
struct ValidatorEntry {
    label: String,
    property_options: &'static str,
    factory: ValidatorFactory,
}

/// Named plugin services
///
/// Registration takes `&self` so a registry shared through `Arc` can be
/// started and stopped while validators hold on to it.
#[derive(Default)]
pub struct PluginRegistry {
    validators: RwLock<BTreeMap<String, ValidatorEntry>>,
    binders: RwLock<BTreeMap<String, OptionsBinderFactory>>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("validators", &read(&self.validators).keys().collect::<Vec<_>>())
            .field("binders", &read(&self.binders).keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built-in validator type
    pub fn register<V: ValidatorPlugin>(&self) -> Registration {
        self.register_validator_factory(
            V::CLASS_NAME,
            V::LABEL,
            V::PROPERTY_OPTIONS,
            Arc::new(|properties: Properties, host: HostContext| -> Box<dyn FormValidator> {
                Box::new(V::from_properties(properties, host))
            }),
        )
    }

    /// Register any validator factory; an existing entry is replaced
    pub fn register_validator_factory(
        &self,
        class_name: &str,
        label: &str,
        property_options: &'static str,
        factory: ValidatorFactory,
    ) -> Registration {
        let entry = ValidatorEntry {
            label: label.to_string(),
            property_options,
            factory,
        };
        write(&self.validators).insert(class_name.to_string(), entry);
        debug!(class_name, "validator registered");

        Registration {
            kind: PluginKind::Validator,
            class_name: class_name.to_string(),
        }
    }

    pub fn register_options_binder(&self, class_name: &str, factory: OptionsBinderFactory) -> Registration {
        write(&self.binders).insert(class_name.to_string(), factory);
        debug!(class_name, "options binder registered");

        Registration {
            kind: PluginKind::OptionsBinder,
            class_name: class_name.to_string(),
        }
    }

    /// Remove a registration; false if it was already gone
    pub fn unregister(&self, registration: &Registration) -> bool {
        let removed = match registration.kind {
            PluginKind::Validator => write(&self.validators)
                .remove(&registration.class_name)
                .is_some(),
            PluginKind::OptionsBinder => write(&self.binders)
                .remove(&registration.class_name)
                .is_some(),
        };

        if removed {
            debug!(class_name = %registration.class_name, kind = registration.kind.as_str(), "plugin unregistered");
        }
        removed
    }

    pub fn contains(&self, kind: PluginKind, class_name: &str) -> bool {
        match kind {
            PluginKind::Validator => read(&self.validators).contains_key(class_name),
            PluginKind::OptionsBinder => read(&self.binders).contains_key(class_name),
        }
    }

    /// Instantiate a configured validator
    pub fn create_validator(&self, plugin: &PluginRef, host: &HostContext) -> Result<Box<dyn FormValidator>> {
        // clone the factory out so nested lookups never run under the lock
        let factory = read(&self.validators)
            .get(&plugin.class_name)
            .map(|entry| entry.factory.clone())
            .ok_or_else(|| unknown(PluginKind::Validator, &plugin.class_name))?;

        Ok(factory(plugin.properties.clone(), host.clone()))
    }

    /// Instantiate a configured options binder
    pub fn create_options_binder(&self, plugin: &PluginRef) -> Result<Box<dyn OptionsBinder>> {
        let factory = read(&self.binders)
            .get(&plugin.class_name)
            .cloned()
            .ok_or_else(|| unknown(PluginKind::OptionsBinder, &plugin.class_name))?;

        Ok(factory(plugin.properties.clone()))
    }

    /// Registered validators, ordered by class name
    pub fn validators(&self) -> Vec<ValidatorInfo> {
        read(&self.validators)
            .iter()
            .map(|(class_name, entry)| ValidatorInfo {
                class_name: class_name.clone(),
                label: entry.label.clone(),
                property_options: entry.property_options,
            })
            .collect()
    }

    /// Registered options binder class names
    pub fn options_binders(&self) -> Vec<String> {
        read(&self.binders).keys().cloned().collect()
    }

    pub fn property_options(&self, class_name: &str) -> Option<&'static str> {
        read(&self.validators)
            .get(class_name)
            .map(|entry| entry.property_options)
    }
}

fn unknown(kind: PluginKind, class_name: &str) -> ValidatorError {
    ValidatorError::UnknownPlugin {
        kind: kind.as_str(),
        class_name: class_name.to_string(),
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Registers the bundled plugins on start and removes them on stop
#[derive(Debug)]
pub struct Activator {
    registrations: Vec<Registration>,
}

impl Activator {
    pub fn start(registry: &PluginRegistry) -> Self {
        let registrations = vec![
            registry.register::<MandatoryValidator>(),
            registry.register::<FileTypeValidator>(),
            registry.register::<DateTimeValidator>(),
            registry.register::<MultiFieldValidator>(),
            registry.register::<OptionsValueValidator>(),
            registry.register::<ValuesMatcherValidator>(),
            registry.register::<NegationValidator>(),
            registry.register_options_binder(
                StaticOptionsBinder::CLASS_NAME,
                Arc::new(|properties: Properties| -> Box<dyn OptionsBinder> {
                    Box::new(StaticOptionsBinder::from_properties(&properties))
                }),
            ),
        ];

        info!(count = registrations.len(), "validator plugins registered");
        Self { registrations }
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn stop(self, registry: &PluginRegistry) {
        for registration in &self.registrations {
            registry.unregister(registration);
        }
        info!(count = self.registrations.len(), "validator plugins unregistered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::form::{Element, ElementKind, Form};
    use crate::form_data::FormData;

    struct AlwaysValid;

    impl FormValidator for AlwaysValid {
        fn class_name(&self) -> &'static str {
            "AlwaysValid"
        }

        fn name(&self) -> &'static str {
            "Always Valid"
        }

        fn property_options(&self) -> &'static str {
            "[]"
        }

        fn element_decoration(&self) -> String {
            String::new()
        }

        fn validate(&self, _: &Form, _: &Element, _: &mut FormData, _: &[String]) -> bool {
            true
        }
    }

    #[test]
    fn test_activator_registers_and_unregisters_everything() {
        let registry = PluginRegistry::new();
        let activator = Activator::start(&registry);

        let classes: Vec<String> = registry
            .validators()
            .into_iter()
            .map(|info| info.class_name)
            .collect();
        assert_eq!(
            classes,
            vec![
                "DateTimeValidator",
                "FileTypeValidator",
                "MandatoryValidator",
                "MultiFieldValidator",
                "NegationValidator",
                "OptionsValueValidator",
                "ValuesMatcherValidator",
            ]
        );
        assert!(registry.contains(PluginKind::OptionsBinder, "StaticOptionsBinder"));
        assert_eq!(activator.registrations().len(), 8);

        activator.stop(&registry);
        assert!(registry.validators().is_empty());
        assert!(registry.options_binders().is_empty());
    }

    #[test]
    fn test_create_unknown_plugin() {
        let registry = Arc::new(PluginRegistry::new());
        let host = HostContext::new(registry.clone(), Config::default());

        let err = registry
            .create_validator(&PluginRef::new("Nope", Properties::new()), &host)
            .err()
            .unwrap();
        assert!(matches!(err, ValidatorError::UnknownPlugin { kind: "validator", .. }));

        assert!(registry
            .create_options_binder(&PluginRef::new("Nope", Properties::new()))
            .is_err());
    }

    #[test]
    fn test_custom_factory_replaces_and_unregisters() {
        let registry = Arc::new(PluginRegistry::new());
        let host = HostContext::new(registry.clone(), Config::default());

        let registration = registry.register_validator_factory(
            "AlwaysValid",
            "Always Valid",
            "[]",
            Arc::new(|_: Properties, _: HostContext| -> Box<dyn FormValidator> { Box::new(AlwaysValid) }),
        );

        let validator = registry
            .create_validator(&PluginRef::new("AlwaysValid", Properties::new()), &host)
            .unwrap();
        let form = Form::new("f");
        let element = Element::new("x", ElementKind::TextField);
        assert!(validator.validate(&form, &element, &mut FormData::new(), &[]));
        assert_eq!(registry.property_options("AlwaysValid"), Some("[]"));

        assert!(registry.unregister(&registration));
        assert!(!registry.unregister(&registration));
        assert!(!registry.contains(PluginKind::Validator, "AlwaysValid"));
    }

    #[test]
    fn test_built_in_labels() {
        let registry = PluginRegistry::new();
        let _activator = Activator::start(&registry);

        let labels: Vec<(String, String)> = registry
            .validators()
            .into_iter()
            .map(|info| (info.class_name, info.label))
            .collect();
        let expected: Vec<(String, String)> = [
            ("DateTimeValidator", "Date Time Validator"),
            ("FileTypeValidator", "File Type Validator"),
            ("MandatoryValidator", "Mandatory Validator"),
            ("MultiFieldValidator", "Multivalue Multi Field Validator"),
            ("NegationValidator", "Negation Validator"),
            ("OptionsValueValidator", "Options Value Validator"),
            ("ValuesMatcherValidator", "Values Matcher Validator"),
        ]
        .into_iter()
        .map(|(class_name, label)| (class_name.to_string(), label.to_string()))
        .collect();

        assert_eq!(labels, expected);
    }

    #[test]
    fn test_built_in_metadata() {
        let registry = Arc::new(PluginRegistry::new());
        let _activator = Activator::start(&registry);
        let host = HostContext::new(registry.clone(), Config::default());

        for info in registry.validators() {
            let validator = registry
                .create_validator(&PluginRef::new(&info.class_name, Properties::new()), &host)
                .unwrap();

            assert_eq!(validator.class_name(), info.class_name);
            assert_eq!(validator.label(), info.label);
            assert_eq!(validator.version(), env!("CARGO_PKG_VERSION"));
            assert!(!validator.description().is_empty());

            let schema: serde_json::Value = serde_json::from_str(validator.property_options()).unwrap();
            assert!(schema.is_array(), "{} schema must be an array", info.class_name);
        }
    }
}
