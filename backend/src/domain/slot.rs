/// Slot descriptors as configured by page templates
use super::base::{DomainError, DomainResult};
use super::value_objects::{RepetitionPolicy, SlotName};
use std::collections::BTreeMap;

/// A content slot of a template and the repetition policy it was configured with.
///
/// The policy is kept as written in the template configuration; it is only
/// resolved when a converter is requested for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDescriptor {
    name: SlotName,
    repeated: String,
}

impl SlotDescriptor {
    pub fn new(name: SlotName, policy: RepetitionPolicy) -> Self {
        SlotDescriptor {
            name,
            repeated: policy.as_str().to_string(),
        }
    }

    /// Build a descriptor from raw template configuration
    pub fn from_config(name: impl Into<String>, repeated: impl Into<String>) -> DomainResult<Self> {
        Ok(SlotDescriptor {
            name: SlotName::new(name)?,
            repeated: repeated.into(),
        })
    }

    pub fn name(&self) -> &SlotName {
        &self.name
    }

    /// The configured policy name
    pub fn repeated(&self) -> &str {
        &self.repeated
    }

    /// Resolve the configured policy
    pub fn policy(&self) -> DomainResult<RepetitionPolicy> {
        self.repeated.parse()
    }
}

/// The slots declared by one template, keyed by slot name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSlots {
    template_name: String,
    slots: BTreeMap<SlotName, SlotDescriptor>,
}

impl TemplateSlots {
    pub fn new(
        template_name: impl Into<String>,
        descriptors: impl IntoIterator<Item = SlotDescriptor>,
    ) -> DomainResult<Self> {
        let template_name = template_name.into();
        let mut slots = BTreeMap::new();
        for descriptor in descriptors {
            if slots.contains_key(descriptor.name()) {
                return Err(DomainError::InvalidValue(format!(
                    "Slot {} is declared twice in template {}",
                    descriptor.name(),
                    template_name
                )));
            }
            slots.insert(descriptor.name().clone(), descriptor);
        }

        Ok(TemplateSlots {
            template_name,
            slots,
        })
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn get(&self, name: &str) -> Option<&SlotDescriptor> {
        self.slots.values().find(|slot| slot.name().as_str() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotDescriptor> {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
