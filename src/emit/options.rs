//! Emission options passed through to fragment generators
//!
//! The core does not interpret any of these values; they exist so drivers
//! can configure their fragment generators once and have the emitter hand
//! them along with every node.

use crate::order::RelevantTypes;

/// Configuration handed verbatim to the node fragment generator
///
/// # Example
///
/// ```
/// use taxis::EmitOptions;
///
/// let options = EmitOptions::default()
///     .with_suppressed_attribute("Description")
///     .with_generate_namespace_zero(true);
/// assert!(options.is_suppressed("Description"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Attributes the generator should omit from node fragments
    suppressed_attributes: Vec<String>,
    /// Whether base-namespace nodes get full fragments or are assumed
    /// preexisting in the target environment
    generate_namespace_zero: bool,
    /// The ordering-relevant type set, for generators that special-case
    /// structural references
    relevant_types: RelevantTypes,
}

impl EmitOptions {
    /// Adds an attribute name to suppress in generated node fragments
    pub fn with_suppressed_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.suppressed_attributes.push(attribute.into());
        self
    }

    /// Sets whether base-namespace nodes get full fragments
    pub fn with_generate_namespace_zero(mut self, generate: bool) -> Self {
        self.generate_namespace_zero = generate;
        self
    }

    /// Sets the relevant-type set handed to the node generator
    pub fn with_relevant_types(mut self, relevant_types: RelevantTypes) -> Self {
        self.relevant_types = relevant_types;
        self
    }

    /// Returns the suppressed attribute names
    pub fn suppressed_attributes(&self) -> &[String] {
        &self.suppressed_attributes
    }

    /// Returns true if the attribute should be omitted from fragments
    pub fn is_suppressed(&self, attribute: &str) -> bool {
        self.suppressed_attributes.iter().any(|a| a == attribute)
    }

    /// Returns true if base-namespace nodes get full fragments
    pub fn generate_namespace_zero(&self) -> bool {
        self.generate_namespace_zero
    }

    /// Returns the ordering-relevant type set
    pub fn relevant_types(&self) -> &RelevantTypes {
        &self.relevant_types
    }
}
