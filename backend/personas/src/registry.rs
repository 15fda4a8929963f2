//! Lookup over the fixed persona table.
//!
//! Pure functions over `'static` data; safe to call from any thread.

use expertdesk_core::ConsultError;

use crate::persona::{Persona, PersonaDescriptor, DESCRIPTORS};

/// Resolve one of the canonical persona ids to its descriptor.
pub fn lookup(persona_id: &str) -> Result<&'static PersonaDescriptor, ConsultError> {
    Persona::from_id(persona_id)
        .map(|p| p.descriptor())
        .ok_or_else(|| ConsultError::UnknownPersona(persona_id.to_string()))
}

/// Map a front-end alias (slug, padded id) to its canonical id.
///
/// Input that names no persona is returned unchanged so [`lookup`] can reject it.
pub fn resolve_alias(input: &str) -> &str {
    input.parse::<Persona>().map(|p| p.id()).unwrap_or(input)
}

/// Canonical persona ids in presentation order.
pub fn list_ids() -> Vec<&'static str> {
    DESCRIPTORS.iter().map(|d| d.id).collect()
}

/// All descriptors in presentation order.
pub fn descriptors() -> &'static [PersonaDescriptor] {
    &DESCRIPTORS
}
