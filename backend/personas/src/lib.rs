//! `expertdesk-personas` — the fixed table of expert personas.
//!
//! Each persona bundles a system prompt that conditions the completion
//! provider, plus the short description front-ends show next to it.

pub mod notice;
pub mod persona;
pub mod prompts;
pub mod registry;

pub use notice::{disclaimer_text, DISCLAIMER, OVERVIEW};
pub use persona::{Persona, PersonaDescriptor};
pub use registry::{descriptors, list_ids, lookup, resolve_alias};
