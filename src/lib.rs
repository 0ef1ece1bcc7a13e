//! Triple-pattern-fragment backend for Rhea: answers partial-graph queries
//! about chemical reactions by translating between enrichment identifiers
//! and Rhea's native ids, fetching CML reaction documents and turning them
//! into triples with synthesized participant URIs.

pub mod config;
pub mod domain;
pub mod error;
pub mod forward;
pub mod reverse;
pub mod rhea;
pub mod terms;
pub mod transform;
pub mod xml;
pub mod xrefdb;
