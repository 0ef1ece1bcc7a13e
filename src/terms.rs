//! URIs and namespaces shared by the transformer and the resolvers.

/// Namespace of the CML dialect Rhea uses for reaction documents.
pub const CML_REACT_NS: &str = "http://www.xml-cml.org/schema/cml2/react";

pub const HAS_REACTION_PARTICIPANT: &str = "http://w3id.org/synbio/ont#hasReactionParticipant";
pub const COMPOUND: &str = "http://w3id.org/synbio/ont#compound";
pub const REACTION_SIDE: &str = "http://w3id.org/synbio/ont#reactionSide";
pub const LEFT_SIDE: &str = "http://w3id.org/synbio/ont#LeftSide";
pub const RIGHT_SIDE: &str = "http://w3id.org/synbio/ont#RightSide";

pub const DCTERMS_TITLE: &str = "http://purl.org/dc/terms/title";

/// Datatype tag attached to title literals.
pub const STRING_DATATYPE: &str = "string";

/// Canonical compound URI for a bare CHEBI local id (the part after `CHEBI:`).
pub fn compound_uri(local_id: &str) -> String {
    format!("http://purl.obolibrary.org/obo/CHEBI_{local_id}")
}

/// Participants get no URI of their own in Rhea, so one is synthesized
/// under the reaction subject. Indices are 1-based and document-ordered.
pub fn participant_uri(subject: &str, index: usize) -> String {
    format!("{subject}#participant{index}")
}
