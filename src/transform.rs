use futures::future::try_join_all;
use tracing::warn;

use crate::domain::{PrefixedId, ReactionSide, Triple};
use crate::error::FragmentError;
use crate::terms;
use crate::xml::{XmlElement, XmlNode};
use crate::xrefdb::{EntityKind, XrefClient};

struct Participant {
    index: usize,
    side: ReactionSide,
    compound_uri: String,
}

/// Converts a parsed CML reaction document into triples under `subject`.
///
/// Participants are numbered 1-based across the reactant list then the
/// product list, in document order. The title triple (when the document
/// has a `name`) comes first, then three triples per participant:
/// membership, compound, side. Compound resolution through the xref
/// database is fanned out concurrently; the output order is fixed by the
/// document, not by call completion.
///
/// Fails with a structure error on a non-`reaction` root or an unexpected
/// list child, and with a lookup error when a participant's compound
/// identifier is missing or not `namespace:localId` shaped. No partial
/// triple list is ever returned.
pub async fn transform<X: XrefClient>(
    root: &XmlElement,
    subject: &str,
    xrefs: &X,
) -> Result<Vec<Triple>, FragmentError> {
    if root.name != "reaction" {
        return Err(FragmentError::Structure(format!(
            "expected reaction root element, got {}",
            root.name
        )));
    }

    let mut title: Option<String> = None;
    let mut participants: Vec<Participant> = Vec::new();
    let mut next_index = 1usize;

    for section in root.child_elements() {
        match section.name.as_str() {
            "name" => title = Some(section.text()),
            // recognized but reserved: the RHEA:<id> identifier and the
            // Mapped/Formuled/Chemically-balanced qualifier labels
            "identifier" | "label" => {}
            "reactantList" => {
                next_index = collect_participants(
                    section,
                    "reactant",
                    ReactionSide::Left,
                    next_index,
                    &mut participants,
                )?;
            }
            "productList" => {
                next_index = collect_participants(
                    section,
                    "product",
                    ReactionSide::Right,
                    next_index,
                    &mut participants,
                )?;
            }
            other => warn!(element = other, "skipping unknown top-level element"),
        }
    }

    let resolutions = participants.iter().map(|participant| {
        let uris = vec![participant.compound_uri.clone()];
        async move { xrefs.uris_to_eri(&uris, EntityKind::Compound).await }
    });
    let compound_eris = try_join_all(resolutions).await?;

    let mut triples = Vec::with_capacity(1 + participants.len() * 3);
    if let Some(text) = title {
        triples.push(Triple::literal(
            subject,
            terms::DCTERMS_TITLE,
            text,
            terms::STRING_DATATYPE,
        ));
    }
    for (participant, compound_eri) in participants.iter().zip(compound_eris) {
        let participant_uri = terms::participant_uri(subject, participant.index);
        triples.push(Triple::uri(
            subject,
            terms::HAS_REACTION_PARTICIPANT,
            participant_uri.clone(),
        ));
        triples.push(Triple::uri(
            participant_uri.clone(),
            terms::COMPOUND,
            compound_eri,
        ));
        triples.push(Triple::uri(
            participant_uri,
            terms::REACTION_SIDE,
            participant.side.uri(),
        ));
    }
    Ok(triples)
}

fn collect_participants(
    list: &XmlElement,
    expected: &str,
    side: ReactionSide,
    mut next_index: usize,
    participants: &mut Vec<Participant>,
) -> Result<usize, FragmentError> {
    for node in &list.children {
        let XmlNode::Element(element) = node else {
            continue;
        };
        if element.name != expected {
            return Err(FragmentError::Structure(format!(
                "expected {expected} in {}, got {}",
                list.name, element.name
            )));
        }
        let compound_uri = compound_uri_of(element)?;
        participants.push(Participant {
            index: next_index,
            side,
            compound_uri,
        });
        next_index += 1;
    }
    Ok(next_index)
}

fn compound_uri_of(participant: &XmlElement) -> Result<String, FragmentError> {
    let identifier = participant
        .qualified_child(terms::CML_REACT_NS, "molecule")
        .and_then(|molecule| molecule.qualified_child(terms::CML_REACT_NS, "identifier"))
        .ok_or_else(|| {
            FragmentError::Lookup(format!("{} without molecule identifier", participant.name))
        })?;
    let value = identifier.attribute("value").ok_or_else(|| {
        FragmentError::Lookup("molecule identifier without value attribute".to_string())
    })?;
    let id: PrefixedId = value.parse()?;
    Ok(terms::compound_uri(&id.local_id))
}
