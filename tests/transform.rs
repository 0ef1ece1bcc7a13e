use std::fs;

use assert_matches::assert_matches;
use async_trait::async_trait;

use rhea_fragments::error::FragmentError;
use rhea_fragments::terms;
use rhea_fragments::transform::transform;
use rhea_fragments::xml::parse_document;
use rhea_fragments::xrefdb::{EntityKind, XrefClient};

const SUBJECT: &str = "http://example.org/eri/abc";

/// Deterministic resolver: the ERI is derived from the last path segment
/// of the native URI, so `.../CHEBI_30616` becomes `.../eri/CHEBI_30616`.
struct MockXrefs;

#[async_trait]
impl XrefClient for MockXrefs {
    async fn uris_to_eri(
        &self,
        uris: &[String],
        _kind: EntityKind,
    ) -> Result<String, FragmentError> {
        let tail = uris[0].rsplit('/').next().unwrap();
        Ok(format!("http://example.org/eri/{tail}"))
    }

    async fn eri_to_uris(&self, _eri: &str) -> Result<Vec<String>, FragmentError> {
        Err(FragmentError::XrefHttp("not used".to_string()))
    }
}

fn fixture() -> String {
    fs::read_to_string("tests/fixtures/rhea_18529.xml").unwrap()
}

#[tokio::test]
async fn reaction_18529_yields_thirteen_triples_in_order() {
    let root = parse_document(&fixture()).unwrap();
    let triples = transform(&root, SUBJECT, &MockXrefs).await.unwrap();

    assert_eq!(triples.len(), 13);

    let title = &triples[0];
    assert_eq!(title.subject, SUBJECT);
    assert_eq!(title.predicate, terms::DCTERMS_TITLE);
    assert_eq!(title.object, "ATP + H2O = ADP + phosphate");
    assert_eq!(title.datatype.as_deref(), Some("string"));

    let expected_compounds = [
        "CHEBI_30616",
        "CHEBI_15377",
        "CHEBI_456216",
        "CHEBI_43474",
    ];
    for (i, chebi) in expected_compounds.iter().enumerate() {
        let index = i + 1;
        let participant_uri = format!("{SUBJECT}#participant{index}");
        let block = &triples[1 + i * 3..1 + i * 3 + 3];

        assert_eq!(block[0].subject, SUBJECT);
        assert_eq!(block[0].predicate, terms::HAS_REACTION_PARTICIPANT);
        assert_eq!(block[0].object, participant_uri);

        assert_eq!(block[1].subject, participant_uri);
        assert_eq!(block[1].predicate, terms::COMPOUND);
        assert_eq!(block[1].object, format!("http://example.org/eri/{chebi}"));

        assert_eq!(block[2].subject, participant_uri);
        assert_eq!(block[2].predicate, terms::REACTION_SIDE);
        let expected_side = if index <= 2 {
            terms::LEFT_SIDE
        } else {
            terms::RIGHT_SIDE
        };
        assert_eq!(block[2].object, expected_side);
    }
}

#[tokio::test]
async fn subject_filter_isolates_one_participant() {
    let root = parse_document(&fixture()).unwrap();
    let triples = transform(&root, SUBJECT, &MockXrefs).await.unwrap();

    let participant2 = format!("{SUBJECT}#participant2");
    let owned: Vec<_> = triples
        .iter()
        .filter(|triple| triple.subject == participant2)
        .collect();

    assert_eq!(owned.len(), 2);
    assert!(owned.iter().all(|triple| triple.subject == participant2));
    assert_eq!(owned[0].predicate, terms::COMPOUND);
    assert_eq!(owned[0].object, "http://example.org/eri/CHEBI_15377");
    assert_eq!(owned[1].predicate, terms::REACTION_SIDE);
    assert_eq!(owned[1].object, terms::LEFT_SIDE);

    // nothing from any other participant leaks through
    assert!(
        owned
            .iter()
            .all(|triple| !triple.object.contains("participant1")
                && !triple.object.contains("participant3"))
    );
}

#[tokio::test]
async fn transform_is_idempotent() {
    let root = parse_document(&fixture()).unwrap();
    let first = transform(&root, SUBJECT, &MockXrefs).await.unwrap();
    let second = transform(&root, SUBJECT, &MockXrefs).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn untitled_document_yields_only_participant_triples() {
    let xml = r#"<reaction xmlns="http://www.xml-cml.org/schema/cml2/react">
        <reactantList>
            <reactant><molecule><identifier value="CHEBI:1"/></molecule></reactant>
        </reactantList>
        <productList>
            <product><molecule><identifier value="CHEBI:2"/></molecule></product>
        </productList>
    </reaction>"#;
    let root = parse_document(xml).unwrap();
    let triples = transform(&root, SUBJECT, &MockXrefs).await.unwrap();
    assert_eq!(triples.len(), 6);
    assert_eq!(triples[0].predicate, terms::HAS_REACTION_PARTICIPANT);
}

#[tokio::test]
async fn non_reaction_root_fails_with_structure_error() {
    let root = parse_document("<molecule/>").unwrap();
    let err = transform(&root, SUBJECT, &MockXrefs).await.unwrap_err();
    assert_matches!(err, FragmentError::Structure(_));
}

#[tokio::test]
async fn unexpected_list_child_fails_with_structure_error() {
    let xml = r#"<reaction xmlns="http://www.xml-cml.org/schema/cml2/react">
        <reactantList>
            <spectator><molecule><identifier value="CHEBI:1"/></molecule></spectator>
        </reactantList>
    </reaction>"#;
    let root = parse_document(xml).unwrap();
    let err = transform(&root, SUBJECT, &MockXrefs).await.unwrap_err();
    assert_matches!(err, FragmentError::Structure(_));
}

#[tokio::test]
async fn participant_without_identifier_fails_with_lookup_error() {
    let xml = r#"<reaction xmlns="http://www.xml-cml.org/schema/cml2/react">
        <reactantList>
            <reactant><molecule><name>ATP</name></molecule></reactant>
        </reactantList>
    </reaction>"#;
    let root = parse_document(xml).unwrap();
    let err = transform(&root, SUBJECT, &MockXrefs).await.unwrap_err();
    assert_matches!(err, FragmentError::Lookup(_));
}

#[tokio::test]
async fn identifier_without_separator_fails_with_lookup_error() {
    let xml = r#"<reaction xmlns="http://www.xml-cml.org/schema/cml2/react">
        <reactantList>
            <reactant><molecule><identifier value="CHEBI30616"/></molecule></reactant>
        </reactantList>
    </reaction>"#;
    let root = parse_document(xml).unwrap();
    let err = transform(&root, SUBJECT, &MockXrefs).await.unwrap_err();
    assert_matches!(err, FragmentError::Lookup(_));
}

#[tokio::test]
async fn unqualified_molecule_is_not_recognized() {
    // identifier outside the CML react namespace must not satisfy the lookup
    let xml = r#"<reaction xmlns="http://www.xml-cml.org/schema/cml2/react">
        <reactantList>
            <reactant>
                <molecule xmlns="http://other.example/ns">
                    <identifier value="CHEBI:1"/>
                </molecule>
            </reactant>
        </reactantList>
    </reaction>"#;
    let root = parse_document(xml).unwrap();
    let err = transform(&root, SUBJECT, &MockXrefs).await.unwrap_err();
    assert_matches!(err, FragmentError::Lookup(_));
}
