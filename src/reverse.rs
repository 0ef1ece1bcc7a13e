use futures::future::try_join_all;

use crate::config::Config;
use crate::domain::{Pattern, PatternResult, Term, Triple, UniprotAccession};
use crate::error::FragmentError;
use crate::rhea::{self, RheaClient};
use crate::xml;
use crate::xrefdb::{EntityKind, XrefClient};

/// Answers `?s <catalysis> <eri>` patterns: find the reactions catalyzed by
/// an accession-backed protein, as enrichment URIs.
#[derive(Clone)]
pub struct ReverseResolver<R: RheaClient, X: XrefClient> {
    config: Config,
    rhea: R,
    xrefs: X,
}

impl<R: RheaClient, X: XrefClient> ReverseResolver<R, X> {
    pub fn new(config: Config, rhea: R, xrefs: X) -> Self {
        Self {
            config,
            rhea,
            xrefs,
        }
    }

    pub async fn resolve(&self, pattern: &Pattern) -> Result<PatternResult, FragmentError> {
        if !pattern.subject.is_unbound() {
            return Ok(PatternResult::NotApplicable);
        }
        let (Term::Bound(predicate), Term::Bound(object)) = (&pattern.predicate, &pattern.object)
        else {
            return Ok(PatternResult::NotApplicable);
        };
        if *predicate != self.config.catalysis_predicate {
            return Ok(PatternResult::NotApplicable);
        }
        if !object.starts_with(&self.config.eri_prefix) {
            return Ok(PatternResult::NotApplicable);
        }

        let Some(accession) = self.accession_of(object).await? else {
            // The object exists but is not accession-backed; some other
            // handler may still know it.
            return Ok(PatternResult::NotApplicable);
        };

        let body = self.rhea.search_reactions(&accession).await?;
        let document = xml::parse_document(&body)?;
        let results = rhea::parse_search_results(&document)?;

        // Fan out per-match resolution; try_join_all keeps search order.
        let resolutions = results.reaction_uris.iter().map(|uri| {
            let uris = vec![uri.clone()];
            async move { self.xrefs.uris_to_eri(&uris, EntityKind::Reaction).await }
        });
        let reaction_eris = try_join_all(resolutions).await?;

        let triples: Vec<_> = reaction_eris
            .into_iter()
            .map(|eri| Triple::uri(eri, predicate.clone(), object.clone()))
            .collect();

        Ok(PatternResult::Applicable {
            triples,
            total: results.matched,
            next_state: None,
        })
    }

    /// Scans the object's xrefs for a UniProt URI and returns its accession.
    async fn accession_of(&self, eri: &str) -> Result<Option<UniprotAccession>, FragmentError> {
        let uris = self.xrefs.eri_to_uris(eri).await?;
        for uri in &uris {
            if let Some(rest) = uri.strip_prefix(&self.config.uniprot_prefix) {
                return Ok(Some(rest.parse()?));
            }
        }
        Ok(None)
    }
}
