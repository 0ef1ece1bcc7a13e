use crate::config::Config;
use crate::domain::{Pattern, PatternResult, ReactionId, Term};
use crate::error::FragmentError;
use crate::rhea::RheaClient;
use crate::transform;
use crate::xml;
use crate::xrefdb::XrefClient;

/// Answers `<eri> ?p ?o` patterns: describe an enrichment subject that is
/// backed by a Rhea reaction, or one of its synthesized participants.
#[derive(Clone)]
pub struct ForwardResolver<R: RheaClient, X: XrefClient> {
    config: Config,
    rhea: R,
    xrefs: X,
}

impl<R: RheaClient, X: XrefClient> ForwardResolver<R, X> {
    pub fn new(config: Config, rhea: R, xrefs: X) -> Self {
        Self {
            config,
            rhea,
            xrefs,
        }
    }

    pub async fn resolve(&self, pattern: &Pattern) -> Result<PatternResult, FragmentError> {
        let Term::Bound(subject) = &pattern.subject else {
            return Ok(PatternResult::NotApplicable);
        };
        if !pattern.predicate.is_unbound() || !pattern.object.is_unbound() {
            return Ok(PatternResult::NotApplicable);
        }
        if !subject.starts_with(&self.config.eri_prefix) {
            return Ok(PatternResult::NotApplicable);
        }

        // The requested subject may be a #participantN fragment; xrefs are
        // recorded against the main reaction subject.
        let main_subject = match subject.find('#') {
            Some(pos) => &subject[..pos],
            None => subject.as_str(),
        };

        let uris = self.xrefs.eri_to_uris(main_subject).await?;
        let Some(reaction_uri) = uris
            .iter()
            .find(|uri| uri.starts_with(&self.config.rhea_cml_prefix))
        else {
            // The subject exists but does not describe a reaction: a valid
            // empty answer, not a refusal.
            return Ok(PatternResult::empty());
        };

        let id: ReactionId = reaction_uri[self.config.rhea_cml_prefix.len()..].parse()?;
        let body = self.rhea.fetch_reaction(&id).await?;
        let document = xml::parse_document(&body)?;
        let triples = transform::transform(&document, main_subject, &self.xrefs).await?;

        let filtered: Vec<_> = triples
            .into_iter()
            .filter(|triple| triple.subject == *subject)
            .collect();
        Ok(PatternResult::applicable(filtered))
    }
}
