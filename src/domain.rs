use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::FragmentError;
use crate::terms;

/// One RDF triple. Objects may be URIs or literals; literals carry an
/// optional datatype tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl Triple {
    pub fn uri(subject: impl Into<String>, predicate: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            datatype: None,
        }
    }

    pub fn literal(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        datatype: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            datatype: Some(datatype.into()),
        }
    }
}

/// One position of a triple pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Bound(String),
    Unbound,
}

impl Term {
    pub fn bound(&self) -> Option<&str> {
        match self {
            Term::Bound(value) => Some(value),
            Term::Unbound => None,
        }
    }

    pub fn is_unbound(&self) -> bool {
        matches!(self, Term::Unbound)
    }
}

/// A triple pattern query: each position either bound to a value or left open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Pattern {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// Outcome of offering a pattern to a resolver. `NotApplicable` tells the
/// dispatch to try another handler; `Applicable` is an answer, including
/// the empty one. The core never paginates, so `next_state` stays `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PatternResult {
    NotApplicable,
    #[serde(rename_all = "camelCase")]
    Applicable {
        triples: Vec<Triple>,
        total: u64,
        next_state: Option<String>,
    },
}

impl PatternResult {
    pub fn applicable(triples: Vec<Triple>) -> Self {
        let total = triples.len() as u64;
        PatternResult::Applicable {
            triples,
            total,
            next_state: None,
        }
    }

    pub fn empty() -> Self {
        PatternResult::Applicable {
            triples: Vec::new(),
            total: 0,
            next_state: None,
        }
    }
}

/// Which side of the reaction equation a participant sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionSide {
    Left,
    Right,
}

impl ReactionSide {
    pub fn uri(self) -> &'static str {
        match self {
            ReactionSide::Left => terms::LEFT_SIDE,
            ReactionSide::Right => terms::RIGHT_SIDE,
        }
    }
}

/// A namespaced identifier such as `CHEBI:30616`, split at the first colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedId {
    pub namespace: String,
    pub local_id: String,
}

impl FromStr for PrefixedId {
    type Err = FragmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (namespace, local_id) = value
            .split_once(':')
            .ok_or_else(|| FragmentError::Lookup(format!("id without namespace separator: {value}")))?;
        if namespace.is_empty() || local_id.is_empty() {
            return Err(FragmentError::Lookup(format!(
                "id with empty namespace or local part: {value}"
            )));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            local_id: local_id.to_string(),
        })
    }
}

/// Rhea's native reaction id, the numeric tail of its document URIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReactionId(String);

impl ReactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReactionId {
    type Err = FragmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let is_valid = !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit());
        if !is_valid {
            return Err(FragmentError::InvalidReactionId(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// UniProt protein accession such as `P12345`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniprotAccession(String);

impl UniprotAccession {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniprotAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UniprotAccession {
    type Err = FragmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let is_valid = !trimmed.is_empty()
            && trimmed.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-');
        if !is_valid {
            return Err(FragmentError::InvalidAccession(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}
