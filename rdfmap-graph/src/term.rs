//! RDF term types: IRI, blank node, and literal
//!
//! A literal is its lexical form, an explicit datatype and an optional
//! language tag. Two literals are the same term exactly when those three
//! parts are equal; interpreting the lexical form is left to whoever reads
//! it.

use crate::Datatype;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Blank node identifier
///
/// Blank node IDs are stable within a graph but have no global meaning.
/// Whether a store hands back the same label for the same node across two
/// requests is a property of the store, not of this type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// Create a blank node ID from a label without the `_:` prefix
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// `_:label`
    pub fn to_ntriples(&self) -> String {
        self.to_string()
    }

    fn fresh() -> Self {
        Self::new(format!("b{}", uuid::Uuid::new_v4().simple()))
    }
}

impl fmt::Display for BlankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// An RDF term (subject, predicate, or object position)
///
/// `Iri` always holds an expanded IRI. A `Literal` with a language tag has
/// the `rdf:langString` datatype. Terms order blank nodes first, then IRIs,
/// then literals.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    BlankNode(BlankId),
    Iri(Arc<str>),
    Literal {
        lexical: Arc<str>,
        datatype: Datatype,
        language: Option<Arc<str>>,
    },
}

impl Term {
    /// Create an IRI term from an expanded IRI string
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a blank node term
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::BlankNode(BlankId::new(label))
    }

    /// Plain string literal (`xsd:string`)
    pub fn string(value: impl AsRef<str>) -> Self {
        Self::typed(value, Datatype::xsd_string())
    }

    /// Language-tagged string literal (`rdf:langString`)
    pub fn lang_string(value: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype: Datatype::rdf_lang_string(),
            language: Some(Arc::from(lang.as_ref())),
        }
    }

    /// Literal with the given lexical form and datatype
    pub fn typed(value: impl AsRef<str>, datatype: Datatype) -> Self {
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype,
            language: None,
        }
    }

    /// Blank node with a generated, globally unique label
    pub fn fresh_blank() -> Self {
        Term::BlankNode(BlankId::fresh())
    }

    /// The `rdf:nil` list terminator
    pub fn nil() -> Self {
        Term::iri(rdfmap_vocab::rdf::NIL)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    /// Check if this is a resource (IRI or blank node)
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Term::Iri(iri) if iri.as_ref() == rdfmap_vocab::rdf::NIL)
    }

    /// Language tag of a literal, if any
    pub fn language(&self) -> Option<&str> {
        match self {
            Term::Literal { language, .. } => language.as_deref(),
            _ => None,
        }
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Lexical form, datatype and language tag of a literal
    pub fn as_literal(&self) -> Option<(&str, &Datatype, Option<&str>)> {
        match self {
            Term::Literal {
                lexical,
                datatype,
                language,
            } => Some((lexical.as_ref(), datatype, language.as_deref())),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(id) => write!(f, "{id}"),
            Term::Literal {
                lexical,
                datatype,
                language,
            } => {
                write!(f, "\"{lexical}\"")?;
                match language {
                    Some(lang) => write!(f, "@{lang}"),
                    None if datatype.is_xsd_string() => Ok(()),
                    None => write!(f, "^^<{}>", datatype.as_iri()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_blank_id() {
        let id = BlankId::new("b0");
        assert_eq!(id.to_ntriples(), "_:b0");
        assert_ne!(Term::fresh_blank(), Term::fresh_blank());
    }

    #[test]
    fn test_resource_checks() {
        assert!(Term::iri("http://example.org/a").is_resource());
        assert!(Term::blank("b0").is_blank());
        assert!(!Term::string("x").is_resource());
        assert!(Term::nil().is_nil());
        assert_eq!(Term::lang_string("chat", "fr").language(), Some("fr"));
        assert_eq!(Term::string("cat").language(), None);
    }

    #[test]
    fn test_literal_parts() {
        let lang = Term::lang_string("bonjour", "fr");
        let (lexical, dt, l) = lang.as_literal().unwrap();
        assert_eq!(lexical, "bonjour");
        assert_eq!(dt, &Datatype::rdf_lang_string());
        assert_eq!(l, Some("fr"));
        assert_eq!(Term::iri("http://example.org/a").as_literal(), None);
    }

    #[test]
    fn test_literal_identity_is_lexical_datatype_and_language() {
        let age = || Term::typed("44", Datatype::xsd_integer());
        let set: HashSet<Term> = [
            age(),
            Term::typed(String::from("44"), Datatype::from_iri(rdfmap_vocab::xsd::INTEGER)),
            Term::typed("44", Datatype::xsd_long()),
            Term::string("44"),
            Term::lang_string("44", "en"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 4);
        assert!(set.contains(&age()));
        assert_ne!(
            Term::typed("44", Datatype::xsd_integer()),
            Term::typed("044", Datatype::xsd_integer())
        );
    }

    #[test]
    fn test_term_ordering() {
        let blank = Term::blank("b0");
        let iri = Term::iri("http://example.org");
        let lit = Term::string("hello");

        assert!(blank < iri);
        assert!(iri < lit);
        assert!(Term::iri("http://a.org") < Term::iri("http://b.org"));
    }

    #[test]
    fn test_term_display() {
        assert_eq!(Term::iri("http://example.org").to_string(), "<http://example.org>");
        assert_eq!(Term::blank("b0").to_string(), "_:b0");
        assert_eq!(Term::string("hello").to_string(), "\"hello\"");
        assert_eq!(Term::lang_string("bonjour", "fr").to_string(), "\"bonjour\"@fr");
        assert_eq!(
            Term::typed("42", Datatype::xsd_int()).to_string(),
            "\"42\"^^<http://www.w3.org/2001/XMLSchema#int>"
        );
    }
}
