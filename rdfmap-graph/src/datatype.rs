//! RDF datatype representation
//!
//! Datatypes are always explicit in this IR - there is no "untyped" literal.
//! Plain strings default to `xsd:string`, and language-tagged strings use
//! `rdf:langString`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Common XSD and RDF datatype IRIs (re-exported from vocab crate)
pub mod iri {
    pub use rdfmap_vocab::rdf::{LANG_STRING as RDF_LANG_STRING, TYPE as RDF_TYPE};
    pub use rdfmap_vocab::rdfs::LITERAL as RDFS_LITERAL;
    pub use rdfmap_vocab::xsd::{
        ANY_URI as XSD_ANY_URI, BOOLEAN as XSD_BOOLEAN, BYTE as XSD_BYTE,
        DATE_TIME as XSD_DATE_TIME, DOUBLE as XSD_DOUBLE, FLOAT as XSD_FLOAT, INT as XSD_INT,
        INTEGER as XSD_INTEGER, LONG as XSD_LONG, SHORT as XSD_SHORT, STRING as XSD_STRING,
    };
}

/// RDF literal datatype
///
/// Always an expanded IRI. Use `Datatype::xsd_string()` for plain strings,
/// `Datatype::rdf_lang_string()` for language-tagged strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Self::from_iri(iri::XSD_STRING)
    }

    /// xsd:boolean
    pub fn xsd_boolean() -> Self {
        Self::from_iri(iri::XSD_BOOLEAN)
    }

    /// xsd:integer
    pub fn xsd_integer() -> Self {
        Self::from_iri(iri::XSD_INTEGER)
    }

    /// xsd:int
    pub fn xsd_int() -> Self {
        Self::from_iri(iri::XSD_INT)
    }

    /// xsd:long
    pub fn xsd_long() -> Self {
        Self::from_iri(iri::XSD_LONG)
    }

    /// xsd:short
    pub fn xsd_short() -> Self {
        Self::from_iri(iri::XSD_SHORT)
    }

    /// xsd:byte
    pub fn xsd_byte() -> Self {
        Self::from_iri(iri::XSD_BYTE)
    }

    /// xsd:float
    pub fn xsd_float() -> Self {
        Self::from_iri(iri::XSD_FLOAT)
    }

    /// xsd:double
    pub fn xsd_double() -> Self {
        Self::from_iri(iri::XSD_DOUBLE)
    }

    /// xsd:dateTime
    pub fn xsd_date_time() -> Self {
        Self::from_iri(iri::XSD_DATE_TIME)
    }

    /// xsd:anyURI
    pub fn xsd_any_uri() -> Self {
        Self::from_iri(iri::XSD_ANY_URI)
    }

    /// rdf:langString - for language-tagged literals
    pub fn rdf_lang_string() -> Self {
        Self::from_iri(iri::RDF_LANG_STRING)
    }

    /// Get the IRI representation of this datatype
    pub fn as_iri(&self) -> &str {
        &self.0
    }

    /// Check if this is the xsd:string datatype
    pub fn is_xsd_string(&self) -> bool {
        self.as_iri() == iri::XSD_STRING
    }

    /// Check if literals of this datatype are plain text
    ///
    /// `xsd:string`, `rdf:langString` and `rdfs:Literal` all carry their
    /// lexical form as the value.
    pub fn is_plain(&self) -> bool {
        matches!(
            self.as_iri(),
            iri::XSD_STRING | iri::RDF_LANG_STRING | iri::RDFS_LITERAL
        )
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_iri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_constructors() {
        assert_eq!(Datatype::xsd_string().as_iri(), iri::XSD_STRING);
        assert_eq!(Datatype::xsd_boolean().as_iri(), iri::XSD_BOOLEAN);
        assert_eq!(Datatype::xsd_int().as_iri(), iri::XSD_INT);
        assert_eq!(Datatype::xsd_double().as_iri(), iri::XSD_DOUBLE);
        assert_eq!(Datatype::rdf_lang_string().as_iri(), iri::RDF_LANG_STRING);
    }

    #[test]
    fn test_datatype_equality() {
        assert_eq!(Datatype::xsd_integer(), Datatype::from_iri(iri::XSD_INTEGER));
        assert_ne!(Datatype::xsd_string(), Datatype::xsd_integer());
    }

    #[test]
    fn test_is_checks() {
        assert!(Datatype::xsd_string().is_xsd_string());
        assert!(!Datatype::xsd_integer().is_xsd_string());

        assert!(Datatype::from_iri(iri::RDFS_LITERAL).is_plain());
        assert!(!Datatype::xsd_boolean().is_plain());
    }
}
