//! Literal codec
//!
//! Native scalars to typed literals and back, through one fixed datatype
//! table. Several datatypes may decode to the same native kind (every
//! integer-family datatype decodes to `i32`, for instance).

use crate::descriptor::ValueKind;
use crate::error::{MappingError, Result};
use crate::id::is_absolute_uri;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rdfmap_graph::{Datatype, Term};
use rdfmap_vocab::xsd;

/// Encode a scalar as a literal
///
/// Strings carry `language` when one is given. Characters are written as
/// strings. References and lists are not literals.
pub fn to_literal(value: &Value, language: Option<&str>) -> Result<Term> {
    let datatype = match value {
        Value::String(s) => {
            return Ok(match language {
                Some(lang) => Term::lang_string(s, lang),
                None => Term::string(s),
            });
        }
        Value::Char(c) => return Ok(Term::string(c.to_string())),
        Value::Bool(_) => Datatype::xsd_boolean(),
        Value::Byte(_) => Datatype::xsd_byte(),
        Value::Short(_) => Datatype::xsd_short(),
        Value::Int(_) => Datatype::xsd_int(),
        Value::Long(_) => Datatype::xsd_long(),
        Value::Float(_) => Datatype::xsd_float(),
        Value::Double(_) => Datatype::xsd_double(),
        Value::DateTime(_) => Datatype::xsd_date_time(),
        Value::Uri(_) => Datatype::xsd_any_uri(),
        Value::Resource(_) | Value::Ref(_) | Value::List(_) => {
            return Err(MappingError::invalid(format!(
                "a {} value cannot be written as a literal",
                value.kind_name()
            )));
        }
    };

    let lexical = value.lexical().unwrap_or_default();
    Ok(Term::typed(lexical, datatype))
}

/// Decode a literal for a member of kind `kind`
///
/// Returns `Ok(None)` for an `xsd:anyURI` literal that is not a URI. A
/// datatype outside the table decodes to its lexical form when `kind` takes
/// strings and fails otherwise.
pub fn from_literal(term: &Term, kind: &ValueKind) -> Result<Option<Value>> {
    let Some((lexical, datatype, _)) = term.as_literal() else {
        return Err(MappingError::invalid(format!("{term} is not a literal")));
    };
    let lexical = lexical.to_string();
    let dt = datatype.as_iri();

    if datatype.is_plain() {
        return Ok(Some(conform(Value::String(lexical), kind)));
    }

    let parse_err = |reason: String| MappingError::unsupported_literal(dt, &lexical, reason);

    let decoded = if dt == xsd::BOOLEAN {
        Value::Bool(parse_bool(&lexical).ok_or_else(|| parse_err("not a boolean".into()))?)
    } else if xsd::is_int_family(dt) {
        let n: i64 = lexical.trim().parse().map_err(|e| parse_err(format!("{e}")))?;
        match i32::try_from(n) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Long(n),
        }
    } else if xsd::is_long_family(dt) {
        Value::Long(lexical.trim().parse().map_err(|e| parse_err(format!("{e}")))?)
    } else if dt == xsd::DOUBLE {
        Value::Double(parse_float(&lexical).ok_or_else(|| parse_err("not a double".into()))?)
    } else if xsd::is_float_family(dt) {
        let n = parse_float(&lexical).ok_or_else(|| parse_err("not a float".into()))?;
        Value::Float(n as f32)
    } else if xsd::is_short_family(dt) {
        Value::Short(lexical.trim().parse().map_err(|e| parse_err(format!("{e}")))?)
    } else if xsd::is_byte_family(dt) {
        Value::Byte(lexical.trim().parse().map_err(|e| parse_err(format!("{e}")))?)
    } else if dt == xsd::ANY_URI {
        if !is_absolute_uri(&lexical) {
            tracing::warn!(lexical = %lexical, "xsd:anyURI literal is not a valid URI; ignoring value");
            return Ok(None);
        }
        Value::Uri(lexical)
    } else if dt == xsd::DATE || dt == xsd::DATE_TIME {
        Value::DateTime(parse_date_time(&lexical).ok_or_else(|| parse_err("not an ISO date".into()))?)
    } else if dt == xsd::TIME {
        Value::DateTime(parse_time(&lexical).ok_or_else(|| parse_err("not a time".into()))?)
    } else if kind.accepts_string() {
        Value::String(lexical)
    } else {
        return Err(parse_err(format!(
            "unknown datatype for a {} member",
            kind.name()
        )));
    };

    Ok(Some(decoded))
}

/// Fit an untyped string to the member's declared kind
///
/// Plain literals are what a store hands back when values were written
/// without datatypes; the lexical form is parsed for the declared kind and
/// left as a string if it does not parse.
fn conform(value: Value, kind: &ValueKind) -> Value {
    let Value::String(text) = &value else {
        return value;
    };
    let parsed = match kind {
        ValueKind::Bool => parse_bool(text).map(Value::Bool),
        ValueKind::Byte => text.trim().parse().ok().map(Value::Byte),
        ValueKind::Short => text.trim().parse().ok().map(Value::Short),
        ValueKind::Int => text.trim().parse().ok().map(Value::Int),
        ValueKind::Long => text.trim().parse().ok().map(Value::Long),
        ValueKind::Float => parse_float(text).map(|n| Value::Float(n as f32)),
        ValueKind::Double => parse_float(text).map(Value::Double),
        ValueKind::DateTime => parse_date_time(text).map(Value::DateTime),
        ValueKind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }
        ValueKind::Uri if is_absolute_uri(text) => Some(Value::Uri(text.clone())),
        _ => None,
    };
    parsed.unwrap_or(value)
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_float(text: &str) -> Option<f64> {
    match text.trim() {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    let date = text.strip_suffix('Z').unwrap_or(text);
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// `xsd:time` values are epoch milliseconds; clock times fall on 1970-01-01
fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(millis) = text.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis);
    }
    let clock = text.strip_suffix('Z').unwrap_or(text);
    NaiveTime::parse_from_str(clock, "%H:%M:%S%.f")
        .ok()
        .zip(NaiveDate::from_ymd_opt(1970, 1, 1))
        .map(|(t, epoch)| epoch.and_time(t).and_utc())
}
