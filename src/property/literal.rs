//! Scalar literals and their XSD lexical forms.
//!
//! `xsd:dateTime` is parsed as RFC 3339. `xsd:duration` uses fixed calendar
//! units (a year is 365 days, a month 30 days) since a duration here is not
//! anchored to a start date. Language tags are checked against the BCP 47
//! shape only, not the subtag registry.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta};
use regex::Regex;
use serde_json::{Number, Value};

use super::schema::Range;

// ── Regex patterns ──────────────────────────────────────────────────────

static RE_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-)?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .unwrap()
});

static RE_LANGUAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,8}(-[A-Za-z0-9]{1,8})*$").unwrap());

static RE_ABSOLUTE_IRI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S*$").unwrap());

const SECONDS_PER_DAY: i64 = 86_400;

/// A scalar property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Uri(String),
    DateTime(DateTime<FixedOffset>),
    Duration(TimeDelta),
    Integer(u64),
    Float(f64),
    Boolean(bool),
    LanguageTag(String),
}

impl Literal {
    /// Decode `value` as a literal of `range`. Returns `None` when the JSON
    /// does not have the lexical form the range requires.
    pub fn from_json(range: Range, value: &Value) -> Option<Self> {
        match (range, value) {
            (Range::Text, Value::String(s)) => Some(Self::String(s.clone())),
            (Range::Uri, Value::String(s)) if is_absolute_iri(s) => Some(Self::Uri(s.clone())),
            (Range::DateTime, Value::String(s)) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(Self::DateTime),
            (Range::Duration, Value::String(s)) => parse_duration(s).map(Self::Duration),
            (Range::NonNegativeInteger, Value::Number(n)) => n.as_u64().map(Self::Integer),
            (Range::Float, Value::Number(n)) => n.as_f64().map(Self::Float),
            (Range::Boolean, Value::Bool(b)) => Some(Self::Boolean(*b)),
            // xsd:boolean admits 0 and 1 as lexical forms.
            (Range::Boolean, Value::Number(n)) => match n.as_u64() {
                Some(0) => Some(Self::Boolean(false)),
                Some(1) => Some(Self::Boolean(true)),
                _ => None,
            },
            (Range::LanguageTag, Value::String(s)) if is_language_tag(s) => {
                Some(Self::LanguageTag(s.clone()))
            }
            _ => None,
        }
    }

    /// Canonical JSON form.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) | Self::Uri(s) | Self::LanguageTag(s) => Value::String(s.clone()),
            Self::DateTime(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Duration(d) => Value::String(format_duration(*d)),
            Self::Integer(n) => Value::Number((*n).into()),
            Self::Float(x) => Number::from_f64(*x).map_or(Value::Null, Value::Number),
            Self::Boolean(b) => Value::Bool(*b),
        }
    }

    /// Whether this literal is a legal value of `range`.
    pub fn matches(&self, range: Range) -> bool {
        matches!(
            (self, range),
            (Self::String(_), Range::Text)
                | (Self::Uri(_), Range::Uri)
                | (Self::DateTime(_), Range::DateTime)
                | (Self::Duration(_), Range::Duration)
                | (Self::Integer(_), Range::NonNegativeInteger)
                | (Self::Float(_), Range::Float)
                | (Self::Boolean(_), Range::Boolean)
                | (Self::LanguageTag(_), Range::LanguageTag)
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Uri(_) => "URI",
            Self::DateTime(_) => "dateTime",
            Self::Duration(_) => "duration",
            Self::Integer(_) => "nonNegativeInteger",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::LanguageTag(_) => "language tag",
        }
    }
}

pub fn is_absolute_iri(s: &str) -> bool {
    RE_ABSOLUTE_IRI.is_match(s)
}

pub fn is_language_tag(s: &str) -> bool {
    RE_LANGUAGE_TAG.is_match(s)
}

/// Parse an `xsd:duration` such as `P1DT2H` or `-PT0.5S`.
pub fn parse_duration(s: &str) -> Option<TimeDelta> {
    let caps = RE_DURATION.captures(s)?;
    // "P" and "PT" carry no components.
    if caps.iter().skip(2).all(|c| c.is_none()) || s.ends_with('T') {
        return None;
    }

    let field = |i: usize| -> Option<i64> {
        caps.get(i)
            .map_or(Some(0), |m| m.as_str().parse::<i64>().ok())
    };
    let days = field(2)?
        .checked_mul(365)?
        .checked_add(field(3)?.checked_mul(30)?)?
        .checked_add(field(4)?)?;

    let mut total = TimeDelta::try_days(days)?
        .checked_add(&TimeDelta::try_hours(field(5)?)?)?
        .checked_add(&TimeDelta::try_minutes(field(6)?)?)?;

    if let Some(secs) = caps.get(7) {
        let (whole, frac) = secs.as_str().split_once('.').unwrap_or((secs.as_str(), ""));
        total = total.checked_add(&TimeDelta::try_seconds(whole.parse().ok()?)?)?;
        if !frac.is_empty() {
            let digits: String = frac.chars().chain(std::iter::repeat('0')).take(9).collect();
            total = total.checked_add(&TimeDelta::nanoseconds(digits.parse().ok()?))?;
        }
    }

    Some(if caps.get(1).is_some() { -total } else { total })
}

/// Format a duration as `xsd:duration`, in days and below.
pub fn format_duration(d: TimeDelta) -> String {
    let sign = if d < TimeDelta::zero() { "-" } else { "" };
    let d = d.abs();
    let secs = d.num_seconds();
    let nanos = d.subsec_nanos();

    let days = secs / SECONDS_PER_DAY;
    let hours = (secs % SECONDS_PER_DAY) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let mut out = format!("{sign}P");
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours > 0 || minutes > 0 || seconds > 0 || nanos > 0 || days == 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            out.push_str(&format!("{minutes}M"));
        }
        if nanos > 0 {
            let frac = format!("{nanos:09}");
            out.push_str(&format!("{seconds}.{}S", frac.trim_end_matches('0')));
        } else if seconds > 0 || (days == 0 && hours == 0 && minutes == 0) {
            out.push_str(&format!("{seconds}S"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn durations_parse_with_fixed_calendar_units() {
        assert_eq!(parse_duration("PT5M"), Some(TimeDelta::minutes(5)));
        assert_eq!(parse_duration("P1D"), Some(TimeDelta::days(1)));
        assert_eq!(parse_duration("P1Y2M"), Some(TimeDelta::days(365 + 60)));
        assert_eq!(
            parse_duration("-P1DT1.5S"),
            Some(-(TimeDelta::days(1) + TimeDelta::milliseconds(1500)))
        );
    }

    #[test]
    fn empty_durations_are_rejected() {
        for bad in ["P", "PT", "P1DT", "1D", "PT1H2", "", "P-1D"] {
            assert_eq!(parse_duration(bad), None, "{bad}");
        }
    }

    #[test]
    fn durations_format_back() {
        assert_eq!(format_duration(TimeDelta::zero()), "PT0S");
        assert_eq!(format_duration(TimeDelta::minutes(5)), "PT5M");
        assert_eq!(format_duration(TimeDelta::days(2)), "P2D");
        assert_eq!(
            format_duration(TimeDelta::days(1) + TimeDelta::milliseconds(1500)),
            "P1DT1.5S"
        );
        assert_eq!(format_duration(-TimeDelta::hours(3)), "-PT3H");
        let d = parse_duration("P3DT4H5M6S").unwrap();
        assert_eq!(parse_duration(&format_duration(d)), Some(d));
    }

    #[test]
    fn literals_decode_by_range() {
        assert_eq!(
            Literal::from_json(Range::Text, &json!("hi")),
            Some(Literal::String("hi".into()))
        );
        assert_eq!(Literal::from_json(Range::Text, &json!(3)), None);
        assert_eq!(Literal::from_json(Range::Uri, &json!("/relative")), None);
        assert!(Literal::from_json(Range::Uri, &json!("https://example.com/a")).is_some());
        assert_eq!(
            Literal::from_json(Range::NonNegativeInteger, &json!(-1)),
            None
        );
        assert_eq!(
            Literal::from_json(Range::Float, &json!(2)),
            Some(Literal::Float(2.0))
        );
        assert_eq!(
            Literal::from_json(Range::Boolean, &json!(1)),
            Some(Literal::Boolean(true))
        );
        assert_eq!(Literal::from_json(Range::LanguageTag, &json!("en-GB")).map(|l| l.kind_name()), Some("language tag"));
        assert_eq!(Literal::from_json(Range::LanguageTag, &json!("not a tag")), None);
        assert_eq!(Literal::from_json(Range::Entity, &json!("x")), None);
    }

    #[test]
    fn datetimes_keep_their_offset() {
        let lit = Literal::from_json(Range::DateTime, &json!("2024-03-01T12:00:00+02:00")).unwrap();
        assert_eq!(lit.to_json(), json!("2024-03-01T12:00:00+02:00"));
        let utc = Literal::from_json(Range::DateTime, &json!("2024-03-01T12:00:00Z")).unwrap();
        assert_eq!(utc.to_json(), json!("2024-03-01T12:00:00Z"));
        assert_eq!(Literal::from_json(Range::DateTime, &json!("yesterday")), None);
    }

    #[test]
    fn matches_follows_range() {
        assert!(Literal::Integer(1).matches(Range::NonNegativeInteger));
        assert!(!Literal::Integer(1).matches(Range::Float));
        assert!(!Literal::String("x".into()).matches(Range::Entity));
    }
}
