//! Value formatting strategies.
//!
//! A format turns the raw matches accumulated by one argument into its
//! final typed [`ArgValue`]. Formats see the whole match list at once,
//! so joining free text or collapsing a single capture into a date are
//! both one-step transforms.

use chrono::{Duration, Local, Months, NaiveDate};

use crate::parser::error::ParseError;
use crate::parser::{ArgValue, MatchValue, ProjectRef};

pub trait Format {
    fn format(&self, matched: &[MatchValue]) -> Result<ArgValue, ParseError>;
}

/// Identity: the matched texts as a list. The default for every
/// argument that does not override it.
pub struct Passthrough;

impl Format for Passthrough {
    fn format(&self, matched: &[MatchValue]) -> Result<ArgValue, ParseError> {
        Ok(ArgValue::List(matched.iter().map(|m| m.text().to_string()).collect()))
    }
}

/// Apply a caller-supplied function to the matched texts, e.g. joining
/// title words into a single string.
pub struct Apply(pub fn(Vec<String>) -> ArgValue);

impl Format for Apply {
    fn format(&self, matched: &[MatchValue]) -> Result<ArgValue, ParseError> {
        let texts = matched.iter().map(|m| m.text().to_string()).collect();
        Ok((self.0)(texts))
    }
}

/// A single numeric match into a non-negative index.
pub struct IndexFormat;

impl Format for IndexFormat {
    fn format(&self, matched: &[MatchValue]) -> Result<ArgValue, ParseError> {
        let Some(m) = matched.first() else {
            return Ok(ArgValue::None);
        };
        let index = m
            .text()
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidValue(format!("'{}' is not an index", m.text())))?;
        Ok(ArgValue::Index(index))
    }
}

/// Sentinel for a bare date keyword: "any date up to forever".
pub fn far_future() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).expect("valid constant date")
}

/// A date-tag capture into a concrete date.
///
/// No match at all means the tag was absent (`None`). A bare keyword
/// (`due`) means "any date" and maps to the far-future sentinel. A
/// keyword with an offset (`due+2w`) maps to today shifted by the
/// signed amount, where the unit word abbreviates one of
/// days/weeks/months/years.
pub struct DateFormat;

impl Format for DateFormat {
    fn format(&self, matched: &[MatchValue]) -> Result<ArgValue, ParseError> {
        let Some(m) = matched.first() else {
            return Ok(ArgValue::None);
        };
        let MatchValue::Captures(caps) = m else {
            return Err(ParseError::InvalidValue(format!(
                "'{}' is not a date tag",
                m.text()
            )));
        };
        match (caps.group("offset"), caps.group("interval")) {
            (Some(offset), Some(interval)) => {
                let amount: i64 = offset
                    .parse()
                    .map_err(|_| ParseError::InvalidValue(format!("bad offset '{offset}'")))?;
                let today = Local::now().date_naive();
                Ok(ArgValue::Date(shift_date(today, amount, interval)?))
            }
            _ => Ok(ArgValue::Date(far_future())),
        }
    }
}

fn shift_date(from: NaiveDate, amount: i64, interval: &str) -> Result<NaiveDate, ParseError> {
    let lowered = interval.to_lowercase();
    let unit = ["days", "weeks", "months", "years"]
        .into_iter()
        .find(|word| word.starts_with(&lowered))
        .ok_or_else(|| ParseError::InvalidValue(format!("unknown interval '{interval}'")))?;

    let shifted = match unit {
        "days" => from.checked_add_signed(Duration::days(amount)),
        "weeks" => from.checked_add_signed(Duration::weeks(amount)),
        months_or_years => {
            let months = if months_or_years == "months" { amount } else { amount * 12 };
            let span = Months::new(months.unsigned_abs() as u32);
            if months >= 0 {
                from.checked_add_months(span)
            } else {
                from.checked_sub_months(span)
            }
        }
    };
    shifted.ok_or_else(|| ParseError::InvalidValue(format!("date offset {amount}{interval} out of range")))
}

/// Bracket contents into a structured parent reference. An optional
/// `folder/` head qualifies the search; the rest becomes keywords.
/// Zero matches format as an empty list, mirroring the other optional
/// list-shaped arguments.
pub struct ProjectFormat;

impl Format for ProjectFormat {
    fn format(&self, matched: &[MatchValue]) -> Result<ArgValue, ParseError> {
        let Some(m) = matched.first() else {
            return Ok(ArgValue::List(Vec::new()));
        };
        let mut words = m.text().split_whitespace();
        let mut reference = ProjectRef::default();
        if let Some(first) = words.next() {
            match first.split_once('/') {
                Some((folder, rest)) => {
                    reference.folder = Some(folder.to_string());
                    if !rest.is_empty() {
                        reference.keywords.push(rest.to_string());
                    }
                }
                None => reference.keywords.push(first.to_string()),
            }
        }
        reference.keywords.extend(words.map(str::to_string));
        Ok(ArgValue::Project(reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CaptureSet;
    use crate::parser::matchers::{Matcher, RegexMatcher};
    use rstest::rstest;

    fn date_capture(token: &str) -> MatchValue {
        let matcher = RegexMatcher::new(&[
            r"(?:due|du|d)(?:(?P<offset>[+-]\d+)(?P<interval>[a-z]+))?",
        ]);
        let (value, _) = matcher.match_head(&[token.to_string()]).unwrap().unwrap();
        value
    }

    #[test]
    fn passthrough_keeps_every_match() {
        let matched = vec![MatchValue::Text("a".into()), MatchValue::Text("b".into())];
        assert_eq!(
            Passthrough.format(&matched).unwrap(),
            ArgValue::List(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn apply_runs_the_supplied_function() {
        let matched = vec![MatchValue::Text("buy".into()), MatchValue::Text("milk".into())];
        let join = Apply(|words| ArgValue::Text(words.join(" ")));
        assert_eq!(join.format(&matched).unwrap(), ArgValue::Text("buy milk".into()));
    }

    #[rstest]
    #[case("7", ArgValue::Index(7))]
    #[case("0", ArgValue::Index(0))]
    fn index_parses_non_negative_integers(#[case] text: &str, #[case] expected: ArgValue) {
        let matched = vec![MatchValue::Text(text.into())];
        assert_eq!(IndexFormat.format(&matched).unwrap(), expected);
    }

    #[test]
    fn absent_date_tag_formats_to_none() {
        assert_eq!(DateFormat.format(&[]).unwrap(), ArgValue::None);
    }

    #[test]
    fn bare_date_keyword_means_any_date() {
        let value = DateFormat.format(&[date_capture("due")]).unwrap();
        assert_eq!(value, ArgValue::Date(far_future()));
    }

    #[test]
    fn offset_date_shifts_from_today() {
        let value = DateFormat.format(&[date_capture("due+5w")]).unwrap();
        let expected = Local::now().date_naive() + Duration::weeks(5);
        assert_eq!(value, ArgValue::Date(expected));
    }

    #[test]
    fn negative_offsets_shift_backwards() {
        let value = DateFormat.format(&[date_capture("du-2d")]).unwrap();
        let expected = Local::now().date_naive() - Duration::days(2);
        assert_eq!(value, ArgValue::Date(expected));
    }

    #[rstest]
    #[case(10, "m")]
    #[case(2, "y")]
    fn month_and_year_offsets_use_calendar_arithmetic(#[case] n: u32, #[case] unit: &str) {
        let today = Local::now().date_naive();
        let months = if unit == "m" { n } else { n * 12 };
        let expected = today.checked_add_months(Months::new(months)).unwrap();
        let value = DateFormat.format(&[date_capture(&format!("due+{n}{unit}"))]).unwrap();
        assert_eq!(value, ArgValue::Date(expected));
    }

    #[test]
    fn longer_interval_prefixes_are_tolerated() {
        let value = DateFormat.format(&[date_capture("due+1week")]).unwrap();
        let expected = Local::now().date_naive() + Duration::weeks(1);
        assert_eq!(value, ArgValue::Date(expected));
    }

    #[test]
    fn unknown_interval_is_rejected() {
        assert!(DateFormat.format(&[date_capture("due+3q")]).is_err());
    }

    #[test]
    fn project_splits_folder_and_keywords() {
        let matched = vec![MatchValue::Text("errands/call the plumber".into())];
        let value = ProjectFormat.format(&matched).unwrap();
        assert_eq!(
            value,
            ArgValue::Project(ProjectRef {
                folder: Some("errands".into()),
                keywords: vec!["call".into(), "the".into(), "plumber".into()],
            })
        );
    }

    #[test]
    fn project_without_folder_is_all_keywords() {
        let matched = vec![MatchValue::Text("spring cleaning".into())];
        let value = ProjectFormat.format(&matched).unwrap();
        assert_eq!(
            value,
            ArgValue::Project(ProjectRef {
                folder: None,
                keywords: vec!["spring".into(), "cleaning".into()],
            })
        );
    }

    #[test]
    fn absent_project_formats_to_an_empty_list() {
        assert_eq!(ProjectFormat.format(&[]).unwrap(), ArgValue::List(Vec::new()));
    }

    #[test]
    fn non_capture_input_to_date_format_is_an_error() {
        let matched = vec![MatchValue::Text("tomorrow".into())];
        assert!(DateFormat.format(&matched).is_err());
    }

    // Capture sets keep only named groups.
    #[test]
    fn capture_set_drops_unnamed_groups() {
        let re = regex::Regex::new(r"(?P<name>\w+)(\d+)").unwrap();
        let caps = re.captures("abc123").unwrap();
        let set = CaptureSet::from_captures(&re, &caps);
        assert_eq!(set.group("name"), Some("abc"));
        assert_eq!(set.text, "abc123");
    }
}
