//! Adapter between survey submissions and the [`PrivacyFilter`]
//!
//! Surveys store locations in a single field of type `geopoint`.
//! Its answers are strings of whitespace separated numbers:
//! `"<first> <second> [altitude] [accuracy]"`.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PrivacyError, Result};
use crate::filter::PrivacyFilter;
use crate::geometry::Point;

/// Field type holding a location
pub const GEOPOINT: &str = "geopoint";

/// A single question of a survey
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,
}

/// A survey's definition
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Form {
    #[serde(default)]
    pub children: Vec<Field>,
}

impl Form {
    /// The first field storing a location
    pub fn geopoint_field(&self) -> Option<&Field> {
        self.children.iter().find(|field| field.kind == GEOPOINT)
    }
}

/// A single respondent's answers
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Submission {
    pub data: BTreeMap<String, String>,
}

/// A survey together with its collected submissions
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Survey {
    pub form: Form,
    pub submissions: Vec<Submission>,
}

/// Read the point out of a geopoint's answer
pub fn parse_geopoint(value: &str) -> Result<Point> {
    let mut numbers = value.split_whitespace().map(str::parse::<f64>);
    match (numbers.next(), numbers.next()) {
        (Some(Ok(x)), Some(Ok(y))) => Ok(Point::new(x, y)),
        _ => Err(PrivacyError::MalformedGeopoint {
            value: value.to_string(),
        }),
    }
}

/// Write a point as a geopoint's answer
pub fn format_geopoint(point: Point) -> String {
    format!("{} {}", point.x, point.y)
}

impl Survey {
    /// Anonymize the submissions' locations
    ///
    /// The result only contains the geopoint field, in the order of the released points.
    pub fn privatize(&self, filter: &PrivacyFilter) -> Result<Vec<Submission>> {
        privatize_submissions(&self.form, &self.submissions, filter)
    }
}

/// Anonymize the locations of a survey's submissions
///
/// Every submission must answer the geopoint field.
/// The result only contains the geopoint field, in the order of the released points.
pub fn privatize_submissions(
    form: &Form,
    submissions: &[Submission],
    filter: &PrivacyFilter,
) -> Result<Vec<Submission>> {
    let field = form.geopoint_field().ok_or(PrivacyError::NoGeopointField)?;

    let points = submissions
        .iter()
        .enumerate()
        .map(|(record, submission)| {
            let value = submission.data.get(&field.name).ok_or_else(|| {
                PrivacyError::MissingGeopoint {
                    field: field.name.clone(),
                    record,
                }
            })?;
            parse_geopoint(value)
        })
        .collect::<Result<Vec<Point>>>()?;

    let released = filter.anonymize(&points)?;
    log::debug!(
        "Released {} locations of field {:?}",
        released.len(),
        field.name
    );

    Ok(released
        .into_iter()
        .map(|point| Submission {
            data: BTreeMap::from([(field.name.clone(), format_geopoint(point))]),
        })
        .collect())
}
