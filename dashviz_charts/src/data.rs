// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input records and backend payload parsing.
//!
//! Two payload shapes feed the charts:
//! - analytics: `{ "<category>": { "count": n, "succeeded": n, "failed": n }, ... }`
//! - traffic: `[ { "date": "...", "value": n }, ... ]`
//!
//! Missing or `null` counters read as zero. Category order follows the JSON object order.

use serde::{Deserialize, Deserializer, Serialize};

use crate::Result;

/// One labelled value.
///
/// Accepts `category`, `date` or `label` as the key field when deserialising.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Category name, date string, or other identity label.
    #[serde(alias = "category", alias = "date")]
    pub label: String,
    /// Raw value; may be negative or non-finite before projection.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub value: f64,
}

impl DataPoint {
    /// Creates a data point.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Per-category job counters from the analytics endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsBucket {
    /// Total jobs.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub count: f64,
    /// Jobs that succeeded.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub succeeded: f64,
    /// Jobs that failed.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub failed: f64,
}

/// Selects one counter of an [`AnalyticsBucket`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// [`AnalyticsBucket::count`].
    Count,
    /// [`AnalyticsBucket::succeeded`].
    Succeeded,
    /// [`AnalyticsBucket::failed`].
    Failed,
}

impl Metric {
    /// The label used for this counter in chart data.
    pub fn label(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl AnalyticsBucket {
    /// Reads one counter.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Count => self.count,
            Metric::Succeeded => self.succeeded,
            Metric::Failed => self.failed,
        }
    }

    /// The bucket as chart data: `count`, `succeeded`, `failed`, in that order.
    pub fn points(&self) -> Vec<DataPoint> {
        [Metric::Count, Metric::Succeeded, Metric::Failed]
            .into_iter()
            .map(|m| DataPoint::new(m.label(), self.get(m)))
            .collect()
    }

    /// Sums buckets counter by counter.
    pub fn merged<'a>(buckets: impl IntoIterator<Item = &'a Self>) -> Self {
        buckets.into_iter().fold(Self::default(), |acc, b| Self {
            count: acc.count + b.count,
            succeeded: acc.succeeded + b.succeeded,
            failed: acc.failed + b.failed,
        })
    }
}

/// Parses the analytics payload, preserving category order.
///
/// A category whose bucket is `null` reads as an all-zero bucket.
pub fn parse_analytics(json: &str) -> Result<Vec<(String, AnalyticsBucket)>> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    map.into_iter()
        .map(|(category, value)| -> Result<(String, AnalyticsBucket)> {
            let bucket: Option<AnalyticsBucket> = serde_json::from_value(value)?;
            Ok((category, bucket.unwrap_or_default()))
        })
        .collect()
}

/// One data point per category, reading `metric` from each bucket.
pub fn category_series(buckets: &[(String, AnalyticsBucket)], metric: Metric) -> Vec<DataPoint> {
    buckets
        .iter()
        .map(|(category, bucket)| DataPoint::new(category.clone(), bucket.get(metric)))
        .collect()
}

/// Parses a `{date, value}[]` series (traffic).
pub fn parse_series(json: &str) -> Result<Vec<DataPoint>> {
    Ok(serde_json::from_str(json)?)
}

/// Clamps a raw value for geometry: non-finite and negative values become zero.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analytics_keeps_object_order_and_fills_gaps() {
        let json = r#"{
            "video": { "count": 10, "succeeded": 7, "failed": 3 },
            "audio": { "count": 4, "succeeded": null },
            "image": null
        }"#;
        let buckets = parse_analytics(json).unwrap();
        let names: Vec<_> = buckets.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["video", "audio", "image"]);
        assert_eq!(
            buckets[1].1,
            AnalyticsBucket {
                count: 4.0,
                succeeded: 0.0,
                failed: 0.0
            }
        );
        assert_eq!(buckets[2].1, AnalyticsBucket::default());

        let total = AnalyticsBucket::merged(buckets.iter().map(|(_, b)| b));
        assert_eq!(total.count, 14.0);

        let pts = buckets[0].1.points();
        assert_eq!(pts[0], DataPoint::new("count", 10.0));
        assert_eq!(pts[2], DataPoint::new("failed", 3.0));

        let series = category_series(&buckets, Metric::Count);
        assert_eq!(series[1], DataPoint::new("audio", 4.0));
    }

    #[test]
    fn series_accepts_date_or_category_keys() {
        let pts = parse_series(
            r#"[{"date":"2024-05-01","value":3},{"category":"b","value":5.5},{"label":"c"}]"#,
        )
        .unwrap();
        assert_eq!(pts[0].label, "2024-05-01");
        assert_eq!(pts[1].value, 5.5);
        assert_eq!(pts[2].value, 0.0);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_analytics("[1, 2]").is_err());
        assert!(parse_series("{").is_err());
    }

    #[test]
    fn sanitize_zeroes_bad_values() {
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(-3.0), 0.0);
        assert_eq!(sanitize(2.5), 2.5);
    }
}
