//! Analytics report models.
//!
//! Responses are shaped for direct consumption by Chart.js on the
//! dashboard, and round-trip through the cache.

use serde::{Deserialize, Serialize};
use sociograph_cache::KeyParams;
use sociograph_core::serde::deserialize_optional_string;
use utoipa::ToSchema;

/// The filters every analytics endpoint accepts. They also define the
/// cache identity of a report: same filters, same cache entry.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AnalyticsFilters {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub zone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub party_district: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub constituency: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub designation: Option<String>,
}

impl AnalyticsFilters {
    /// Cache key parameters. Every filter is always included, so an absent
    /// filter and a request that never mentions it derive the same key.
    pub fn key_params(&self) -> KeyParams {
        KeyParams::new()
            .with("zone", &self.zone)
            .with("party_district", &self.party_district)
            .with("constituency", &self.constituency)
            .with("designation", &self.designation)
    }
}

/// Either one color for the whole series or one per bar.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(untagged)]
pub enum ChartColor {
    Single(String),
    PerBar(Vec<String>),
}

/// One dataset in a chart payload.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<i64>,
    #[serde(rename = "backgroundColor")]
    pub background_color: ChartColor,
}

/// Chart.js-shaped report payload.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    pub fn single_dataset(
        labels: Vec<String>,
        label: &str,
        data: Vec<i64>,
        background_color: ChartColor,
    ) -> Self {
        Self {
            labels,
            datasets: vec![ChartDataset {
                label: label.to_string(),
                data,
                background_color,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociograph_cache::derive_key;

    #[test]
    fn test_key_params_ignore_field_declaration_order() {
        let filters = AnalyticsFilters {
            zone: Some("north".into()),
            ..Default::default()
        };
        let key1 = derive_key("analytics:top", &filters.key_params());
        let key2 = derive_key("analytics:top", &filters.key_params());
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_differing_filters_derive_differing_keys() {
        let north = AnalyticsFilters {
            zone: Some("north".into()),
            ..Default::default()
        };
        let south = AnalyticsFilters {
            zone: Some("south".into()),
            ..Default::default()
        };
        assert_ne!(
            derive_key("analytics", &north.key_params()),
            derive_key("analytics", &south.key_params())
        );
    }

    #[test]
    fn test_background_color_serializes_camel_case() {
        let chart = ChartData::single_dataset(
            vec!["Facebook".into()],
            "Active Profiles",
            vec![3],
            ChartColor::Single("#36A2EB".into()),
        );
        let json = serde_json::to_string(&chart).unwrap();
        assert!(json.contains(r#""backgroundColor":"#36A2EB""#));
    }
}
