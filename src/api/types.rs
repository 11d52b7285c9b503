use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::config::SpreadConfig;

/// The three form fields. Absent or blank fields keep the configured value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SpreadParams {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub lot_size: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_percentage_difference: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub spot_multiplier: Option<f64>,
}

impl SpreadParams {
    pub fn apply(&self, base: SpreadConfig) -> SpreadConfig {
        base.merged(
            self.lot_size,
            self.max_percentage_difference,
            self.spot_multiplier,
        )
    }
}

/// A cleared form field arrives as `name=`; treat it like a missing one.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_unset() {
        let params: SpreadParams = serde_json::from_str(
            r#"{ "lot_size": "", "max_percentage_difference": " ", "spot_multiplier": "1.1" }"#,
        )
        .unwrap();
        assert_eq!(params.lot_size, None);
        assert_eq!(params.max_percentage_difference, None);
        assert_eq!(params.spot_multiplier, Some(1.1));

        let config = params.apply(SpreadConfig::default());
        assert_eq!(config.lot_size, 10);
        assert_eq!(config.spot_multiplier, 1.1);
    }

    #[test]
    fn test_absent_fields_are_unset() {
        let params: SpreadParams = serde_json::from_str("{}").unwrap();
        assert!(params.lot_size.is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = serde_json::from_str::<SpreadParams>(r#"{ "lot_size": "abc" }"#).unwrap_err();
        assert!(err.to_string().contains("invalid digit"), "{err}");
    }
}
