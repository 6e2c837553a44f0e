//! Encoder configuration.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Settings that affect how values are rendered.
///
/// All fields are optional; `EncoderOptions::default()` renders every value
/// exactly as it arrives.
///
/// Options deserialize from any serde format, with the zone given by its IANA
/// name:
///
/// ```
/// # use loadtsv::EncoderOptions;
/// let opts: EncoderOptions = serde_json::from_str(r#"{"time_zone":"Europe/Amsterdam"}"#).unwrap();
/// assert_eq!(opts.time_zone.unwrap().name(), "Europe/Amsterdam");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Zone every zone-carrying timestamp is converted to before printing.
    ///
    /// The load format has no zone indicator, so this only decides which
    /// wall-clock digits end up in the field. Naive timestamps and dates are
    /// never converted.
    pub time_zone: Option<Tz>,
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert timestamps to `tz` before formatting.
    #[must_use]
    pub fn with_time_zone(mut self, tz: Tz) -> Self {
        self.time_zone = Some(tz);
        self
    }

    /// Build options from an IANA zone name such as `"UTC"` or `"Asia/Tokyo"`.
    ///
    /// # Errors
    /// Returns an error if the name is not in the tz database.
    pub fn from_zone_name(name: &str) -> anyhow::Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|e| anyhow::anyhow!("unknown time zone {name:?}: {e}"))?;
        Ok(Self::new().with_time_zone(tz))
    }
}
