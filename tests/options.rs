use chrono_tz::Tz;
use loadtsv::EncoderOptions;

#[test]
fn default_has_no_zone() {
    assert_eq!(EncoderOptions::default().time_zone, None);
    assert_eq!(EncoderOptions::new(), EncoderOptions::default());
}

#[test]
fn zone_by_name() -> anyhow::Result<()> {
    let opts = EncoderOptions::from_zone_name("America/New_York")?;
    assert_eq!(opts.time_zone, Some(Tz::America__New_York));
    Ok(())
}

#[test]
fn unknown_zone_is_an_error() {
    let err = EncoderOptions::from_zone_name("Mars/Olympus_Mons").unwrap_err();
    assert!(err.to_string().contains("Mars/Olympus_Mons"));
}

#[test]
fn deserializes_from_json_and_toml() -> anyhow::Result<()> {
    let json: EncoderOptions = serde_json::from_str(r#"{"time_zone":"UTC"}"#)?;
    assert_eq!(json.time_zone, Some(Tz::UTC));

    let toml: EncoderOptions = toml::from_str("time_zone = \"Asia/Kolkata\"")?;
    assert_eq!(toml.time_zone, Some(Tz::Asia__Kolkata));

    let empty: EncoderOptions = serde_json::from_str("{}")?;
    assert_eq!(empty, EncoderOptions::default());
    Ok(())
}

#[test]
fn serializes_zone_name() -> anyhow::Result<()> {
    let opts = EncoderOptions::new().with_time_zone(Tz::Europe__Berlin);
    assert_eq!(serde_json::to_string(&opts)?, r#"{"time_zone":"Europe/Berlin"}"#);
    Ok(())
}
