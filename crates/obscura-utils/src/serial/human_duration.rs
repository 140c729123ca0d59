use fundu::{DurationParser, TimeUnit};
use serde_with::{DeserializeAs, SerializeAs};
use std::time::Duration as StdDuration;

/// Serializes and deserializes [`std::time::Duration`] as human readable
/// text like `30s`, `2m` or `500ms`.
pub struct AsHumanDuration;

const PARSER: DurationParser<'static> = DurationParser::builder()
    .time_units(&[
        TimeUnit::MilliSecond,
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
    ])
    .allow_time_unit_delimiter()
    .disable_exponent()
    .build();

struct Visitor;

impl<'de> serde::de::Visitor<'de> for Visitor {
    type Value = StdDuration;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("human duration")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let parsed = PARSER.parse(v).map_err(E::custom)?;
        StdDuration::try_from(parsed).map_err(E::custom)
    }
}

impl<'de> DeserializeAs<'de, StdDuration> for AsHumanDuration {
    fn deserialize_as<D>(deserializer: D) -> Result<StdDuration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(Visitor)
    }
}

impl SerializeAs<StdDuration> for AsHumanDuration {
    fn serialize_as<S>(source: &StdDuration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let duration: fundu::Duration = (*source).into();
        serializer.collect_str(&duration.to_string())
    }
}
