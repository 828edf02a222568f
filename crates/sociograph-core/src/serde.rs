use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, treating empty strings as `None`.
///
/// Frontends commonly submit cleared filter inputs as `?zone=`; a blank
/// filter must behave like no filter at all.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Deserializes a boolean query flag from its string form.
///
/// Query parameters arrive as strings (and stay strings when the
/// containing struct is `#[serde(flatten)]`ed), so `bool` fields need the
/// parse spelled out. Accepts `true`/`false`/`1`/`0`; absent or empty
/// means `false`.
pub fn deserialize_bool_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid boolean flag: {other}"
        ))),
    }
}
