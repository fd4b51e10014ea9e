use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// prop
//  ├── list_price
//  ├── permalink
//  ├── location
//  │    └── address
//  │         └── line
//  └── description
//       ├── beds
//       ├── baths
//       ├── baths_consolidated
//       └── sqft
//
// Every field is optional and every field is read leniently: a value of the wrong
// type becomes `None` instead of failing the whole record. The site has shipped
// `baths_consolidated` both as a number and as a string like "2.5".

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Property {
    #[serde(deserialize_with = "lenient")]
    pub location: Option<Location>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<Description>,
    #[serde(deserialize_with = "lenient_i64")]
    pub list_price: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub permalink: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "lenient")]
    pub address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "lenient")]
    pub line: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Description {
    #[serde(deserialize_with = "lenient_i64")]
    pub beds: Option<i64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub baths: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub baths_consolidated: Option<f64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub sqft: Option<i64>,
}

impl Property {
    pub fn address_line(&self) -> Option<&str> {
        self.location
            .as_ref()?
            .address
            .as_ref()?
            .line
            .as_deref()
    }

    pub fn beds(&self) -> Option<i64> {
        self.description.as_ref()?.beds
    }

    pub fn baths(&self) -> Option<f64> {
        let description = self.description.as_ref()?;
        description.baths_consolidated.or(description.baths)
    }

    pub fn sqft(&self) -> Option<i64> {
        self.description.as_ref()?.sqft
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from(&value))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(n) = value.as_i64() {
        return Ok(Some(n));
    }
    Ok(number_from(&value).map(|f| f.round() as i64))
}

fn number_from(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    n.is_finite().then_some(n)
}
