use serde::{Deserialize, Deserializer};

// `?page=abc` or `?page=` behave like a missing page instead of failing the request
pub fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.trim().parse::<i64>().ok()))
}

// the web client may send ids as strings, same as the quiz category id
pub fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    Vec::<Id>::deserialize(deserializer)?
        .into_iter()
        .map(|id| match id {
            Id::Number(n) => Ok(n),
            Id::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                serde::de::Error::custom(format!("Wrong value {s}, can not parse to i64"))
            }),
        })
        .collect()
}
