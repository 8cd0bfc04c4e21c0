use serde::{Deserialize, Deserializer, Serialize};

/// Providers send `null` for sparse fields; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Merged movie record returned to callers.
///
/// Every field except `comments` is passed through untouched from the
/// metadata provider. Field names on the wire follow the provider's casing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "Title", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "Year", default, deserialize_with = "null_as_default")]
    pub year: String,
    #[serde(rename = "Rated", default, deserialize_with = "null_as_default")]
    pub rated: String,
    #[serde(rename = "Runtime", default, deserialize_with = "null_as_default")]
    pub runtime: String,
    #[serde(
        rename = "Rating",
        alias = "imdbRating",
        default,
        deserialize_with = "null_as_default"
    )]
    pub rating: String,
    #[serde(rename = "Comments", default, deserialize_with = "null_as_default")]
    pub comments: Vec<String>,
}

/// Raw metadata payload. OMDb answers unknown titles with HTTP 200 and
/// `"Response": "False"`, so those markers are kept next to the record.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataResponse {
    #[serde(flatten)]
    pub record: MovieRecord,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl MetadataResponse {
    pub fn is_negative(&self) -> bool {
        self.response
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("false"))
    }
}

/// A tentative search match, before any review data is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Review>,
}
