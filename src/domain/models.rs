use async_graphql::SimpleObject;
use serde::{Deserialize, Deserializer};

/// Upstream projections. Every scalar field is optional: a field the
/// upstream omits resolves to null, and unknown upstream fields are
/// dropped during deserialization. Identifiers are opaque integers owned
/// by the upstream; this service never generates or validates them.

#[derive(Debug, Clone, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Post {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Comment {
    pub id: Option<i64>,
    pub post_id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Album {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Photo {
    pub id: Option<i64>,
    pub album_id: Option<i64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Todo {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct User {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<Address>,
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub suite: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, Deserialize, SimpleObject)]
pub struct Geo {
    #[serde(default, deserialize_with = "coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "coordinate")]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: Option<String>,
    pub catch_phrase: Option<String>,
    pub bs: Option<String>,
}

/// The upstream serializes coordinates as quoted strings ("-37.3159");
/// accept both that and plain numbers.
fn coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(value)) => value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
