use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::error::ItemError;

pub(crate) const ID: &str = "id";

/// The single record type served by the function.
///
/// A put always writes all three fields, so a body without `name` or `price`
/// (or with them set to `null`) replaces the stored values with `""` and `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Item {
    pub(crate) id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) price: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    /// `id` and `name` as `S`, `price` as `N`.
    pub(crate) fn to_attributes(&self) -> Result<HashMap<String, AttributeValue>, ItemError> {
        Ok(serde_dynamo::to_item(self)?)
    }

    pub(crate) fn from_attributes(
        attributes: &HashMap<String, AttributeValue>,
    ) -> Result<Self, ItemError> {
        Ok(serde_dynamo::from_item(attributes.clone())?)
    }
}

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub(crate) struct DeletedItem<'a> {
    pub(crate) id: &'a str,
}
