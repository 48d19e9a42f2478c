use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::error::ItemError;
use crate::item::{Item, ID};

/// Key-value access to the item collection.
///
/// Store failures are returned as-is; nothing here retries.
#[async_trait]
pub(crate) trait ItemStore: Send + Sync {
    /// `Ok(None)` when no record has this id.
    async fn get(&self, id: &str) -> Result<Option<Item>, ItemError>;

    /// Upserts the whole record under `item.id`.
    async fn put_replace(&self, item: Item) -> Result<Item, ItemError>;

    /// Succeeds whether or not the id existed.
    async fn delete_by_id(&self, id: &str) -> Result<String, ItemError>;

    /// Every record in the collection, in no particular order.
    async fn list_all(&self) -> Result<Vec<Item>, ItemError>;
}

pub(crate) struct DynamoItemStore {
    client: Client,
    table: String,
}

impl DynamoItemStore {
    pub(crate) fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl ItemStore for DynamoItemStore {
    async fn get(&self, id: &str) -> Result<Option<Item>, ItemError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(ID, AttributeValue::S(id.to_string()))
            .send()
            .await?;

        output.item().map(Item::from_attributes).transpose()
    }

    async fn put_replace(&self, item: Item) -> Result<Item, ItemError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item.to_attributes()?))
            .send()
            .await?;

        Ok(item)
    }

    async fn delete_by_id(&self, id: &str) -> Result<String, ItemError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(ID, AttributeValue::S(id.to_string()))
            .send()
            .await?;

        Ok(id.to_string())
    }

    async fn list_all(&self) -> Result<Vec<Item>, ItemError> {
        let records: Vec<_> = self
            .client
            .scan()
            .table_name(&self.table)
            .into_paginator()
            .items()
            .send()
            .collect::<Result<_, _>>()
            .await?;

        records.iter().map(Item::from_attributes).collect()
    }
}



#[cfg(test)]
mod dynamo_tests {
    use super::*;
    use aws_sdk_dynamodb::operation::get_item::{GetItemError, GetItemOutput};
    use aws_sdk_dynamodb::operation::put_item::PutItemOutput;
    use aws_sdk_dynamodb::operation::scan::ScanOutput;
    use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use std::collections::HashMap;

    const TABLE: &str = "items-test";

    fn record(id: &str, name: &str, price: &str) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("id".to_string(), AttributeValue::S(id.to_string())),
            ("name".to_string(), AttributeValue::S(name.to_string())),
            ("price".to_string(), AttributeValue::N(price.to_string())),
        ])
    }

    #[tokio::test]
    async fn get_without_a_record_is_none() {
        let empty = mock!(Client::get_item)
            .match_requests(|req| {
                req.table_name() == Some(TABLE)
                    && req.key().and_then(|key| key.get("id"))
                        == Some(&AttributeValue::S("missing".to_string()))
            })
            .then_output(|| GetItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&empty]);
        let store = DynamoItemStore::new(client, TABLE);

        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn get_maps_the_stored_record() {
        let found = mock!(Client::get_item).then_output(|| {
            GetItemOutput::builder()
                .set_item(Some(record("1", "widget", "9.99")))
                .build()
        });
        let client = mock_client!(aws_sdk_dynamodb, [&found]);
        let store = DynamoItemStore::new(client, TABLE);

        let item = store.get("1").await.unwrap().unwrap();
        assert_eq!(item.name, "widget");
        assert_eq!(item.price, 9.99);
    }

    #[tokio::test]
    async fn service_errors_carry_the_sdk_message() {
        let missing_table = mock!(Client::get_item).then_error(|| {
            GetItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        });
        let client = mock_client!(aws_sdk_dynamodb, [&missing_table]);
        let store = DynamoItemStore::new(client, TABLE);

        let err = store.get("1").await.unwrap_err();
        assert!(matches!(err, ItemError::Store(_)));
        assert!(
            err.to_string().contains("Requested resource not found"),
            "{err}"
        );
    }

    #[tokio::test]
    async fn put_sends_all_three_attributes() {
        let put = mock!(Client::put_item)
            .match_requests(|req| {
                req.table_name() == Some(TABLE) && req.item() == Some(&record("1", "", "0"))
            })
            .then_output(|| PutItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&put]);
        let store = DynamoItemStore::new(client, TABLE);

        let item = Item {
            id: "1".to_string(),
            name: String::new(),
            price: 0.0,
        };
        assert_eq!(store.put_replace(item.clone()).await.unwrap(), item);
    }

    #[tokio::test]
    async fn list_all_follows_last_evaluated_key() {
        let first_page = mock!(Client::scan)
            .match_requests(|req| req.exclusive_start_key().is_none())
            .then_output(|| {
                ScanOutput::builder()
                    .items(record("a", "first", "1"))
                    .items(record("b", "first", "2"))
                    .last_evaluated_key("id", AttributeValue::S("b".to_string()))
                    .build()
            });
        let second_page = mock!(Client::scan)
            .match_requests(|req| {
                req.exclusive_start_key().and_then(|key| key.get("id"))
                    == Some(&AttributeValue::S("b".to_string()))
            })
            .then_output(|| {
                ScanOutput::builder()
                    .items(record("c", "second", "3.5"))
                    .build()
            });
        let client = mock_client!(
            aws_sdk_dynamodb,
            RuleMode::MatchAny,
            [&first_page, &second_page]
        );
        let store = DynamoItemStore::new(client, TABLE);

        let mut ids: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.id)
            .collect();
        ids.sort();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
