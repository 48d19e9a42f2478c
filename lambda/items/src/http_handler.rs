use aws_lambda_events::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use aws_lambda_events::encodings::Body;
use base64::{engine::general_purpose, Engine as _};
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use crate::error::ItemError;
use crate::item::{DeletedItem, Item};
use crate::store::ItemStore;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// The routes this function is wired to in API Gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    DeleteItem,
    PutItem,
    GetItem,
    ListItems,
}

impl Route {
    const ALL: [Route; 4] = [
        Route::DeleteItem,
        Route::PutItem,
        Route::GetItem,
        Route::ListItems,
    ];

    fn key(self) -> &'static str {
        match self {
            Route::DeleteItem => "DELETE /items/{id}",
            Route::PutItem => "PUT /items",
            Route::GetItem => "GET /items/{id}",
            Route::ListItems => "GET /items",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.key() == key)
    }
}

fn route_key(event: &ApiGatewayV2httpRequest) -> &str {
    event
        .route_key
        .as_deref()
        .or(event.request_context.route_key.as_deref())
        .unwrap_or_default()
}

fn path_id(event: &ApiGatewayV2httpRequest) -> Result<&str, ItemError> {
    event
        .path_parameters
        .get("id")
        .map(String::as_str)
        .ok_or(ItemError::MissingPathParameter("id"))
}

fn body_item(event: &ApiGatewayV2httpRequest) -> Result<Item, ItemError> {
    let body = event.body.as_deref().unwrap_or_default();
    if event.is_base64_encoded {
        let bytes = general_purpose::STANDARD.decode(body)?;
        first_item(&bytes)
    } else {
        first_item(body.as_bytes())
    }
}

/// Reads the leading JSON value and ignores whatever follows it.
fn first_item(bytes: &[u8]) -> Result<Item, ItemError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    Ok(Item::deserialize(&mut deserializer)?)
}

fn json_response<T: Serialize>(
    status: i64,
    value: &T,
) -> Result<ApiGatewayV2httpResponse, ItemError> {
    let body = serde_json::to_string(value)?;
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(ApiGatewayV2httpResponse {
        status_code: status,
        headers,
        body: Some(Body::Text(body)),
        ..Default::default()
    })
}

fn not_found() -> ApiGatewayV2httpResponse {
    ApiGatewayV2httpResponse {
        status_code: 404,
        ..Default::default()
    }
}

fn error_response(err: &ItemError) -> Result<ApiGatewayV2httpResponse, Error> {
    let envelope = ErrorResponse {
        error: err.to_string(),
    };
    Ok(json_response(500, &envelope)?)
}

async fn dispatch<S: ItemStore + ?Sized>(
    store: &S,
    key: &str,
    event: &ApiGatewayV2httpRequest,
) -> Result<ApiGatewayV2httpResponse, ItemError> {
    let route =
        Route::from_key(key).ok_or_else(|| ItemError::UnsupportedRoute(key.to_string()))?;
    tracing::debug!(route = route.key(), "dispatching");

    match route {
        Route::DeleteItem => {
            let id = store.delete_by_id(path_id(event)?).await?;
            json_response(202, &DeletedItem { id: &id })
        }
        Route::PutItem => {
            let item = store.put_replace(body_item(event)?).await?;
            json_response(201, &item)
        }
        Route::GetItem => match store.get(path_id(event)?).await? {
            Some(item) => json_response(200, &item),
            None => Ok(not_found()),
        },
        Route::ListItems => {
            let items = store.list_all().await?;
            json_response(200, &items)
        }
    }
}

pub(crate) async fn function_handler<S: ItemStore + ?Sized>(
    store: &S,
    event: LambdaEvent<ApiGatewayV2httpRequest>,
) -> Result<ApiGatewayV2httpResponse, Error> {
    let request = event.payload;
    let key = route_key(&request);

    match dispatch(store, key, &request).await {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::warn!(route = key, error = %e, "request failed");
            error_response(&e)
        }
    }
}
