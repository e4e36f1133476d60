//! Tag endpoints.
//!
//! - `POST   /tags/apply`   — Apply one or more tags to an item
//! - `GET    /tags`         — List tags on an item
//! - `GET    /tags/items`   — List items carrying a tag
//! - `DELETE /tags/remove`  — Remove one tag from an item

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
};
use serde::Deserialize;
use tracing::debug;

use crate::SharedState;
use crate::body::{JsonBody, JsonQuery, non_empty};
use crate::envelope::{Envelope, ItemTags, TaggedItems};
use crate::error::ApiError;

const MISSING_APPLY: &str = "Missing userID, itemID, or tags";
const MISSING_ITEM_QUERY: &str = "Missing userID or itemID";
const MISSING_TAG_QUERY: &str = "Missing userID or tag";
const MISSING_REMOVE: &str = "Missing userID, itemID, or tag";

const APPLIED: &str = "Tags applied to item";
const REMOVED: &str = "Tag removed from item";
const NOT_FOUND: &str = "Tag not found on item; no changes made";

/// Routes under `/tags`. Merged into the top-level router.
pub fn tags_router() -> Router<SharedState> {
    Router::new()
        .route("/tags", get(list_tags_handler))
        .route("/tags/apply", post(apply_tags_handler))
        .route("/tags/items", get(list_items_handler))
        .route("/tags/remove", delete(remove_tag_handler))
}

#[derive(Deserialize)]
struct ItemQuery {
    #[serde(rename = "userID")]
    user_id: Option<String>,
    #[serde(rename = "itemID")]
    item_id: Option<String>,
}

#[derive(Deserialize)]
struct TagQuery {
    #[serde(rename = "userID")]
    user_id: Option<String>,
    tag: Option<String>,
}

type ItemTagsResponse = (StatusCode, Json<Envelope<ItemTags>>);

async fn apply_tags_handler(
    State(state): State<SharedState>,
    body: JsonBody,
) -> Result<ItemTagsResponse, ApiError> {
    let (Some(user_id), Some(item_id), Some(tags)) = (
        body.required_str("userID"),
        body.required_str("itemID"),
        body.required_str_array("tags"),
    ) else {
        return Err(ApiError::MissingFields(MISSING_APPLY));
    };

    let current = state.store.apply_tags(&user_id, &item_id, &tags).await?;
    debug!(
        user_id = %user_id,
        item_id = %item_id,
        requested = tags.len(),
        held = current.len(),
        "Tags applied"
    );

    Ok((
        StatusCode::CREATED,
        Json(
            Envelope::success(ItemTags {
                user_id,
                item_id,
                tags: current,
            })
            .with_message(APPLIED),
        ),
    ))
}

async fn list_tags_handler(
    State(state): State<SharedState>,
    JsonQuery(query): JsonQuery<ItemQuery>,
) -> Result<ItemTagsResponse, ApiError> {
    let (Some(user_id), Some(item_id)) = (non_empty(query.user_id), non_empty(query.item_id))
    else {
        return Err(ApiError::MissingFields(MISSING_ITEM_QUERY));
    };

    let tags = state.store.tags_for_item(&user_id, &item_id).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::success(ItemTags {
            user_id,
            item_id,
            tags,
        })),
    ))
}

async fn list_items_handler(
    State(state): State<SharedState>,
    JsonQuery(query): JsonQuery<TagQuery>,
) -> Result<(StatusCode, Json<Envelope<TaggedItems>>), ApiError> {
    let (Some(user_id), Some(tag)) = (non_empty(query.user_id), non_empty(query.tag)) else {
        return Err(ApiError::MissingFields(MISSING_TAG_QUERY));
    };

    let item_ids = state.store.items_by_tag(&user_id, &tag).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::success(TaggedItems {
            user_id,
            tag,
            item_ids,
        })),
    ))
}

async fn remove_tag_handler(
    State(state): State<SharedState>,
    body: JsonBody,
) -> Result<ItemTagsResponse, ApiError> {
    let (Some(user_id), Some(item_id), Some(tag)) = (
        body.required_str("userID"),
        body.required_str("itemID"),
        body.required_str("tag"),
    ) else {
        return Err(ApiError::MissingFields(MISSING_REMOVE));
    };

    let removal = state.store.remove_tag(&user_id, &item_id, &tag).await?;
    debug!(
        user_id = %user_id,
        item_id = %item_id,
        tag = %tag,
        removed = removal.removed,
        "Tag removal"
    );

    let message = if removal.removed { REMOVED } else { NOT_FOUND };
    Ok((
        StatusCode::OK,
        Json(
            Envelope::success(ItemTags {
                user_id,
                item_id,
                tags: removal.remaining,
            })
            .with_message(message),
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GatewayState, build_router};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tagging_config::StoreBackend;
    use tower::ServiceExt;

    fn test_state() -> SharedState {
        Arc::new(GatewayState {
            store: tagging_store::build_store(StoreBackend::Scan),
        })
    }

    async fn send(state: &SharedState, req: Request<Body>) -> (StatusCode, Value) {
        let app = build_router(state.clone());
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn apply_kitchen_fragile(state: &SharedState) {
        let (status, _) = send(
            state,
            json_request(
                "POST",
                "/tags/apply",
                json!({"userID": "u1", "itemID": "item123", "tags": ["Kitchen", "Fragile"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn apply_returns_created_with_current_tags() {
        let state = test_state();
        let (status, json) = send(
            &state,
            json_request(
                "POST",
                "/tags/apply",
                json!({"userID": "u1", "itemID": "item123", "tags": ["Kitchen", "Fragile"]}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            json,
            json!({
                "status": "success",
                "message": "Tags applied to item",
                "data": {"userID": "u1", "itemID": "item123", "tags": ["Kitchen", "Fragile"]}
            })
        );
    }

    #[tokio::test]
    async fn apply_twice_keeps_single_copy() {
        let state = test_state();
        apply_kitchen_fragile(&state).await;
        let (_, json) = send(
            &state,
            json_request(
                "POST",
                "/tags/apply",
                json!({"userID": "u1", "itemID": "item123", "tags": ["Kitchen"]}),
            ),
        )
        .await;
        assert_eq!(json["data"]["tags"], json!(["Kitchen", "Fragile"]));
        assert_eq!(state.store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn list_tags_round_trip() {
        let state = test_state();
        apply_kitchen_fragile(&state).await;

        let (status, json) = send(&state, get_request("/tags?userID=u1&itemID=item123")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "status": "success",
                "data": {"userID": "u1", "itemID": "item123", "tags": ["Kitchen", "Fragile"]}
            })
        );
    }

    #[tokio::test]
    async fn list_tags_for_unknown_item_is_empty() {
        let state = test_state();
        let (status, json) = send(&state, get_request("/tags?userID=u1&itemID=nope")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["tags"], json!([]));
    }

    #[tokio::test]
    async fn list_items_by_each_tag() {
        let state = test_state();
        apply_kitchen_fragile(&state).await;

        for tag in ["Kitchen", "Fragile"] {
            let (status, json) =
                send(&state, get_request(&format!("/tags/items?userID=u1&tag={tag}"))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                json,
                json!({
                    "status": "success",
                    "data": {"userID": "u1", "tag": tag, "itemIDs": ["item123"]}
                })
            );
        }
    }

    #[tokio::test]
    async fn remove_then_remove_again() {
        let state = test_state();
        apply_kitchen_fragile(&state).await;
        let body = json!({"userID": "u1", "itemID": "item123", "tag": "Fragile"});

        let (status, json) = send(&state, json_request("DELETE", "/tags/remove", body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Tag removed from item");
        assert_eq!(json["data"]["tags"], json!(["Kitchen"]));

        let (status, json) = send(&state, json_request("DELETE", "/tags/remove", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Tag not found on item; no changes made");
        assert_eq!(json["data"]["tags"], json!(["Kitchen"]));
        assert_eq!(state.store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn apply_rejects_missing_or_empty_fields() {
        let state = test_state();
        let cases = [
            json!({"userID": "u1", "itemID": "item123", "tags": []}),
            json!({"userID": "u1", "itemID": "item123"}),
            json!({"userID": "", "itemID": "item123", "tags": ["A"]}),
            json!({"userID": "u1", "itemID": "item123", "tags": "A"}),
            json!({"userID": "u1", "itemID": 0, "tags": ["A"]}),
            json!({"itemID": "item123", "tags": ["A"]}),
        ];
        for body in cases {
            let (status, json) = send(&state, json_request("POST", "/tags/apply", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                json,
                json!({"status": "error", "message": "Missing userID, itemID, or tags"})
            );
        }
        assert_eq!(state.store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn apply_accepts_empty_string_tag() {
        let state = test_state();
        let (status, json) = send(
            &state,
            json_request(
                "POST",
                "/tags/apply",
                json!({"userID": "u1", "itemID": "item123", "tags": [""]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["tags"], json!([""]));
    }

    #[tokio::test]
    async fn query_endpoints_reject_missing_params() {
        let state = test_state();
        for uri in ["/tags", "/tags?userID=u1", "/tags?userID=&itemID=item123"] {
            let (status, json) = send(&state, get_request(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "Missing userID or itemID");
        }
        for uri in ["/tags/items", "/tags/items?tag=Kitchen", "/tags/items?userID=u1&tag="] {
            let (status, json) = send(&state, get_request(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "Missing userID or tag");
        }
    }

    #[tokio::test]
    async fn repeated_query_keys_are_json_errors() {
        let state = test_state();
        for uri in [
            "/tags?userID=u1&userID=u2&itemID=i1",
            "/tags/items?userID=u1&tag=a&tag=b",
        ] {
            let app = build_router(state.clone());
            let response = app.oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            assert!(content_type.starts_with("application/json"), "{uri}: {content_type}");

            let body = response.into_body().collect().await.unwrap().to_bytes();
            let json: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["status"], "error");
            assert!(
                json["message"]
                    .as_str()
                    .unwrap()
                    .starts_with("Malformed query string"),
                "{uri}: {json}"
            );
        }
    }

    #[tokio::test]
    async fn remove_rejects_missing_or_empty_fields() {
        let state = test_state();
        apply_kitchen_fragile(&state).await;
        let cases = [
            json!({"userID": "u1", "itemID": "item123"}),
            json!({"userID": "", "itemID": "item123", "tag": "Fragile"}),
            json!({"userID": "u1", "itemID": null, "tag": "Fragile"}),
            json!({"userID": "u1", "itemID": "item123", "tag": 7}),
            json!({"userID": "u1", "itemID": "item123", "tag": ""}),
        ];
        for body in cases {
            let (status, json) = send(&state, json_request("DELETE", "/tags/remove", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                json,
                json!({"status": "error", "message": "Missing userID, itemID, or tag"})
            );
        }
        assert_eq!(state.store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn body_without_json_content_type_counts_as_missing() {
        let state = test_state();
        let req = Request::builder()
            .method("POST")
            .uri("/tags/apply")
            .body(Body::from(
                json!({"userID": "u1", "itemID": "item123", "tags": ["A"]}).to_string(),
            ))
            .unwrap();
        let (status, json) = send(&state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Missing userID, itemID, or tags");
    }

    #[tokio::test]
    async fn malformed_json_is_a_json_error() {
        let state = test_state();
        let req = Request::builder()
            .method("DELETE")
            .uri("/tags/remove")
            .header("content-type", "application/json")
            .body(Body::from("{\"userID\": "))
            .unwrap();
        let (status, json) = send(&state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .starts_with("Malformed JSON body")
        );
    }

    #[tokio::test]
    async fn indexed_backend_serves_same_responses() {
        let state: SharedState = Arc::new(GatewayState {
            store: tagging_store::build_store(StoreBackend::Indexed),
        });
        apply_kitchen_fragile(&state).await;
        let (_, json) = send(&state, get_request("/tags/items?userID=u1&tag=Kitchen")).await;
        assert_eq!(json["data"]["itemIDs"], json!(["item123"]));
    }
}
