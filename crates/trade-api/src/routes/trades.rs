//! Trade endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tradeboard_core::{
    ApiResponse, CounterOfferRequest, CreateTradeRequest, HistoryQuery, TradeId, TradeRecord,
};

use crate::dto::ErrorResponse;
use crate::AppState;

/// Create trade routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trades).post(create_trade))
        .route("/:id", get(get_trade).put(counter_offer))
}

/// POST /trades - Open a new trade
pub async fn create_trade(
    State(state): State<AppState>,
    Json(request): Json<CreateTradeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TradeRecord>>), ErrorResponse> {
    let record = state.create_trade(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// GET /trades - List trades, newest first
pub async fn list_trades(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<ApiResponse<Vec<TradeRecord>>> {
    Json(ApiResponse::ok(state.list_trades(&query).await))
}

/// GET /trades/:id - Fetch a single trade
pub async fn get_trade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TradeRecord>>, ErrorResponse> {
    let record = state.get_trade(&TradeId::new(id)).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// PUT /trades/:id - Counter an open trade
pub async fn counter_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CounterOfferRequest>,
) -> Result<Json<ApiResponse<TradeRecord>>, ErrorResponse> {
    let record = state.counter_offer(&TradeId::new(id), request).await?;
    Ok(Json(ApiResponse::ok(record)))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::create_app;
    use crate::AppState;

    fn create_body() -> Value {
        json!({
            "initiatorAddress": "alice",
            "counterpartyAddress": "bob",
            "initiatorItems": [
                {"nftId": "sword", "side": "INITIATOR", "tokenAmount": 2.0,
                 "metadata": {"name": "Sword", "image": "", "rarity": "rare"}}
            ],
            "counterpartyItems": [],
            "metadata": {"message": "hi", "fairnessScore": 0, "createdAt": 1}
        })
    }

    async fn call(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (u16, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = create_app(state.clone())
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let state = AppState::new();
        let (status, body) = call(&state, Method::POST, "/trades", Some(create_body())).await;
        assert_eq!(status, 201);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "PENDING");
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = call(&state, Method::GET, &format!("/trades/{}", id), None).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["history"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejections_use_envelope() {
        let state = AppState::new();
        let mut body = create_body();
        body["initiatorItems"] = json!([]);
        let (status, body) = call(&state, Method::POST, "/trades", Some(body)).await;
        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("at least one item"));

        let (status, body) = call(&state, Method::GET, "/trades/missing", None).await;
        assert_eq!(status, 404);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_counter_and_list_by_user() {
        let state = AppState::new();
        let (_, created) = call(&state, Method::POST, "/trades", Some(create_body())).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let counter = json!({
            "action": "counteroffer",
            "userAddress": "bob",
            "items": [
                {"nftId": "sword", "side": "INITIATOR", "tokenAmount": 2.0,
                 "metadata": {"name": "Sword", "image": "", "rarity": "rare"}},
                {"nftId": "shield", "side": "COUNTERPARTY", "tokenAmount": 2.0,
                 "metadata": {"name": "Shield", "image": "", "rarity": "rare"}}
            ],
            "message": "shield for sword"
        });
        let (status, body) =
            call(&state, Method::PUT, &format!("/trades/{}", id), Some(counter)).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["status"], "COUNTERED");
        assert_eq!(body["data"]["history"].as_array().unwrap().len(), 2);

        let (status, body) = call(&state, Method::GET, "/trades?user=bob&status=COUNTERED", None).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (_, body) = call(&state, Method::GET, "/trades?user=carol", None).await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health_counts_trades() {
        let state = AppState::new();
        call(&state, Method::POST, "/trades", Some(create_body())).await;
        let (status, body) = call(&state, Method::GET, "/health", None).await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["trades"], 1);
    }
}
