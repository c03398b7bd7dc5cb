use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::series;

/// Synthetic chart series for a single integer
/// POST /getvalue
pub async fn get_value(Json(input): Json<i64>) -> impl IntoResponse {
    (StatusCode::OK, Json(series::generate(input)))
}
