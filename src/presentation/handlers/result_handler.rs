// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::extract::{Extension, Json, Path};
use std::sync::Arc;

use crate::domain::services::transcript_service::{LookupResult, TranscriptService};
use crate::presentation::errors::AppError;

/// 查询学生成绩
///
/// 依次查询缓存、持久化存储，最后实时抓取门户
pub async fn get_result(
    Extension(service): Extension<Arc<TranscriptService>>,
    Path(hall_ticket): Path<String>,
) -> Result<Json<LookupResult>, AppError> {
    let result = service.lookup(&hall_ticket).await?;
    Ok(Json(result))
}
