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

use crate::domain::models::transcript::NormalizedResult;
use crate::domain::repositories::transcript_repository::{RepositoryError, TranscriptRepository};
use crate::infrastructure::database::entities::transcript_result as result_entity;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::sync::Arc;

/// 成绩结果仓库实现
///
/// 结果以JSON文本形式保存在 `results` 表中，主键为规范化准考证号
pub struct TranscriptRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TranscriptRepositoryImpl {
    /// 创建新的成绩结果仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TranscriptRepository for TranscriptRepositoryImpl {
    async fn get(&self, hall_ticket: &str) -> Result<Option<NormalizedResult>, RepositoryError> {
        let model = result_entity::Entity::find_by_id(hall_ticket.to_string())
            .one(self.db.as_ref())
            .await?;

        match model {
            Some(m) => Ok(Some(serde_json::from_str(&m.data)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, hall_ticket: &str, result: &NormalizedResult) -> Result<(), RepositoryError> {
        let active_model = result_entity::ActiveModel {
            hall_ticket: Set(hall_ticket.to_string()),
            data: Set(serde_json::to_string(result)?),
        };

        result_entity::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(result_entity::Column::HallTicket)
                    .update_column(result_entity::Column::Data)
                    .to_owned(),
            )
            .exec(self.db.as_ref())
            .await?;

        Ok(())
    }
}
