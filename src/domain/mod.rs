// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：准考证号、抓取任务、成绩单等实体
/// - 考试代码表（exam_codes）与专业解析（branch）
/// - 仓库接口（repositories）：缓存与持久化抽象接口
/// - 服务（services）：表格解析、抓取流水线与查询策略
pub mod branch;
pub mod exam_codes;
pub mod models;
pub mod repositories;
pub mod services;
