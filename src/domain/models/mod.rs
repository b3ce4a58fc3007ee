// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 定义准考证号、抓取任务与结果、成绩单等核心实体
pub mod fetch;
pub mod hall_ticket;
pub mod transcript;
