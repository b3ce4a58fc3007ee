// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 缓存（cache）：Redis客户端与成绩结果缓存
/// - 学院名录（college_directory）：学院代码到名称的查询表及其磁盘缓存
/// - 数据库（database）：数据库连接、迁移和实体映射
/// - 指标（metrics）：Prometheus导出器
/// - 仓库实现（repositories）：领域仓库接口的具体实现
pub mod cache;
pub mod college_directory;
pub mod database;
pub mod metrics;
pub mod repositories;
