// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层依赖的存储抽象，具体实现由基础设施层提供：
/// - 成绩结果仓库（transcript_repository）：持久化存储
/// - 成绩结果缓存（transcript_cache）：带过期时间的响应缓存
pub mod transcript_cache;
pub mod transcript_repository;
