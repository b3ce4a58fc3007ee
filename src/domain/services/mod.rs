// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 表格解析（table_parser）：把成绩页面解析为身份与科目记录
/// - 抓取流水线（scrape_pipeline）：并发抓取、顺序解析并汇总为成绩单
/// - 成绩查询服务（transcript_service）：缓存、存储与抓取之间的查询策略
pub mod scrape_pipeline;
pub mod table_parser;
pub mod transcript_service;
