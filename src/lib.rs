// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含成绩单实体、表格解析、抓取流水线与查询策略
pub mod domain;

/// 引擎模块
///
/// 实现门户客户端与并发抓取调度
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如数据库、缓存、学院名录等
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和错误映射
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
