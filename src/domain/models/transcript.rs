// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 成绩类型
///
/// 决定请求参数模板以及科目记录上的 `attempt` 标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultVariant {
    /// 常规考试成绩
    #[serde(rename = "regular")]
    Regular,
    /// 复核（重新评分）成绩
    #[serde(rename = "rcrv")]
    Recorrection,
}

impl ResultVariant {
    /// 所有成绩类型，按请求生成顺序排列
    pub const ALL: [ResultVariant; 2] = [ResultVariant::Regular, ResultVariant::Recorrection];

    /// 门户查询参数模板，准考证号直接拼接在末尾
    pub fn query_template(&self) -> &'static str {
        match self {
            ResultVariant::Regular => {
                "&degree=btech&etype=r17&result=null&grad=null&type=intgrade&htno="
            }
            ResultVariant::Recorrection => {
                "&degree=btech&etype=r17&result=gradercrv&grad=null&type=rcrvintgrade&htno="
            }
        }
    }

    pub fn attempt_tag(&self) -> &'static str {
        match self {
            ResultVariant::Regular => "regular",
            ResultVariant::Recorrection => "rcrv",
        }
    }
}

impl fmt::Display for ResultVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attempt_tag())
    }
}

/// 学生身份信息
///
/// 每次抓取只设置一次，来源于第一个成功解析的页面
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdentity {
    pub hall_ticket: String,
    pub name: String,
    pub father_name: String,
    pub college_code: String,
    pub college: Option<String>,
    pub branch: Option<String>,
}

/// 科目成绩记录
///
/// `internal`、`external`、`total` 仅在源表格包含对应列时存在
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    pub subject_code: String,
    pub subject_name: String,
    pub exam_code: String,
    pub grade: String,
    pub credits: String,
    pub semester: String,
    pub attempt: ResultVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
}

/// 学期成绩块
///
/// 每个产生至少一条科目记录的页面对应一个块；同一学期的常规与复核成绩
/// 是两个独立的块，不做合并。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterBlock {
    pub semester: String,
    #[serde(rename = "meta")]
    pub identity: Arc<StudentIdentity>,
    pub subjects: Vec<SubjectRecord>,
}

/// 成绩单
///
/// 按页面解析顺序排列的学期块列表，非空
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    blocks: Vec<SemesterBlock>,
}

impl Transcript {
    /// 从学期块列表构建成绩单，列表为空时返回 `None`
    pub fn from_blocks(blocks: Vec<SemesterBlock>) -> Option<Self> {
        if blocks.is_empty() {
            None
        } else {
            Some(Self { blocks })
        }
    }

    pub fn blocks(&self) -> &[SemesterBlock] {
        &self.blocks
    }

    /// 成绩单共享的学生身份
    pub fn identity(&self) -> &StudentIdentity {
        // from_blocks guarantees at least one block
        &self.blocks[0].identity
    }

    pub fn into_blocks(self) -> Vec<SemesterBlock> {
        self.blocks
    }
}

/// 学期视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterResult {
    pub semester: String,
    pub subjects: Vec<SubjectRecord>,
}

/// 规范化后的成绩结果
///
/// HTTP 接口返回、缓存以及持久化存储使用的统一结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub hall_ticket: String,
    pub name: String,
    pub father_name: String,
    pub college: Option<String>,
    pub college_code: String,
    pub branch: Option<String>,
    pub semesters: Vec<SemesterResult>,
}

impl NormalizedResult {
    /// 将成绩单展开为规范化结构
    ///
    /// 身份信息取自第一个学期块，`hall_ticket` 使用请求中的规范化准考证号
    pub fn from_transcript(hall_ticket: &str, transcript: Transcript) -> Self {
        let identity = transcript.identity().clone();
        let semesters = transcript
            .into_blocks()
            .into_iter()
            .map(|block| SemesterResult {
                semester: block.semester,
                subjects: block.subjects,
            })
            .collect();

        Self {
            hall_ticket: hall_ticket.to_string(),
            name: identity.name,
            father_name: identity.father_name,
            college: identity.college,
            college_code: identity.college_code,
            branch: identity.branch,
            semesters,
        }
    }
}
