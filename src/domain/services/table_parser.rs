// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::branch::branch_name;
use crate::domain::models::fetch::FetchTask;
use crate::domain::models::transcript::{SemesterBlock, StudentIdentity, SubjectRecord};
use crate::domain::services::scrape_pipeline::ScrapeRun;
use crate::infrastructure::college_directory::CollegeDirectory;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// 页面包含成绩表时必然出现的标记
pub const RESULTS_MARKER: &str = "SUBJECT CODE";

const SUBJECT_CODE: &str = "SUBJECT CODE";
const SUBJECT_NAME: &str = "SUBJECT NAME";
const GRADE: &str = "GRADE";
const CREDITS: &str = "CREDITS(C)";
const INTERNAL: &str = "INTERNAL";
const EXTERNAL: &str = "EXTERNAL";
const TOTAL: &str = "TOTAL";

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("valid selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));
static HEADER: Lazy<Selector> = Lazy::new(|| Selector::parse("b").expect("valid selector"));

/// 解析错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 页面不含成绩表标记
    #[error("payload has no results table")]
    NoResultsTable,
    /// 结构化表格数量不足
    #[error("expected at least two tables, found {0}")]
    MissingTables(usize),
    /// 身份信息块结构异常
    #[error("identity block malformed: missing {0}")]
    MalformedIdentity(&'static str),
    /// 表头缺少必要列
    #[error("column {0:?} missing from header")]
    MissingColumn(&'static str),
    /// 行缺少对应单元格
    #[error("row has no cell for column {0:?}")]
    MissingCell(&'static str),
}

/// 单个页面的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// 页面没有可用数据
    Skipped(ParseError),
    /// 身份信息提取失败，整页放弃
    IdentityFailed(ParseError),
    /// 没有提取到任何科目
    NoSubjects { skipped_rows: usize },
    /// 身份仍为空，科目被丢弃
    Orphaned { subjects: usize },
    /// 追加了一个学期块
    Appended { subjects: usize, skipped_rows: usize },
}

/// 科目表的列名到列序号映射
///
/// 每张表根据表头构建一次，列位置按名称解析，与列顺序无关
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: HashMap<String, usize>,
}

impl ColumnMap {
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns = HashMap::new();
        for (index, header) in headers.into_iter().enumerate() {
            // first occurrence wins
            columns.entry(header.into()).or_insert(index);
        }
        Self { columns }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    fn cell<'a>(&self, cells: &'a [String], name: &'static str) -> Result<&'a str, ParseError> {
        let index = *self
            .columns
            .get(name)
            .ok_or(ParseError::MissingColumn(name))?;
        cells
            .get(index)
            .map(String::as_str)
            .ok_or(ParseError::MissingCell(name))
    }

    fn optional_cell(&self, cells: &[String], name: &'static str) -> Result<Option<String>, ParseError> {
        if !self.contains(name) {
            return Ok(None);
        }
        self.cell(cells, name).map(|v| Some(v.to_string()))
    }

    /// 将一行单元格转换为科目记录
    pub fn subject(&self, cells: &[String], task: &FetchTask) -> Result<SubjectRecord, ParseError> {
        Ok(SubjectRecord {
            subject_code: self.cell(cells, SUBJECT_CODE)?.to_string(),
            subject_name: self.cell(cells, SUBJECT_NAME)?.to_string(),
            exam_code: task.exam_code.clone(),
            grade: self.cell(cells, GRADE)?.to_string(),
            credits: self.cell(cells, CREDITS)?.to_string(),
            semester: task.semester.clone(),
            attempt: task.variant,
            internal: self.optional_cell(cells, INTERNAL)?,
            external: self.optional_cell(cells, EXTERNAL)?,
            total: self.optional_cell(cells, TOTAL)?,
        })
    }
}

fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn cells(row: ElementRef<'_>) -> Vec<String> {
    row.select(&CELL).map(text).collect()
}

/// 从第一张表中读取学生身份
///
/// 第一行第2、4个单元格为准考证号与姓名，第二行第2、4个单元格为父亲姓名与学院代码
pub fn extract_identity(
    details: ElementRef<'_>,
    directory: &CollegeDirectory,
) -> Result<StudentIdentity, ParseError> {
    let rows: Vec<Vec<String>> = details.select(&ROW).map(cells).collect();
    let first = rows.first().ok_or(ParseError::MalformedIdentity("first row"))?;
    let second = rows.get(1).ok_or(ParseError::MalformedIdentity("second row"))?;

    let hall_ticket = first.get(1).ok_or(ParseError::MalformedIdentity("hall ticket"))?;
    let name = first.get(3).ok_or(ParseError::MalformedIdentity("name"))?;
    let father_name = second.get(1).ok_or(ParseError::MalformedIdentity("father name"))?;
    let college_code = second.get(3).ok_or(ParseError::MalformedIdentity("college code"))?;

    Ok(StudentIdentity {
        hall_ticket: hall_ticket.clone(),
        name: name.clone(),
        father_name: father_name.clone(),
        college_code: college_code.clone(),
        college: directory.lookup(college_code).map(str::to_string),
        branch: branch_name(hall_ticket).map(str::to_string),
    })
}

/// 解析一个成功抓取的页面并更新本次抓取的状态
///
/// 身份槽为空时先提取身份；随后按表头名称逐行提取科目，单行失败只跳过该行。
/// 至少提取到一个科目时追加一个学期块。
pub fn parse_payload(
    run: &mut ScrapeRun,
    task: &FetchTask,
    html: &str,
    directory: &CollegeDirectory,
) -> ParseOutcome {
    if !html.contains(RESULTS_MARKER) {
        return ParseOutcome::Skipped(ParseError::NoResultsTable);
    }

    let document = Html::parse_document(html);
    let tables: Vec<ElementRef<'_>> = document.select(&TABLE).collect();
    if tables.len() < 2 {
        return ParseOutcome::Skipped(ParseError::MissingTables(tables.len()));
    }

    if run.identity().is_none() {
        match extract_identity(tables[0], directory) {
            Ok(identity) => {
                debug!(task = %task, hall_ticket = %identity.hall_ticket, "Student identity extracted");
                run.set_identity(identity);
            }
            Err(e) => {
                debug!(task = %task, "Identity extraction failed: {}", e);
                return ParseOutcome::IdentityFailed(e);
            }
        }
    }

    let mut rows = tables[1].select(&ROW);
    let columns = match rows.next() {
        Some(header) => ColumnMap::from_headers(header.select(&HEADER).map(text)),
        None => return ParseOutcome::NoSubjects { skipped_rows: 0 },
    };

    let mut subjects = Vec::new();
    let mut skipped_rows = 0;
    for row in rows {
        let cells = cells(row);
        if cells.is_empty() {
            continue;
        }
        match columns.subject(&cells, task) {
            Ok(subject) => subjects.push(subject),
            Err(e) => {
                debug!(task = %task, "Skipping subject row: {}", e);
                skipped_rows += 1;
            }
        }
    }

    if subjects.is_empty() {
        return ParseOutcome::NoSubjects { skipped_rows };
    }

    let Some(identity) = run.identity().cloned() else {
        return ParseOutcome::Orphaned {
            subjects: subjects.len(),
        };
    };

    let count = subjects.len();
    run.append(SemesterBlock {
        semester: task.semester.clone(),
        identity,
        subjects,
    });
    ParseOutcome::Appended {
        subjects: count,
        skipped_rows,
    }
}

#[cfg(test)]
#[path = "table_parser_test.rs"]
mod tests;
