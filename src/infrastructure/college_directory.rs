// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CollegeDirectorySettings;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// 名册中的一页表格，每行是若干单元格
pub type RosterPage = Vec<Vec<String>>;

/// 学院名册来源
///
/// 名册本身是外部文档，这里只消费其表格内容。返回 `Ok(None)` 表示来源不存在。
pub trait RosterSource: Send + Sync {
    fn pages(&self) -> Result<Option<Vec<RosterPage>>>;
}

/// 文本表格名册
///
/// 读取名册 PDF 的表格导出：页之间以换页符 (`\x0c`) 分隔，
/// 单元格以制表符或 `|` 分隔，每页首行为表头。
pub struct TextRosterSource {
    path: PathBuf,
}

impl TextRosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for TextRosterSource {
    fn pages(&self) -> Result<Option<Vec<RosterPage>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading roster {}", self.path.display()))?;

        let pages = text
            .split('\x0c')
            .map(|page| {
                page.lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| {
                        line.split(['\t', '|'])
                            .map(|cell| cell.trim().to_string())
                            .collect()
                    })
                    .collect()
            })
            .collect();
        Ok(Some(pages))
    }
}

/// 学院名录
///
/// 学院代码到学院名称的只读查询表。首次构建后写入磁盘缓存，
/// 之后直接从缓存加载。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollegeDirectory {
    colleges: BTreeMap<String, String>,
}

static SHARED: OnceCell<Arc<CollegeDirectory>> = OnceCell::const_new();

impl CollegeDirectory {
    pub fn new(colleges: BTreeMap<String, String>) -> Self {
        Self { colleges }
    }

    /// 查询学院名称
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.colleges.get(code.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colleges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }

    /// 从名册表格中提取名录
    ///
    /// 跳过每页表头；只接受首列恰好两个字符且名称非空的行
    pub fn from_pages(pages: &[RosterPage]) -> Self {
        let mut colleges = BTreeMap::new();
        for page in pages {
            for row in page.iter().skip(1) {
                let (Some(code), Some(name)) = (row.first(), row.get(1)) else {
                    continue;
                };
                let (code, name) = (code.trim(), name.trim());
                if code.chars().count() == 2 && !name.is_empty() {
                    colleges.insert(code.to_string(), name.to_string());
                }
            }
        }
        Self { colleges }
    }

    /// 加载名录，缓存不存在时从名册构建并写入缓存
    ///
    /// 名册不存在时返回空名录；该过程从不失败，学院名称只影响展示
    pub async fn load_or_build(cache_path: &Path, source: &dyn RosterSource) -> Self {
        if let Some(directory) = Self::load_cache(cache_path).await {
            debug!(
                path = %cache_path.display(),
                colleges = directory.len(),
                "College directory loaded from cache"
            );
            return directory;
        }

        let pages = match source.pages() {
            Ok(Some(pages)) => pages,
            Ok(None) => {
                warn!("College roster not found; college names will be unavailable");
                return Self::default();
            }
            Err(e) => {
                warn!("Failed to read college roster: {:#}", e);
                return Self::default();
            }
        };

        let directory = Self::from_pages(&pages);
        if let Err(e) = directory.write_cache(cache_path).await {
            warn!(path = %cache_path.display(), "Failed to persist college directory: {:#}", e);
        }
        info!(colleges = directory.len(), "College directory built from roster");
        directory
    }

    /// 进程级共享名录，首次调用时构建
    pub async fn shared(settings: &CollegeDirectorySettings) -> Arc<CollegeDirectory> {
        SHARED
            .get_or_init(|| async {
                let source = TextRosterSource::new(&settings.roster_path);
                Arc::new(Self::load_or_build(Path::new(&settings.cache_path), &source).await)
            })
            .await
            .clone()
    }

    async fn load_cache(cache_path: &Path) -> Option<Self> {
        let raw = fs::read_to_string(cache_path).await.ok()?;
        match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
            Ok(colleges) => Some(Self { colleges }),
            Err(e) => {
                warn!(path = %cache_path.display(), "Ignoring corrupt college cache: {}", e);
                None
            }
        }
    }

    async fn write_cache(&self, cache_path: &Path) -> Result<()> {
        if let Some(parent) = cache_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(cache_path, serde_json::to_vec(&self.colleges)?).await?;
        Ok(())
    }
}
