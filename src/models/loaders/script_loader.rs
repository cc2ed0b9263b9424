use crate::error::{BatchReadError, FileError};
use crate::models::scenario::Scenario;
use crate::utils::encoding::fix_garbled_symbols;
use futures::future::join_all;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// 列出目录下所有脚本文件名
///
/// 只返回普通文件，子目录被跳过，不做递归；返回结果按文件名排序。
///
/// # 参数
/// - `dir`: 脚本目录
///
/// # 返回
/// 返回文件名列表（不含目录前缀）
pub async fn list_script_files(dir: &Path) -> Result<Vec<String>, FileError> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| FileError::ListDirFailed {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| FileError::ListDirFailed {
            path: dir.display().to_string(),
            source: e,
        })?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| FileError::ListDirFailed {
                path: entry.path().display().to_string(),
                source: e,
            })?;
        if file_type.is_dir() {
            continue;
        }

        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    names.sort();
    Ok(names)
}

/// 并发读取所有脚本并完成乱码修复
///
/// 读取阶段为整体成败：等待全部读取结束后，只要存在失败，
/// 就返回包含所有失败明细的 [`BatchReadError`]，不返回任何脚本。
///
/// # 参数
/// - `dir`: 脚本目录
/// - `names`: 待读取的文件名列表
///
/// # 返回
/// 全部成功时返回与 `names` 等长的脚本列表
pub async fn load_all_scripts(dir: &Path, names: &[String]) -> Result<Vec<Scenario>, BatchReadError> {
    let reads = names.iter().map(|name| {
        let name = name.clone();
        let path = dir.join(&name);
        async move {
            debug!("正在读取: {}", name);
            match fs::read_to_string(&path).await {
                Ok(raw) => Ok(Scenario::new(name, fix_garbled_symbols(&raw))),
                Err(e) => Err(FileError::ReadFailed {
                    path: path.display().to_string(),
                    source: e,
                }),
            }
        }
    });

    let mut scenarios = Vec::new();
    let mut failures = Vec::new();
    for result in join_all(reads).await {
        match result {
            Ok(scenario) => scenarios.push(scenario),
            Err(e) => {
                warn!("⚠️ {}", e);
                failures.push(e);
            }
        }
    }

    if !failures.is_empty() {
        return Err(BatchReadError { failures });
    }
    Ok(scenarios)
}
