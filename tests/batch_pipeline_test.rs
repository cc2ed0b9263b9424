use async_trait::async_trait;
use script_improver::clients::Rewriter;
use script_improver::config::Config;
use script_improver::error::{AppError, RemoteError};
use script_improver::models::{list_script_files, load_all_scripts};
use script_improver::orchestrator::App;
use script_improver::utils::logging;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// 原样返回输入的桩改写器
struct EchoRewriter;

#[async_trait]
impl Rewriter for EchoRewriter {
    async fn rewrite(&self, text: &str) -> Result<String, RemoteError> {
        Ok(text.to_string())
    }
}

/// 对包含指定片段的正文返回失败的桩改写器
struct SentinelRewriter {
    sentinel: &'static str,
}

#[async_trait]
impl Rewriter for SentinelRewriter {
    async fn rewrite(&self, text: &str) -> Result<String, RemoteError> {
        if text.contains(self.sentinel) {
            Err(RemoteError::EmptyResponse)
        } else {
            Ok(text.to_string())
        }
    }
}

fn test_config(scripts_dir: &Path, output_dir: &Path) -> Config {
    Config {
        max_concurrent_scripts: 4,
        scripts_dir: scripts_dir.display().to_string(),
        output_dir: output_dir.display().to_string(),
        api_key: "test-key".to_string(),
        ..Config::default()
    }
}

async fn write_script(dir: &Path, name: &str, content: &str) {
    tokio::fs::write(dir.join(name), content)
        .await
        .expect("写入测试脚本失败");
}

#[tokio::test]
async fn test_list_script_files_skips_directories() {
    let dir = TempDir::new().expect("创建临时目录失败");
    write_script(dir.path(), "a.txt", "A").await;
    write_script(dir.path(), "b.txt", "B").await;
    tokio::fs::create_dir(dir.path().join("nested"))
        .await
        .expect("创建子目录失败");

    let names = list_script_files(dir.path()).await.expect("扫描目录失败");

    assert_eq!(names, vec!["a.txt", "b.txt"]);
}

#[tokio::test]
async fn test_load_applies_encoding_repair() {
    let dir = TempDir::new().expect("创建临时目录失败");
    write_script(dir.path(), "garbled.txt", "Heâ€™s here â€“ now").await;

    let names = vec!["garbled.txt".to_string()];
    let scenarios = load_all_scripts(dir.path(), &names)
        .await
        .expect("读取脚本失败");

    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0].content, "He’s here – now");
}

/// 读取阶段整体成败：一个文件读取失败时，不返回任何脚本
#[tokio::test]
async fn test_read_phase_is_all_or_nothing() {
    let dir = TempDir::new().expect("创建临时目录失败");
    write_script(dir.path(), "good1.txt", "fine").await;
    write_script(dir.path(), "good2.txt", "also fine").await;

    let names = vec![
        "good1.txt".to_string(),
        "missing.txt".to_string(),
        "good2.txt".to_string(),
    ];
    let err = load_all_scripts(dir.path(), &names)
        .await
        .expect_err("缺失文件应当使整批读取失败");

    assert_eq!(err.failures.len(), 1);
    assert!(err.to_string().contains("missing.txt"));
}

/// 与读取阶段相反，润色阶段按脚本隔离：一个脚本失败，
/// 其余脚本照常生成 PDF，失败明细进入批次错误
#[tokio::test]
async fn test_batch_isolates_rewrite_failures() {
    // 初始化日志
    logging::init();

    let scripts = TempDir::new().expect("创建脚本目录失败");
    let output = TempDir::new().expect("创建输出目录失败");
    write_script(scripts.path(), "a.txt", "first script").await;
    write_script(scripts.path(), "b.txt", "BOOM inside").await;
    write_script(scripts.path(), "c.txt", "third script").await;

    let app = App::with_rewriter(
        test_config(scripts.path(), output.path()),
        Arc::new(SentinelRewriter { sentinel: "BOOM" }),
    );

    let err = app.run().await.expect_err("包含失败脚本的批次应当报错");
    match err {
        AppError::Batch(batch) => {
            assert_eq!(batch.failures.len(), 1);
            assert_eq!(batch.failures[0].0, "b.txt");
        }
        other => panic!("意外的错误类型: {other:?}"),
    }

    // 其余脚本的 PDF 已经落盘
    let a_pdf = tokio::fs::read(output.path().join("a.pdf"))
        .await
        .expect("a.pdf 应当存在");
    assert!(a_pdf.starts_with(b"%PDF"));
    let c_pdf = tokio::fs::read(output.path().join("c.pdf"))
        .await
        .expect("c.pdf 应当存在");
    assert!(c_pdf.starts_with(b"%PDF"));
    assert!(!output.path().join("b.pdf").exists());
}

/// 失败脚本排在批次首、中、尾任一位置时隔离行为一致：
/// 批次错误只点名失败者，其余脚本照常生成 PDF
#[tokio::test]
async fn test_batch_isolates_failures_at_every_position() {
    // 初始化日志
    logging::init();

    for failing in ["a.txt", "b.txt", "c.txt"] {
        let scripts = TempDir::new().expect("创建脚本目录失败");
        let output = TempDir::new().expect("创建输出目录失败");
        for name in ["a.txt", "b.txt", "c.txt"] {
            let content = if name == failing {
                "BOOM inside"
            } else {
                "plain script"
            };
            write_script(scripts.path(), name, content).await;
        }

        let app = App::with_rewriter(
            test_config(scripts.path(), output.path()),
            Arc::new(SentinelRewriter { sentinel: "BOOM" }),
        );

        let err = app.run().await.expect_err("包含失败脚本的批次应当报错");
        match err {
            AppError::Batch(batch) => {
                assert_eq!(batch.failures.len(), 1, "失败位置: {failing}");
                assert_eq!(batch.failures[0].0, failing, "失败位置: {failing}");
            }
            other => panic!("意外的错误类型: {other:?}"),
        }

        for name in ["a.txt", "b.txt", "c.txt"] {
            let pdf = output.path().join(Path::new(name).with_extension("pdf"));
            if name == failing {
                assert!(!pdf.exists(), "{failing} 不应产出 PDF");
            } else {
                let bytes = tokio::fs::read(&pdf)
                    .await
                    .expect("未失败脚本的 PDF 应当存在");
                assert!(bytes.starts_with(b"%PDF"), "失败位置: {failing}");
            }
        }
    }
}

#[tokio::test]
async fn test_full_batch_renders_every_script() {
    // 初始化日志
    logging::init();

    let scripts = TempDir::new().expect("创建脚本目录失败");
    let output = TempDir::new().expect("创建输出目录失败");
    write_script(scripts.path(), "one.txt", "Hello\nWorld").await;
    write_script(scripts.path(), "two.txt", "[Pause]\nAfter the pause").await;

    let app = App::with_rewriter(
        test_config(scripts.path(), output.path()),
        Arc::new(EchoRewriter),
    );

    app.run().await.expect("全部成功的批次不应报错");

    for name in ["one.pdf", "two.pdf"] {
        let bytes = tokio::fs::read(output.path().join(name))
            .await
            .expect("PDF 应当存在");
        assert!(bytes.starts_with(b"%PDF"));
    }
}

/// 空目录不算失败：直接成功结束，也不创建输出目录
#[tokio::test]
async fn test_empty_corpus_is_success() {
    let scripts = TempDir::new().expect("创建脚本目录失败");
    let output_parent = TempDir::new().expect("创建输出父目录失败");
    let output = output_parent.path().join("improved");

    let app = App::with_rewriter(
        test_config(scripts.path(), &output),
        Arc::new(EchoRewriter),
    );

    app.run().await.expect("空目录应当直接成功");

    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_scripts_dir_is_file_error() {
    let parent = TempDir::new().expect("创建临时目录失败");
    let missing = parent.path().join("nonexistent");
    let output = TempDir::new().expect("创建输出目录失败");

    let app = App::with_rewriter(
        test_config(&missing, output.path()),
        Arc::new(EchoRewriter),
    );

    let err = app.run().await.expect_err("脚本目录不存在应当报错");
    assert!(matches!(err, AppError::File(_)));
}
