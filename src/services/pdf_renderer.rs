//! PDF 渲染服务 - 业务能力层
//!
//! 只负责"润色文本 → PDF 文件"能力，不关心流程
//!
//! 排版规则：
//! - 标题行加粗：`Improved Script: <文件名>`
//! - `[...]` 形式的整行是表演提示：红色加粗单独成行，
//!   并把其后所有正文切换为等宽字体，直到文档结束
//! - 空行渲染为垂直间距
//! - 游标到达页底时另起新页

use crate::error::{FileError, RenderError, ScriptError};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};
use std::io::BufWriter;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

// ========== 页面常量（毫米） ==========

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_LEFT_MM: f32 = 20.0;
const TOP_Y_MM: f32 = 280.0;
const BOTTOM_Y_MM: f32 = 20.0;
/// 正文行距
const PROSE_LINE_MM: f32 = 7.0;
/// 表演提示行距
const STAGE_LINE_MM: f32 = 8.0;
/// 空行间距
const GAP_MM: f32 = 6.0;
/// 标题与正文的间距
const TITLE_GAP_MM: f32 = 15.0;
/// 普通正文每行最大字符数
const WRAP_BODY_CHARS: usize = 80;
/// 等宽正文每行最大字符数（等宽字体更宽）
const WRAP_FIXED_CHARS: usize = 66;

/// 渲染块：布局阶段的产物
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptBlock {
    /// 空行
    Gap,
    /// 表演提示行，如 `[Pause]`
    StageDirection(String),
    /// 正文段落；`fixed_width` 为当前的正文字体状态
    Prose { text: String, fixed_width: bool },
}

/// 布局阶段：把润色文本切分为带字体状态的渲染块
///
/// 按 `\n` 切分段落并逐段去除首尾空白。出现表演提示行后，
/// 其余正文全部进入等宽状态，状态不再翻回。
fn layout_script(body: &str) -> Vec<ScriptBlock> {
    let mut blocks = Vec::new();
    let mut fixed_width = false;

    for paragraph in body.split('\n') {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            blocks.push(ScriptBlock::Gap);
            continue;
        }
        if paragraph.starts_with('[') && paragraph.ends_with(']') {
            blocks.push(ScriptBlock::StageDirection(paragraph.to_string()));
            fixed_width = true;
        } else {
            blocks.push(ScriptBlock::Prose {
                text: paragraph.to_string(),
                fixed_width,
            });
        }
    }

    blocks
}

/// 按最大字符数对段落做词级折行；超过行宽的单词按行宽硬切
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current_chars > 0 && current_chars + 1 + word_chars > max_chars {
            lines.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if word_chars > max_chars {
            // 单词本身超过行宽时按行宽切块，尾段留在当前行继续拼接
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                if chunk.len() == max_chars {
                    lines.push(chunk.iter().collect());
                } else {
                    current = chunk.iter().collect();
                    current_chars = chunk.len();
                }
            }
            continue;
        }
        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// 表演提示的前景色：RGB (220, 50, 50)
fn stage_color() -> Color {
    Color::Rgb(Rgb::new(220.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0, None))
}

fn body_color() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// 游标越过页底时另起新页并重置游标
fn ensure_room(
    doc: &PdfDocumentReference,
    layer: &mut PdfLayerReference,
    y: &mut Mm,
) {
    if y.0 < BOTTOM_Y_MM {
        let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        *layer = doc.get_page(page).get_layer(new_layer);
        *y = Mm(TOP_Y_MM);
    }
}

/// 绘制阶段：把渲染块序列画成 PDF 字节
fn build_pdf(title: &str, body: &str) -> Result<Vec<u8>, RenderError> {
    let heading = format!("Improved Script: {}", title);
    let (doc, page1, layer1) =
        PdfDocument::new(&heading, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let helvetica = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::PdfBuildFailed {
            message: format!("字体加载失败: {}", e),
        })?;
    let helvetica_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::PdfBuildFailed {
            message: format!("字体加载失败: {}", e),
        })?;
    let courier = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| RenderError::PdfBuildFailed {
            message: format!("字体加载失败: {}", e),
        })?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut y = Mm(TOP_Y_MM);

    // 标题行
    layer.use_text(&heading, 16.0, Mm(MARGIN_LEFT_MM), y, &helvetica_bold);
    y -= Mm(TITLE_GAP_MM);

    for block in layout_script(body) {
        match block {
            ScriptBlock::Gap => {
                y -= Mm(GAP_MM);
            }
            ScriptBlock::StageDirection(text) => {
                ensure_room(&doc, &mut layer, &mut y);
                layer.set_fill_color(stage_color());
                layer.use_text(&text, 12.0, Mm(MARGIN_LEFT_MM), y, &helvetica_bold);
                layer.set_fill_color(body_color());
                y -= Mm(STAGE_LINE_MM);
            }
            ScriptBlock::Prose { text, fixed_width } => {
                let (font, wrap_chars): (&IndirectFontRef, usize) = if fixed_width {
                    (&courier, WRAP_FIXED_CHARS)
                } else {
                    (&helvetica, WRAP_BODY_CHARS)
                };
                for line in wrap_text(&text, wrap_chars) {
                    ensure_room(&doc, &mut layer, &mut y);
                    layer.use_text(&line, 12.0, Mm(MARGIN_LEFT_MM), y, font);
                    y -= Mm(PROSE_LINE_MM);
                }
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(|e| RenderError::PdfSaveFailed {
        message: format!("PDF 写出失败: {}", e),
    })?;
    buf.into_inner().map_err(|e| RenderError::PdfSaveFailed {
        message: format!("PDF 缓冲失败: {}", e),
    })
}

/// PDF 渲染服务
///
/// 职责：
/// - 将单个脚本的润色文本渲染为 PDF 并写入输出目录
/// - 先写临时文件再原子重命名，输出目录中不出现半成品
/// - 只处理单个脚本，不关心流程顺序
#[derive(Clone)]
pub struct PdfRenderer {
    output_dir: PathBuf,
}

impl PdfRenderer {
    /// 创建新的渲染服务
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 确保输出目录存在（递归创建）
    pub async fn ensure_output_dir(&self) -> Result<(), FileError> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| FileError::CreateDirFailed {
                path: self.output_dir.display().to_string(),
                source: e,
            })
    }

    /// 渲染并写出单个 PDF
    ///
    /// # 参数
    /// - `title`: 标题行展示的脚本名
    /// - `body`: 润色后的正文
    /// - `output_name`: 输出文件名（不含目录）
    ///
    /// # 返回
    /// 返回写出的 PDF 完整路径
    pub async fn render(
        &self,
        title: &str,
        body: &str,
        output_name: &str,
    ) -> Result<PathBuf, ScriptError> {
        let bytes = build_pdf(title, body)?;
        debug!("PDF 构建完成: {} ({} 字节)", output_name, bytes.len());

        self.ensure_output_dir().await?;

        let final_path = self.output_dir.join(output_name);
        let tmp_path = self.output_dir.join(format!("{}.tmp", output_name));

        fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| FileError::WriteFailed {
                path: tmp_path.display().to_string(),
                source: e,
            })?;
        fs::rename(&tmp_path, &final_path)
            .await
            .map_err(|e| FileError::WriteFailed {
                path: final_path.display().to_string(),
                source: e,
            })?;

        Ok(final_path)
    }
}
