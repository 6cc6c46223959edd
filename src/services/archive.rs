//! 收据归档服务 - 业务能力层
//!
//! 只负责两件事：把收据目录打包成 ZIP，以及收尾时删除产物目录。
//! 归档先于清理执行，ZIP 文件本身不在清理范围内

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::Config;
use crate::error::{AppError, AppResult, ArtifactError};

/// 收据归档服务
pub struct ReceiptArchiver {
    receipts_dir: PathBuf,
    robots_dir: PathBuf,
    archive_path: PathBuf,
}

impl ReceiptArchiver {
    /// 创建新的归档服务
    pub fn new(config: &Config) -> Self {
        Self::with_paths(
            &config.receipts_dir,
            &config.robots_dir,
            &config.archive_file,
        )
    }

    /// 使用自定义路径创建
    pub fn with_paths(
        receipts_dir: impl Into<PathBuf>,
        robots_dir: impl Into<PathBuf>,
        archive_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            receipts_dir: receipts_dir.into(),
            robots_dir: robots_dir.into(),
            archive_path: archive_path.into(),
        }
    }

    /// 把收据目录下的所有 PDF 打包成一个 ZIP
    ///
    /// 归档内容就是归档时刻目录里实际存在的收据,
    /// 按文件名排序写入，保证产物稳定
    pub fn archive_receipts(&self) -> AppResult<()> {
        info!("📦 正在归档收据: {}", self.archive_path.display());

        let archive_error = |source: Box<dyn std::error::Error + Send + Sync>| {
            AppError::Artifact(ArtifactError::ArchiveFailed {
                path: self.archive_path.display().to_string(),
                source,
            })
        };

        let receipts = collect_pdf_files(&self.receipts_dir).map_err(|e| archive_error(Box::new(e)))?;

        if let Some(parent) = self.archive_path.parent() {
            fs::create_dir_all(parent).map_err(|e| archive_error(Box::new(e)))?;
        }

        let file = fs::File::create(&self.archive_path).map_err(|e| archive_error(Box::new(e)))?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for receipt in &receipts {
            let name = receipt
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            debug!("归档收据: {}", name);
            writer
                .start_file(name, options)
                .map_err(|e| archive_error(Box::new(e)))?;
            let mut source = fs::File::open(receipt).map_err(|e| archive_error(Box::new(e)))?;
            io::copy(&mut source, &mut writer).map_err(|e| archive_error(Box::new(e)))?;
        }

        writer.finish().map_err(|e| archive_error(Box::new(e)))?;
        info!("✅ 归档完成，共 {} 份收据", receipts.len());
        Ok(())
    }

    /// 删除收据目录和截图目录（不碰 ZIP）
    pub fn clean_up(&self) -> AppResult<()> {
        info!("🧹 正在清理产物目录...");
        remove_dir(&self.receipts_dir)?;
        remove_dir(&self.robots_dir)?;
        info!("✅ 清理完成");
        Ok(())
    }
}

/// 收集目录下的所有 PDF 文件，按文件名排序
fn collect_pdf_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if path.is_file() && is_pdf {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn remove_dir(dir: &Path) -> AppResult<()> {
    fs::remove_dir_all(dir).map_err(|e| {
        AppError::Artifact(ArtifactError::CleanupFailed {
            path: dir.display().to_string(),
            source: Box::new(e),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn setup_output(dir: &Path, receipts: &[&str]) -> (PathBuf, PathBuf, PathBuf) {
        let receipts_dir = dir.join("Receipts");
        let robots_dir = dir.join("Robots");
        let archive_path = dir.join("receipts.zip");
        fs::create_dir_all(&receipts_dir).unwrap();
        fs::create_dir_all(&robots_dir).unwrap();
        for name in receipts {
            fs::write(receipts_dir.join(name), b"%PDF-1.4 fake").unwrap();
        }
        (receipts_dir, robots_dir, archive_path)
    }

    fn archive_names(archive_path: &Path) -> Vec<String> {
        let file = fs::File::open(archive_path).expect("归档文件应该存在");
        let mut archive = zip::ZipArchive::new(file).expect("应该是合法的 ZIP");
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn archive_contains_exactly_the_receipts_present() {
        let tmp = tempfile::tempdir().unwrap();
        let (receipts_dir, robots_dir, archive_path) =
            setup_output(tmp.path(), &["Receipt_1001.pdf", "Receipt_1003.pdf"]);
        // 截图和非 PDF 文件不进归档
        fs::write(robots_dir.join("Robot_1001.png"), b"png").unwrap();
        fs::write(receipts_dir.join("notes.txt"), b"txt").unwrap();

        let archiver = ReceiptArchiver::with_paths(&receipts_dir, &robots_dir, &archive_path);
        archiver.archive_receipts().expect("归档应该成功");

        assert_eq!(
            archive_names(&archive_path),
            vec!["Receipt_1001.pdf", "Receipt_1003.pdf"]
        );
    }

    #[test]
    fn archived_receipt_keeps_its_content() {
        let tmp = tempfile::tempdir().unwrap();
        let (receipts_dir, robots_dir, archive_path) =
            setup_output(tmp.path(), &["Receipt_2001.pdf"]);

        let archiver = ReceiptArchiver::with_paths(&receipts_dir, &robots_dir, &archive_path);
        archiver.archive_receipts().expect("归档应该成功");

        let file = fs::File::open(&archive_path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name("Receipt_2001.pdf").expect("收据应该在归档里");
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"%PDF-1.4 fake");
    }

    #[test]
    fn rearchiving_reflects_only_the_current_directory_state() {
        let tmp = tempfile::tempdir().unwrap();
        let (receipts_dir, robots_dir, archive_path) =
            setup_output(tmp.path(), &["Receipt_1001.pdf", "Receipt_1002.pdf"]);

        let archiver = ReceiptArchiver::with_paths(&receipts_dir, &robots_dir, &archive_path);
        archiver.archive_receipts().expect("第一次归档应该成功");
        assert_eq!(
            archive_names(&archive_path),
            vec!["Receipt_1001.pdf", "Receipt_1002.pdf"]
        );

        // 重复运行：同一订单号覆盖旧收据，旧订单消失，新订单出现
        fs::write(receipts_dir.join("Receipt_1001.pdf"), b"%PDF-1.4 rerun").unwrap();
        fs::remove_file(receipts_dir.join("Receipt_1002.pdf")).unwrap();
        fs::write(receipts_dir.join("Receipt_1003.pdf"), b"%PDF-1.4 fake").unwrap();

        archiver.archive_receipts().expect("重新归档应该成功");
        assert_eq!(
            archive_names(&archive_path),
            vec!["Receipt_1001.pdf", "Receipt_1003.pdf"]
        );

        // 归档里的内容是覆盖后的版本，没有陈旧副本
        let file = fs::File::open(&archive_path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name("Receipt_1001.pdf").unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"%PDF-1.4 rerun");
    }

    #[test]
    fn clean_up_removes_directories_but_keeps_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let (receipts_dir, robots_dir, archive_path) =
            setup_output(tmp.path(), &["Receipt_1001.pdf"]);
        fs::write(robots_dir.join("Robot_1001.png"), b"png").unwrap();

        let archiver = ReceiptArchiver::with_paths(&receipts_dir, &robots_dir, &archive_path);
        archiver.archive_receipts().expect("归档应该成功");
        archiver.clean_up().expect("清理应该成功");

        assert!(!receipts_dir.exists());
        assert!(!robots_dir.exists());
        assert!(archive_path.exists());
    }

    #[test]
    fn archiving_a_missing_directory_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let archiver = ReceiptArchiver::with_paths(
            tmp.path().join("no-receipts"),
            tmp.path().join("no-robots"),
            tmp.path().join("receipts.zip"),
        );
        assert!(matches!(
            archiver.archive_receipts(),
            Err(AppError::Artifact(_))
        ));
    }
}
