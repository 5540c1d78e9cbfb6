use crate::archive::{archive_file_name, ArchiveBuilder};
use crate::config::Config;
use crate::error::{ConstraintViolation, Result};
use crate::sweep::{self, Dimensions, FrameSequence, PixelBuffer, SaturationLevel};
use crate::thread::ThreadPool;
use std::path::Path;
use std::sync::Arc;

/// 支持的上传类型，只接受带透明通道的无损格式
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MediaType {
    Png,
}

impl MediaType {
    /// 文件扩展名或者声明的 MIME 类型任意一个匹配即可
    pub fn detect(file_name: &str, mime_type: Option<&str>) -> Option<MediaType> {
        let by_extension = Path::new(file_name)
            .extension()
            .and_then(|extension| extension.to_str())
            .map_or(false, |extension| extension.eq_ignore_ascii_case("png"));
        let by_mime = mime_type.map_or(false, |mime| mime.eq_ignore_ascii_case("image/png"));

        if by_extension || by_mime {
            Some(MediaType::Png)
        } else {
            None
        }
    }
}

/// 消息渠道交给流程的一次上传
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub file_name: &'a str,
    pub mime_type: Option<&'a str>,
    pub bytes: &'a [u8],
}

/// 一次请求的全部产出，消息渠道按顺序转发
#[derive(Debug)]
pub struct Outcome {
    pub archive: Vec<u8>,
    pub archive_name: String,
    /// 随压缩包一起发送的说明
    pub caption: String,
    /// 发送压缩包之前依次发送的提示
    pub notices: Vec<String>,
    pub original_dimensions: Dimensions,
    pub dimensions: Dimensions,
    pub level: SaturationLevel,
    pub frame_count: usize,
}

/// 压缩包发送失败时的提示
pub const DELIVERY_FAILED_NOTICE: &str = "❌ Failed to send ZIP archive. Please try again.";

impl Outcome {
    /// 压缩包发送成功后的提示
    pub fn success_notice(&self) -> String {
        format!(
            "✅ Success! ZIP archive contains {} processed images.\n\
             📦 File size: {} bytes\n\
             🎛️ Saturation level: {}%\n\
             💡 Extract the ZIP to access all images and the README file.\n\n\
             💬 Send a new percentage (e.g., '75%') to change saturation level.",
            self.frame_count,
            self.archive.len(),
            self.level
        )
    }
}

/// 解码、缩放、生成帧、打包，全部在内存中同步完成
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    /// 线程数大于 1 时才创建
    pool: Option<ThreadPool>,
}

impl Pipeline {
    pub fn new(config: Config) -> Pipeline {
        let pool = if config.threads > 1 {
            Some(ThreadPool::new(config.threads))
        } else {
            None
        };
        Pipeline { config, pool }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 在解码之前检查类型和大小
    pub fn check_upload(&self, upload: &Upload<'_>) -> Result<MediaType> {
        let media_type = MediaType::detect(upload.file_name, upload.mime_type)
            .ok_or(ConstraintViolation::UnsupportedMediaType)?;

        let size = upload.bytes.len() as u64;
        if size > self.config.max_upload_bytes {
            return Err(ConstraintViolation::TooLarge {
                size,
                limit: self.config.max_upload_bytes,
            }
            .into());
        }
        Ok(media_type)
    }

    #[tracing::instrument(skip(self, upload), fields(file = upload.file_name, bytes = upload.bytes.len()))]
    pub fn process(&self, upload: &Upload<'_>, level: SaturationLevel) -> Result<Outcome> {
        self.check_upload(upload)?;

        let source = sweep::normalize(upload.bytes)?;
        let original_dimensions = source.dimensions();
        let constrained = sweep::constrain_dimensions(source, self.config.bounds)?;
        let dimensions = constrained.buffer.dimensions();

        let mut notices = Vec::with_capacity(2);
        if let Some(notice) = constrained.notice() {
            notices.push(notice);
        }
        notices.push(format!(
            "Processing {} image with {}% saturation.\n\
             Creating {} variations and compressing to ZIP...",
            dimensions,
            level,
            dimensions.width as usize + 1
        ));

        let frames = self.generate(constrained.buffer, level)?;
        let archive = ArchiveBuilder::new(self.config.compression).build(
            &frames,
            upload.file_name,
            dimensions,
        )?;

        let caption = format!(
            "📁 Column Saturation Archive\n\
             🖼️ {} PNG images\n\
             📏 {} pixels\n\
             🎛️ {}% saturation level\n\
             📄 Includes README.txt with descriptions",
            frames.len(),
            dimensions,
            level
        );

        tracing::info!(%dimensions, %level, frames = frames.len(), "request processed");
        Ok(Outcome {
            archive,
            archive_name: archive_file_name(upload.file_name, dimensions, level),
            caption,
            notices,
            original_dimensions,
            dimensions,
            level,
            frame_count: frames.len(),
        })
    }

    fn generate(&self, buffer: PixelBuffer, level: SaturationLevel) -> Result<FrameSequence> {
        match &self.pool {
            Some(pool) => sweep::generate_parallel(Arc::new(buffer), level, pool),
            None => Ok(sweep::generate(&buffer, level)),
        }
    }
}
