use super::{Dimensions, PixelBuffer};
use crate::error::Result;
use image::imageops::{self, FilterType};

/// 默认的最大尺寸
pub const DEFAULT_BOUNDS: Dimensions = Dimensions {
    width: 64,
    height: 64,
};

/// 解码任意支持的图像字节并转换为 RGBA8
pub fn normalize(bytes: &[u8]) -> Result<PixelBuffer> {
    let decoded = image::load_from_memory(bytes)?;
    PixelBuffer::from_rgba_image(decoded.to_rgba8())
}

/// 尺寸限制的结果
#[derive(Clone, Debug)]
pub struct Constrained {
    pub buffer: PixelBuffer,
    /// 发生缩放时记录原始尺寸
    pub resized_from: Option<Dimensions>,
}

impl Constrained {
    /// 发生缩放时给用户的提示
    pub fn notice(&self) -> Option<String> {
        self.resized_from.map(|original| {
            format!(
                "🗜️ Image compressed from {} to {}",
                original,
                self.buffer.dimensions()
            )
        })
    }
}

/// 等比缩放到 `bounds` 以内，已经在范围内的图像原样返回。
///
/// 缩放比例取 `min(max_w / w, max_h / h)`，新尺寸向下取整且至少为 1，
/// 使用 Lanczos3 重采样。
pub fn constrain_dimensions(buffer: PixelBuffer, bounds: Dimensions) -> Result<Constrained> {
    let original = buffer.dimensions();
    if original.fits_within(bounds) {
        return Ok(Constrained {
            buffer,
            resized_from: None,
        });
    }

    let target = scaled_dimensions(original, bounds);
    let resized = imageops::resize(
        &buffer.to_rgba_image()?,
        target.width,
        target.height,
        FilterType::Lanczos3,
    );
    let buffer = PixelBuffer::from_rgba_image(resized)?;

    tracing::info!(%original, resized = %target, "compressed image");
    Ok(Constrained {
        buffer,
        resized_from: Some(original),
    })
}

/// 用整数运算计算 `floor(w * scale), floor(h * scale)`，避免浮点误差让受限的一边少一个像素
fn scaled_dimensions(original: Dimensions, bounds: Dimensions) -> Dimensions {
    let (w, h) = (original.width as u64, original.height as u64);
    let (max_w, max_h) = (bounds.width.max(1) as u64, bounds.height.max(1) as u64);

    let (width, height) = if max_w * h <= max_h * w {
        // 宽度是限制边
        (max_w, h * max_w / w)
    } else {
        (w * max_h / h, max_h)
    };

    Dimensions::new(width.max(1) as u32, height.max(1) as u32)
}
