use crate::error::{Error, Result};
use rgb::{ComponentBytes, FromSlice, RGBA8};
use std::fmt;

/// 饱和度默认值，完全变黑
pub const DEFAULT_LEVEL: u8 = 100;

/// 向黑色混合的百分比，`1-100`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SaturationLevel(u8);

impl SaturationLevel {
    /// 超出范围的值会被截断到 `1-100`
    pub fn new(value: u64) -> SaturationLevel {
        SaturationLevel(value.clamp(1, DEFAULT_LEVEL as u64) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn is_default(self) -> bool {
        self.0 == DEFAULT_LEVEL
    }
}

impl Default for SaturationLevel {
    fn default() -> Self {
        SaturationLevel(DEFAULT_LEVEL)
    }
}

impl fmt::Display for SaturationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 图像尺寸
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    pub fn fits_within(&self, bounds: Dimensions) -> bool {
        self.width <= bounds.width && self.height <= bounds.height
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// RGBA8 像素缓冲，按行存储
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<RGBA8>,
}

impl PixelBuffer {
    /// 宽高必须大于 0，像素数量必须等于 `width * height`
    pub fn new(width: u32, height: u32, pixels: Vec<RGBA8>) -> Result<PixelBuffer> {
        if width == 0 || height == 0 {
            return Err(Error::decode(format!("empty image {}x{}", width, height)));
        }
        if pixels.len() != width as usize * height as usize {
            return Err(Error::decode(format!(
                "expected {} pixels for {}x{}, got {}",
                width as usize * height as usize,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }

    /// 用同一个像素填满整张图
    ///
    /// # Panics
    ///
    /// 宽或高为 0 时会 panic
    pub fn filled(width: u32, height: u32, pixel: RGBA8) -> PixelBuffer {
        assert!(width > 0 && height > 0);
        PixelBuffer {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    pub fn from_rgba_image(image: image::RgbaImage) -> Result<PixelBuffer> {
        let (width, height) = image.dimensions();
        let raw = image.into_raw();
        PixelBuffer::new(width, height, raw.as_rgba().to_vec())
    }

    pub fn to_rgba_image(&self) -> Result<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
            .ok_or_else(|| Error::decode("pixel buffer does not match its dimensions"))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn pixels(&self) -> &[RGBA8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// 按 RGBA 顺序排列的原始字节
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    pub(crate) fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, RGBA8> {
        self.pixels.chunks_exact_mut(self.width as usize)
    }
}

/// 序列中的一帧，`index` 表示最左侧已处理的列数
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    pub index: u32,
    pub buffer: PixelBuffer,
}

impl Frame {
    pub fn new(index: u32, buffer: PixelBuffer) -> Frame {
        Frame { index, buffer }
    }
}

/// 按列数递增排列的完整帧序列，长度为 `width + 1`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrameSequence {
    pub(super) level: SaturationLevel,
    pub(super) frames: Vec<Frame>,
}

impl FrameSequence {
    /// 帧序号必须从 0 开始连续递增
    pub fn from_frames(level: SaturationLevel, frames: Vec<Frame>) -> Result<FrameSequence> {
        if let Some((position, frame)) = frames
            .iter()
            .enumerate()
            .find(|(position, frame)| frame.index as usize != *position)
        {
            return Err(Error::worker(format!(
                "frame {} found at position {}",
                frame.index, position
            )));
        }
        Ok(FrameSequence { level, frames })
    }

    pub fn level(&self) -> SaturationLevel {
        self.level
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 最后一帧的序号，即源图宽度
    pub fn last_index(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
