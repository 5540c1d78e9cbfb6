use super::manifest::{Manifest, MANIFEST_NAME};
use crate::error::{Error, Result};
use crate::sweep::{Dimensions, FrameSequence, PixelBuffer, SaturationLevel};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use png::Compression;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// zip 条目的 deflate 压缩等级，兼顾大小和速度
pub const ZIP_COMPRESSION_LEVEL: i64 = 6;

/// 把帧序列和说明文件打包为 zip
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    /// png编码压缩等级
    compression: Compression,
    zip_level: i64,
    /// 写入说明文件和条目修改时间的生成时间
    generated_at: NaiveDateTime,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        ArchiveBuilder::new(Compression::Default)
    }
}

impl ArchiveBuilder {
    pub fn new(compression: Compression) -> ArchiveBuilder {
        ArchiveBuilder {
            compression,
            zip_level: ZIP_COMPRESSION_LEVEL,
            generated_at: Local::now().naive_local(),
        }
    }

    /// 固定生成时间，相同输入得到逐字节相同的压缩包
    pub fn with_timestamp(mut self, generated_at: NaiveDateTime) -> ArchiveBuilder {
        self.generated_at = generated_at;
        self
    }

    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    /// 依次写入每一帧的 png，最后写入说明文件，全部在内存中完成
    pub fn build(
        &self,
        frames: &FrameSequence,
        original_name: &str,
        final_dimensions: Dimensions,
    ) -> Result<Vec<u8>> {
        if frames.is_empty() {
            return Err(Error::encoding("cannot archive an empty frame sequence"));
        }

        let level = frames.level();
        let last_index = frames.last_index();
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.zip_level))
            .last_modified_time(self.zip_timestamp());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for frame in frames {
            let bytes = encode_png(&frame.buffer, self.compression)?;
            zip.start_file(entry_name(frame.index as usize, last_index, level), options)?;
            zip.write_all(&bytes)
                .map_err(|err| Error::encoding(err.to_string()))?;
        }

        let manifest = Manifest {
            generated_at: self.generated_at,
            original_name,
            dimensions: final_dimensions,
            level,
            total_images: frames.len(),
        };
        zip.start_file(MANIFEST_NAME, options)?;
        zip.write_all(manifest.render().as_bytes())
            .map_err(|err| Error::encoding(err.to_string()))?;

        let archive = zip.finish()?.into_inner();
        tracing::info!(
            entries = frames.len() + 1,
            bytes = archive.len(),
            "built archive"
        );
        Ok(archive)
    }

    /// zip 只能表示 1980 年之后的时间，超出范围时退回默认值
    fn zip_timestamp(&self) -> zip::DateTime {
        let ts = self.generated_at;
        u16::try_from(ts.year())
            .ok()
            .and_then(|year| {
                zip::DateTime::from_date_and_time(
                    year,
                    ts.month() as u8,
                    ts.day() as u8,
                    ts.hour() as u8,
                    ts.minute() as u8,
                    ts.second() as u8,
                )
                .ok()
            })
            .unwrap_or_default()
    }
}

/// 8 位 RGBA png
pub fn encode_png(buffer: &PixelBuffer, compression: Compression) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, buffer.width(), buffer.height());
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(compression);
        encoder.set_color(png::ColorType::Rgba);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(buffer.as_bytes())?;
        writer.finish()?;
    }
    Ok(bytes)
}

/// `columns_{i}_of_{n}_{level}pct.png`，序号补零到相同位数，至少两位，
/// 这样按文件名排序和按帧序号排序一致
pub fn entry_name(index: usize, last_index: usize, level: SaturationLevel) -> String {
    let width = last_index.to_string().len().max(2);
    format!(
        "columns_{:0width$}_of_{:0width$}_{}pct.png",
        index,
        last_index,
        level,
        width = width
    )
}

/// 发送给用户的压缩包文件名，去掉原文件名最后一个扩展名
pub fn archive_file_name(
    original_name: &str,
    dimensions: Dimensions,
    level: SaturationLevel,
) -> String {
    let stem = match original_name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => original_name,
    };
    format!("{}_column_saturation_{}pct_{}.zip", stem, level, dimensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::{generate, PixelBuffer};
    use chrono::NaiveDate;
    use rgb::RGBA8;
    use std::io::Read;
    use zip::ZipArchive;

    fn fixed_builder() -> ArchiveBuilder {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|date| date.and_hms_opt(3, 4, 6))
            .unwrap();
        ArchiveBuilder::default().with_timestamp(ts)
    }

    fn sample(width: u32) -> FrameSequence {
        let source = PixelBuffer::filled(width, 2, RGBA8::new(10, 200, 30, 255));
        generate(&source, SaturationLevel::new(50))
    }

    #[test]
    fn entry_names_are_zero_padded() {
        let level = SaturationLevel::new(75);
        assert_eq!(entry_name(3, 4, level), "columns_03_of_04_75pct.png");
        assert_eq!(entry_name(7, 120, level), "columns_007_of_120_75pct.png");
        assert_eq!(entry_name(120, 120, level), "columns_120_of_120_75pct.png");
    }

    #[test]
    fn entry_names_sort_like_indices() {
        let level = SaturationLevel::default();
        let mut names: Vec<_> = (0..=150).map(|i| entry_name(i, 150, level)).collect();
        let expected = names.clone();
        names.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn archive_name_drops_extension() {
        let dims = Dimensions::new(64, 32);
        let level = SaturationLevel::new(20);
        assert_eq!(
            archive_file_name("cat.final.png", dims, level),
            "cat.final_column_saturation_20pct_64x32.zip"
        );
        assert_eq!(
            archive_file_name("noext", dims, level),
            "noext_column_saturation_20pct_64x32.zip"
        );
    }

    #[test]
    fn five_frames_make_six_entries() {
        let frames = sample(4);
        assert_eq!(frames.len(), 5);
        let bytes = fixed_builder()
            .build(&frames, "tile.png", Dimensions::new(4, 2))
            .unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 6);
        for i in 0..5 {
            let entry = archive.by_index(i).unwrap();
            assert_eq!(entry.name(), format!("columns_0{}_of_04_50pct.png", i));
            assert_eq!(entry.compression(), CompressionMethod::Deflated);
        }
        let mut manifest = String::new();
        archive
            .by_index(5)
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        assert!(manifest.contains("Original file: tile.png"));
        assert!(manifest.contains("Total images: 5"));
        assert!(manifest.contains("Generated: 2024-01-02 03:04:06"));
    }

    #[test]
    fn entries_decode_back_to_frames() {
        let frames = sample(3);
        let bytes = fixed_builder()
            .build(&frames, "tile.png", Dimensions::new(3, 2))
            .unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        for frame in &frames {
            let mut png = Vec::new();
            archive
                .by_index(frame.index as usize)
                .unwrap()
                .read_to_end(&mut png)
                .unwrap();
            let decoded = crate::sweep::normalize(&png).unwrap();
            assert_eq!(decoded, frame.buffer);
        }
    }

    #[test]
    fn same_input_same_bytes() {
        let frames = sample(5);
        let builder = fixed_builder();
        let dims = Dimensions::new(5, 2);
        let first = builder.build(&frames, "a.png", dims).unwrap();
        let second = builder.build(&frames, "a.png", dims).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let empty = FrameSequence::from_frames(SaturationLevel::default(), vec![]).unwrap();
        assert!(matches!(
            fixed_builder().build(&empty, "a.png", Dimensions::new(1, 1)),
            Err(Error::Encoding(_))
        ));
    }
}
