use crate::sweep::{Dimensions, SaturationLevel};
use chrono::NaiveDateTime;

/// 压缩包中说明文件的名称
pub const MANIFEST_NAME: &str = "README.txt";

/// 说明文件需要的全部信息
#[derive(Debug)]
pub struct Manifest<'a> {
    pub generated_at: NaiveDateTime,
    pub original_name: &'a str,
    pub dimensions: Dimensions,
    pub level: SaturationLevel,
    pub total_images: usize,
}

impl Manifest<'_> {
    pub fn render(&self) -> String {
        let level = self.level;
        format!(
            "Column Saturation Images
Generated: {generated}
Original file: {name}
Processed size: {dimensions}
Saturation level: {level}%
Total images: {total}

File descriptions:
- columns_00_of_XX_{level}pct.png: Original image (0 columns affected)
- columns_01_of_XX_{level}pct.png: Column 1 with {level}% saturation
- columns_02_of_XX_{level}pct.png: Columns 1-2 with {level}% saturation
- ...
- columns_XX_of_XX_{level}pct.png: All columns with {level}% saturation

Each image shows {level}% saturation applied to columns from left to right.
Only non-transparent pixels are affected.
",
            generated = self.generated_at.format("%Y-%m-%d %H:%M:%S"),
            name = self.original_name,
            dimensions = self.dimensions,
            total = self.total_images,
        )
    }
}
