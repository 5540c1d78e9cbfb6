use super::{PixelBuffer, SaturationLevel};

/// 将最左侧 `num_columns` 列中不透明的像素按 `level` 百分比混合到黑色。
///
/// `num_columns` 超过宽度时按宽度处理，为 0 时结果与输入相同。
/// 透明度保持不变，完全透明的像素不处理。输入不会被修改，返回新的缓冲。
pub fn apply(buffer: &PixelBuffer, num_columns: u32, level: SaturationLevel) -> PixelBuffer {
    let columns = num_columns.min(buffer.width()) as usize;
    let mut result = buffer.clone();
    if columns == 0 {
        return result;
    }

    // 保留的亮度百分比
    let keep = 100 - level.percent() as u16;

    for row in result.rows_mut() {
        for pixel in row[..columns].iter_mut().filter(|pixel| pixel.a > 0) {
            pixel.r = darken(pixel.r, keep);
            pixel.g = darken(pixel.g, keep);
            pixel.b = darken(pixel.b, keep);
        }
    }

    result
}

#[inline]
fn darken(channel: u8, keep: u16) -> u8 {
    (channel as u16 * keep / 100) as u8
}
