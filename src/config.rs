use crate::sweep::{Dimensions, DEFAULT_BOUNDS};
use png::Compression;
use std::time::Duration;

/// 上传文件大小上限，5MB
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// 处理请求的配置，命令行参数最终汇总到这里
#[derive(Debug, Clone)]
pub struct Config {
    /// 超过这个尺寸的图像会被等比缩小
    pub bounds: Dimensions,
    /// 超过这个大小的上传直接拒绝
    pub max_upload_bytes: u64,
    /// png编码压缩等级
    pub compression: Compression,
    /// 生成帧的线程数量，`1` 表示在当前线程顺序生成
    pub threads: usize,
    /// 用户饱和度设置的过期时间，`None` 表示永不过期
    pub level_ttl: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bounds: DEFAULT_BOUNDS,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            compression: Compression::Default,
            threads: 1,
            level_ttl: None,
        }
    }
}
