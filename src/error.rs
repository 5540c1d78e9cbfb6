use thiserror::Error;

/// 整个流程统一使用的结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// 请求级别的错误，全部不可重试，由用户重新发送作为重试手段
#[derive(Error, Debug)]
pub enum Error {
    /// 输入的字节无法解码为图像
    #[error("Failed to process image. Please make sure it's a valid PNG file. ({0})")]
    Decode(String),

    /// 在进入处理流程之前就被拒绝的上传
    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    /// 编码帧或写入压缩包条目失败，不返回残缺的压缩包
    #[error("failed to encode archive: {0}")]
    Encoding(String),

    /// 工作线程异常退出或通道被关闭
    #[error("worker pool failure: {0}")]
    Worker(String),
}

/// 上传约束
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConstraintViolation {
    /// 不支持的媒体类型
    #[error("Please send a PNG image as a document (not as a photo)")]
    UnsupportedMediaType,
    /// 文件超过大小上限
    #[error("File too large. Maximum size is {}MB.", .limit / (1024 * 1024))]
    TooLarge { size: u64, limit: u64 },
}

impl Error {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn worker(msg: impl Into<String>) -> Self {
        Self::Worker(msg.into())
    }

    /// 转发给用户的提示文字
    pub fn user_message(&self) -> String {
        format!("Error: {self}")
    }
}

impl From<png::EncodingError> for Error {
    #[cold]
    fn from(err: png::EncodingError) -> Self {
        Self::Encoding(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    #[cold]
    fn from(err: zip::result::ZipError) -> Self {
        Self::Encoding(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    #[cold]
    fn from(err: image::ImageError) -> Self {
        Self::Decode(err.to_string())
    }
}
