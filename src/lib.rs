//! 将 PNG 图像按列逐步加黑，生成完整的帧序列并打包为 zip。
//!
//! 流程：[`sweep::normalize`] 解码并 [`sweep::constrain_dimensions`] 限制尺寸，
//! [`sweep::generate`] 逐列生成帧，[`archive::ArchiveBuilder`] 打包。
//! [`session::Session`] 把这些步骤和每个用户的饱和度设置组合在一起。

pub mod archive;
pub mod command;
pub mod config;
pub mod error;
pub mod percent;
pub mod session;
pub mod sweep;
pub mod thread;

pub use config::Config;
pub use error::{ConstraintViolation, Error, Result};
