use super::{saturate, Frame, FrameSequence, PixelBuffer, SaturationLevel};
use crate::error::{Error, Result};
use crate::thread::ThreadPool;
use std::sync::{mpsc, Arc};

/// 生成 `width + 1` 帧，第 `i` 帧处理了最左侧 `i` 列
pub fn generate(buffer: &PixelBuffer, level: SaturationLevel) -> FrameSequence {
    let frames = (0..=buffer.width())
        .map(|columns| Frame::new(columns, saturate::apply(buffer, columns, level)))
        .collect();
    FrameSequence { level, frames }
}

/// 与 [`generate`] 结果相同，每一帧作为一个任务交给线程池执行，
/// 再按序号收集。任何一帧缺失都视为失败，不返回残缺的序列。
pub fn generate_parallel(
    buffer: Arc<PixelBuffer>,
    level: SaturationLevel,
    pool: &ThreadPool,
) -> Result<FrameSequence> {
    let total = buffer.width() as usize + 1;
    let (frame_sender, frame_receiver) = mpsc::channel();

    for columns in 0..=buffer.width() {
        let buffer = Arc::clone(&buffer);
        let frame_sender = frame_sender.clone();
        pool.execute(move || {
            let frame = saturate::apply(&buffer, columns, level);
            // 接收端已经放弃时丢弃结果即可
            let _ = frame_sender.send(Frame::new(columns, frame));
        })?;
    }
    // 所有任务结束后通道关闭，接收循环才会退出
    drop(frame_sender);

    let mut slots: Vec<Option<PixelBuffer>> = vec![None; total];
    for frame in frame_receiver {
        if let Some(slot) = slots.get_mut(frame.index as usize) {
            *slot = Some(frame.buffer);
        }
    }

    let frames = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.map(|buffer| Frame::new(index as u32, buffer))
                .ok_or_else(|| Error::worker(format!("frame {} was never produced", index)))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(frames = frames.len(), workers = pool.size(), "collected frames");
    Ok(FrameSequence { level, frames })
}
