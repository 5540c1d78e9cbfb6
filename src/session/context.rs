use crate::sweep::SaturationLevel;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// 用户标识，对应消息渠道里的会话 id
pub type UserId = i64;

#[derive(Debug, Clone, Copy)]
struct Entry {
    level: SaturationLevel,
    touched: Instant,
}

/// 每个用户最近一次选择的饱和度。
///
/// 不同用户之间互不影响，可以在多个线程中同时读写。
/// 没有设置过期时间时条目一直保留到被覆盖为止。
#[derive(Debug, Default)]
pub struct SaturationStore {
    levels: DashMap<UserId, Entry>,
    ttl: Option<Duration>,
}

impl SaturationStore {
    pub fn new(ttl: Option<Duration>) -> SaturationStore {
        SaturationStore {
            levels: DashMap::new(),
            ttl,
        }
    }

    /// 没有记录或者已经过期时返回默认值 100
    pub fn level_for(&self, user: UserId) -> SaturationLevel {
        self.levels
            .get(&user)
            .filter(|entry| !self.is_expired(entry))
            .map(|entry| entry.level)
            .unwrap_or_default()
    }

    pub fn set(&self, user: UserId, level: SaturationLevel) {
        self.levels.insert(
            user,
            Entry {
                level,
                touched: Instant::now(),
            },
        );
    }

    pub fn reset(&self, user: UserId) {
        self.set(user, SaturationLevel::default());
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// 删除过期的条目，返回删除的数量
    pub fn purge_expired(&self) -> usize {
        let before = self.levels.len();
        self.levels.retain(|_, entry| !self.is_expired(entry));
        let removed = before.saturating_sub(self.levels.len());
        if removed > 0 {
            tracing::debug!(removed, "purged expired saturation levels");
        }
        removed
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        match self.ttl {
            Some(ttl) => entry.touched.elapsed() >= ttl,
            None => false,
        }
    }
}
