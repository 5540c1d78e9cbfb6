mod context;
mod pipeline;
mod reply;

pub use context::{SaturationStore, UserId};
pub use pipeline::{MediaType, Outcome, Pipeline, Upload, DELIVERY_FAILED_NOTICE};
pub use reply::{handle_text, HELP_TEXT, PHOTO_NOTICE, UNSUPPORTED_NOTICE};

use crate::config::Config;
use crate::error::Result;

/// 消息渠道面对的入口：保存每个用户的饱和度，并用它处理上传的图像
#[derive(Debug)]
pub struct Session {
    store: SaturationStore,
    pipeline: Pipeline,
}

impl Session {
    pub fn new(config: Config) -> Session {
        Session {
            store: SaturationStore::new(config.level_ttl),
            pipeline: Pipeline::new(config),
        }
    }

    pub fn store(&self) -> &SaturationStore {
        &self.store
    }

    pub fn handle_text(&self, user: UserId, text: &str) -> String {
        handle_text(&self.store, user, text)
    }

    /// 使用用户当前的饱和度处理上传
    pub fn handle_document(&self, user: UserId, upload: &Upload<'_>) -> Result<Outcome> {
        self.store.purge_expired();
        let level = self.store.level_for(user);
        self.pipeline.process(upload, level)
    }
}
