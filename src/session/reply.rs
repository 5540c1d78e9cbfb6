use super::context::{SaturationStore, UserId};
use crate::percent;

pub const HELP_TEXT: &str = "Welcome to the Enhanced Column Saturation Bot!

📋 Instructions:
1. Send me a PNG image as a DOCUMENT (not as photo!)
2. Images larger than 64x64 will be automatically compressed
3. I'll return a ZIP archive with all processed images

🎛️ Saturation Control:
• Default: 100% saturation (fully black)
• Custom: Send message with percentage before image
• Examples: '50%', '75 percent', 'saturation 30'
• Valid range: 1% to 100%

🔄 How it works:
Each image shows specified % saturation applied to columns:
• Image 1 = 0 columns affected (original)
• Image 2 = 1 column with X% saturation
• Image 3 = 2 columns with X% saturation
• ... and so on until all columns are saturated
• Only non-transparent pixels are affected

🗜️ Features:
• Automatic image compression for large images
• Aspect ratio is maintained
• High-quality resampling is used
• All images delivered in a single ZIP file
• Includes README.txt with file descriptions

⚠️ IMPORTANT: Send PNG as DOCUMENT, not as photo!
Photos are converted to JPEG and lose transparency.";

/// 用户以照片形式发送时的提示，照片会丢失透明通道
pub const PHOTO_NOTICE: &str = "⚠️ Photos are automatically converted to JPEG by Telegram, which removes transparency.

Please send your PNG image as a DOCUMENT instead:
1. Click the 📎 attachment button
2. Select 'Document' (not 'Photo')
3. Choose your PNG file

This preserves the PNG format and transparency information.";

/// 既不是文本也不是文件的消息
pub const UNSUPPORTED_NOTICE: &str = "Please send a PNG image as a DOCUMENT or use /help for instructions.

⚠️ Don't send as photo - use the document attachment option to preserve PNG format!";

/// 处理文本消息，可能会修改用户的饱和度设置
///
/// 文本里明确写了百分比时保存并确认，包括 "100%"；
/// 没有百分比时重置为 100 并提示当前设置。
pub fn handle_text(store: &SaturationStore, user: UserId, text: &str) -> String {
    let command = text.trim().to_lowercase();
    if command == "/start" || command == "/help" {
        return HELP_TEXT.to_string();
    }

    match percent::parse_explicit(text) {
        Some(level) => {
            store.set(user, level);
            tracing::info!(user, %level, "saturation level set");
            format!(
                "✅ Saturation level set to {}%\nNow send me a PNG image as a document to process!",
                level
            )
        }
        None => {
            store.reset(user);
            format!(
                "📝 Current saturation: {}%\n\
                 Send a percentage (e.g., '50%') to change, or send a PNG image to process.\n\
                 Use /help for detailed instructions.",
                store.level_for(user)
            )
        }
    }
}
