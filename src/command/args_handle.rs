use crate::config::Config;
use crate::session::{Session, Upload, UserId, DELIVERY_FAILED_NOTICE};
use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread::available_parallelism;
use std::time::Instant;
use tracing::Level;

/// 用来转换文件大小
const BYTES_INTEGER: f64 = 1024.00;
/// 转换毫秒为秒
const SECOND_CONSTANT: f64 = 1000.00;
/// 命令行只有一个本地用户
const LOCAL_USER: UserId = 0;

#[derive(clap::ValueEnum, Clone, Debug)]
enum Compression {
    Default,
    Fast,
    Best,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short = 'i', long, help = "要处理的 png 图像路径")]
    input: PathBuf,

    #[arg(
        short = 'o',
        long,
        help = "生成的 zip 文件路径，默认放在输入图像所在的文件夹"
    )]
    output: Option<PathBuf>,

    #[arg(
        short = 's',
        long,
        help = "饱和度，例如 '50%'、'75 percent'、'saturation 30'，范围 1-100，默认 100"
    )]
    saturation: Option<String>,

    #[arg(long, help = "超过该宽度的图像会被等比缩小，默认 64")]
    max_width: Option<u32>,

    #[arg(long, help = "超过该高度的图像会被等比缩小，默认 64")]
    max_height: Option<u32>,

    #[arg(short = 't', long, help = "生成帧的线程数量，默认使用全部并行资源")]
    threads: Option<usize>,

    #[arg(
        short = 'c',
        long,
        help = "png 压缩类型，三种类型 default、fast、best，默认 default"
    )]
    compression: Option<Compression>,

    #[arg(short = 'v', long, help = "输出调试日志")]
    verbose: bool,
}

impl Args {
    /// 汇总为处理配置，没有传入的参数使用默认值
    fn config(&self) -> Config {
        let defaults = Config::default();

        let compression = match self.compression {
            Some(Compression::Fast) => png::Compression::Fast,
            Some(Compression::Best) => png::Compression::Best,
            _ => png::Compression::Default,
        };

        // 系统并行资源
        let threads = self.threads.unwrap_or_else(|| {
            available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });

        Config {
            bounds: crate::sweep::Dimensions::new(
                self.max_width.unwrap_or(defaults.bounds.width).max(1),
                self.max_height.unwrap_or(defaults.bounds.height).max(1),
            ),
            compression,
            threads: threads.max(1),
            ..defaults
        }
    }
}

/// 处理命令行参数
pub fn args_handle() -> anyhow::Result<()> {
    // 获取命令行参数
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let start_time = Instant::now();
    let session = Session::new(args.config());

    if let Some(text) = &args.saturation {
        println!("{}", session.handle_text(LOCAL_USER, text).cyan());
    }

    let bytes = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let file_name = args
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let upload = Upload {
        file_name,
        mime_type: None,
        bytes: &bytes,
    };

    let outcome = match session.handle_document(LOCAL_USER, &upload) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("{}", err.user_message().red());
            return Err(err.into());
        }
    };

    for notice in &outcome.notices {
        println!("{}", notice.yellow());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input, &outcome.archive_name));

    if let Err(err) = fs::write(&output, &outcome.archive) {
        eprintln!("{}", DELIVERY_FAILED_NOTICE.red());
        return Err(err).with_context(|| format!("failed to write {}", output.display()));
    }

    println!("{}", outcome.caption);
    println!("{}", outcome.success_notice().green());

    let second = start_time.elapsed().as_millis() as f64 / SECOND_CONSTANT;
    println!(
        "Saved {} ({:.2}KB) in {}s",
        output.display(),
        outcome.archive.len() as f64 / BYTES_INTEGER,
        second
    );
    Ok(())
}

fn default_output(input: &Path, archive_name: &str) -> PathBuf {
    match input.parent() {
        Some(dir) => dir.join(archive_name),
        None => PathBuf::from(archive_name),
    }
}
