use column_sweep::archive::MANIFEST_NAME;
use column_sweep::session::{Session, Upload};
use column_sweep::sweep::{normalize, Dimensions, PixelBuffer};
use column_sweep::{Config, ConstraintViolation, Error};
use rgb::RGBA8;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const RED: RGBA8 = RGBA8 {
    r: 255,
    g: 0,
    b: 0,
    a: 200,
};

fn png_bytes(width: u32, height: u32, pixel: RGBA8) -> Vec<u8> {
    let buffer = PixelBuffer::filled(width, height, pixel);
    column_sweep::archive::encode_png(&buffer, png::Compression::Fast).unwrap()
}

fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, index: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    archive
        .by_index(index)
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();
    bytes
}

fn run(config: Config, text: Option<&str>, bytes: &[u8]) -> column_sweep::session::Outcome {
    let session = Session::new(config);
    if let Some(text) = text {
        session.handle_text(1, text);
    }
    let upload = Upload {
        file_name: "red.png",
        mime_type: Some("image/png"),
        bytes,
    };
    session.handle_document(1, &upload).unwrap()
}

#[test]
fn red_square_full_saturation() {
    let outcome = run(Config::default(), None, &png_bytes(10, 10, RED));
    assert_eq!(outcome.frame_count, 11);
    assert_eq!(outcome.dimensions, Dimensions::new(10, 10));
    assert_eq!(outcome.archive_name, "red_column_saturation_100pct_10x10.zip");
    assert_eq!(outcome.notices.len(), 1);

    let mut archive = ZipArchive::new(Cursor::new(outcome.archive)).unwrap();
    assert_eq!(archive.len(), 12);
    assert_eq!(
        archive.by_index(10).unwrap().name(),
        "columns_10_of_10_100pct.png"
    );
    assert_eq!(archive.by_index(11).unwrap().name(), MANIFEST_NAME);

    let first = normalize(&read_entry(&mut archive, 0)).unwrap();
    assert!(first.pixels().iter().all(|pixel| *pixel == RED));

    let last = normalize(&read_entry(&mut archive, 10)).unwrap();
    assert!(last
        .pixels()
        .iter()
        .all(|pixel| *pixel == RGBA8::new(0, 0, 0, 200)));

    let middle = normalize(&read_entry(&mut archive, 4)).unwrap();
    assert_eq!(middle.pixel(3, 5), Some(RGBA8::new(0, 0, 0, 200)));
    assert_eq!(middle.pixel(4, 5), Some(RED));
}

#[test]
fn stored_level_and_resize_are_applied() {
    let config = Config {
        threads: 3,
        ..Config::default()
    };
    let outcome = run(config, Some("50%"), &png_bytes(128, 64, RED));
    assert_eq!(outcome.original_dimensions, Dimensions::new(128, 64));
    assert_eq!(outcome.dimensions, Dimensions::new(64, 32));
    assert_eq!(outcome.frame_count, 65);
    assert_eq!(
        outcome.notices[0],
        "🗜️ Image compressed from 128x64 to 64x32"
    );
    assert!(outcome.notices[1].starts_with("Processing 64x32 image with 50% saturation."));
    assert!(outcome.caption.contains("65 PNG images"));
    assert!(outcome.success_notice().contains("Saturation level: 50%"));

    let mut archive = ZipArchive::new(Cursor::new(outcome.archive)).unwrap();
    assert_eq!(archive.len(), 66);
    assert_eq!(
        archive.by_index(64).unwrap().name(),
        "columns_64_of_64_50pct.png"
    );
    let mut manifest = String::new();
    archive
        .by_name(MANIFEST_NAME)
        .unwrap()
        .read_to_string(&mut manifest)
        .unwrap();
    assert!(manifest.contains("Processed size: 64x32"));
    assert!(manifest.contains("Saturation level: 50%"));
    assert!(manifest.contains("Total images: 65"));
}

#[test]
fn parallel_and_sequential_frames_match() {
    let bytes = png_bytes(12, 3, RGBA8::new(90, 160, 220, 255));
    let sequential = run(Config::default(), Some("saturation 35"), &bytes);
    let parallel = run(
        Config {
            threads: 4,
            ..Config::default()
        },
        Some("saturation 35"),
        &bytes,
    );

    let mut a = ZipArchive::new(Cursor::new(sequential.archive)).unwrap();
    let mut b = ZipArchive::new(Cursor::new(parallel.archive)).unwrap();
    assert_eq!(a.len(), b.len());
    for index in 0..13 {
        assert_eq!(read_entry(&mut a, index), read_entry(&mut b, index));
    }
}

#[test]
fn oversize_upload_never_decodes() {
    let session = Session::new(Config {
        max_upload_bytes: 16,
        ..Config::default()
    });
    let bytes = png_bytes(10, 10, RED);
    let upload = Upload {
        file_name: "red.png",
        mime_type: None,
        bytes: &bytes,
    };
    let err = session.handle_document(1, &upload).unwrap_err();
    assert!(matches!(
        err,
        Error::Constraint(ConstraintViolation::TooLarge { limit: 16, .. })
    ));
}
