//! End-to-end pipeline tests against a recording fake uploader.

use async_trait::async_trait;
use closet_processing::{
    CropDecision, CropGate, CropRegion, FileInput, ImageOptimizer, ImageUploader, ImageValidator,
    OutputFormat, PipelineError, UploadPipeline, UploadStatus, ValidationError,
};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fake uploader that tracks in-flight concurrency, can fail on demand, and
/// records every uploaded object.
struct RecordingUploader {
    current: AtomicUsize,
    max_in_flight: AtomicUsize,
    /// Uploads with payloads at least this large fail, this many times.
    fail_large_times: AtomicUsize,
    large_threshold: usize,
    delay: Duration,
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingUploader {
    fn new() -> Self {
        Self {
            current: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            fail_large_times: AtomicUsize::new(0),
            large_threshold: usize::MAX,
            delay: Duration::from_millis(0),
            uploads: Mutex::new(Vec::new()),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn failing_large_uploads(mut self, threshold: usize, times: usize) -> Self {
        self.large_threshold = threshold;
        self.fail_large_times = AtomicUsize::new(times);
        self
    }

    fn uploaded(&self) -> Vec<(String, Vec<u8>)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageUploader for RecordingUploader {
    async fn upload(
        &self,
        filename: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, anyhow::Error> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = if data.len() >= self.large_threshold
            && self
                .fail_large_times
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        {
            Err(anyhow::anyhow!("simulated upload failure"))
        } else {
            self.uploads
                .lock()
                .unwrap()
                .push((filename.to_string(), data));
            Ok(format!("https://cdn.test/product-images/{}", filename))
        };

        self.current.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn solid_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([50, 90, 160, 255]));
    let mut buffer = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )
    .unwrap();
    buffer
}

/// Poorly-compressible pattern, so its optimized payload is clearly larger
/// than any solid-color sibling.
fn noisy_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            ((x * 7 + y * 13) % 256) as u8,
            ((x * 31 + y * 3) % 256) as u8,
            ((x * 17 + y * 23) % 256) as u8,
            255,
        ])
    });
    let mut buffer = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )
    .unwrap();
    buffer
}

fn file(name: &str, content_type: &str, data: Vec<u8>) -> FileInput {
    FileInput {
        filename: name.to_string(),
        content_type: content_type.to_string(),
        data,
    }
}

fn pipeline_with(uploader: Arc<RecordingUploader>, max_images: usize) -> UploadPipeline {
    let validator = ImageValidator::new(
        5 * 1024 * 1024,
        vec!["jpg".into(), "jpeg".into(), "png".into(), "webp".into()],
        vec!["image/jpeg".into(), "image/png".into(), "image/webp".into()],
        max_images,
    );
    UploadPipeline::new(validator, ImageOptimizer::default(), uploader)
}

#[tokio::test]
async fn oversized_file_is_rejected_while_valid_sibling_proceeds() {
    let uploader = Arc::new(RecordingUploader::new());
    let validator = ImageValidator::new(
        1024, // 1 KB ceiling
        vec!["png".into()],
        vec!["image/png".into()],
        10,
    );
    let pipeline = UploadPipeline::new(validator, ImageOptimizer::default(), uploader.clone());

    let small = solid_png(8, 8);
    assert!(small.len() <= 1024);
    let big = noisy_png(400, 400);
    assert!(big.len() > 1024);

    let outcome = pipeline
        .run_batch(
            vec![
                file("big.png", "image/png", big),
                file("small.png", "image/png", small),
            ],
            0,
        )
        .await
        .unwrap();

    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].filename, "big.png");
    assert!(outcome.rejected[0].reason.contains("too large"));

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.items[0].status, UploadStatus::Done);
    assert_eq!(outcome.accepted_urls.len(), 1);
    assert_eq!(uploader.uploaded().len(), 1);
}

#[tokio::test]
async fn count_ceiling_rejects_entire_incoming_batch() {
    let uploader = Arc::new(RecordingUploader::new());
    let pipeline = pipeline_with(uploader.clone(), 3);

    // 2 existing images, batch of 2 incoming: the whole batch bounces.
    let result = pipeline
        .run_batch(
            vec![
                file("a.png", "image/png", solid_png(10, 10)),
                file("b.png", "image/png", solid_png(10, 10)),
            ],
            2,
        )
        .await;

    match result {
        Err(PipelineError::Validation(ValidationError::TooManyImages {
            existing,
            incoming,
            max,
        })) => {
            assert_eq!((existing, incoming, max), (2, 2, 3));
        }
        other => panic!("expected TooManyImages, got {:?}", other.map(|_| ())),
    }

    // Nothing entered the pipeline and nothing was uploaded.
    assert!(pipeline.items().is_empty());
    assert!(uploader.uploaded().is_empty());
}

#[tokio::test]
async fn at_most_two_items_in_flight() {
    let uploader =
        Arc::new(RecordingUploader::new().with_delay(Duration::from_millis(40)));
    let pipeline = pipeline_with(uploader.clone(), 10);

    let files = (0..5)
        .map(|i| file(&format!("f{}.png", i), "image/png", solid_png(16, 16)))
        .collect();

    let outcome = pipeline.run_batch(files, 0).await.unwrap();

    assert_eq!(outcome.accepted_urls.len(), 5);
    assert!(outcome
        .items
        .iter()
        .all(|item| item.status == UploadStatus::Done && item.progress == 100));

    let max = uploader.max_in_flight.load(Ordering::SeqCst);
    assert!(max <= 2, "observed {} concurrent uploads", max);
    assert!(max >= 1);
}

#[tokio::test]
async fn retry_transitions_only_the_failed_item() {
    // The noisy image's optimized payload exceeds the threshold and fails
    // once; the solid sibling sails through.
    let uploader = Arc::new(RecordingUploader::new().failing_large_uploads(2000, 1));
    let pipeline = pipeline_with(uploader.clone(), 10);

    let outcome = pipeline
        .run_batch(
            vec![
                file("noisy.png", "image/png", noisy_png(600, 600)),
                file("solid.png", "image/png", solid_png(32, 32)),
            ],
            0,
        )
        .await
        .unwrap();

    let failed: Vec<_> = outcome
        .items
        .iter()
        .filter(|item| item.status == UploadStatus::Error)
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].filename, "noisy.png");
    assert!(failed[0].error.as_deref().unwrap().contains("simulated"));

    let solid_before = outcome
        .items
        .iter()
        .find(|item| item.filename == "solid.png")
        .unwrap()
        .clone();
    assert_eq!(solid_before.status, UploadStatus::Done);

    // Retry the failed item only.
    let retried = pipeline.retry_item(failed[0].id).await.unwrap();
    assert_eq!(retried.status, UploadStatus::Done);
    assert_eq!(retried.progress, 100);
    assert!(retried.url.is_some());

    // The sibling was not reprocessed: still one upload recorded for it.
    let solid_after = pipeline
        .items()
        .into_iter()
        .find(|item| item.filename == "solid.png")
        .unwrap();
    assert_eq!(solid_after.url, solid_before.url);
    assert_eq!(uploader.uploaded().len(), 2);
}

#[tokio::test]
async fn retry_requires_a_failed_item() {
    let uploader = Arc::new(RecordingUploader::new());
    let pipeline = pipeline_with(uploader.clone(), 10);

    let outcome = pipeline
        .run_batch(vec![file("ok.png", "image/png", solid_png(10, 10))], 0)
        .await
        .unwrap();

    let done_id = outcome.items[0].id;
    assert!(matches!(
        pipeline.retry_item(done_id).await,
        Err(PipelineError::NotFailed(_))
    ));
    assert!(matches!(
        pipeline.retry_item(uuid::Uuid::new_v4()).await,
        Err(PipelineError::UnknownItem(_))
    ));
}

#[tokio::test]
async fn aspect_ratio_is_preserved_through_the_bounded_fit() {
    let uploader = Arc::new(RecordingUploader::new());
    let validator = ImageValidator::default();
    let optimizer = ImageOptimizer {
        max_width: 1000,
        max_height: 1000,
        format: OutputFormat::WebP,
        quality: 80.0,
    };
    let pipeline = UploadPipeline::new(validator, optimizer, uploader.clone());

    pipeline
        .run_batch(
            vec![file("wide.png", "image/png", solid_png(2000, 1000))],
            0,
        )
        .await
        .unwrap();

    let uploads = uploader.uploaded();
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].0.ends_with(".webp"));

    let decoded = image::load_from_memory(&uploads[0].1).unwrap();
    assert_eq!(
        image::GenericImageView::dimensions(&decoded),
        (1000, 500)
    );
}

#[tokio::test]
async fn heic_is_rejected_with_guidance() {
    let uploader = Arc::new(RecordingUploader::new());
    let pipeline = pipeline_with(uploader.clone(), 10);

    let outcome = pipeline
        .run_batch(
            vec![file("photo.heic", "image/heic", vec![0u8; 128])],
            0,
        )
        .await
        .unwrap();

    assert!(outcome.items.is_empty());
    assert_eq!(outcome.rejected.len(), 1);
    assert!(outcome.rejected[0].reason.contains("convert"));
}

/// Scripted gate: crops files named in the map, cancels the rest.
struct ScriptedGate {
    regions: HashMap<String, CropRegion>,
}

#[async_trait]
impl CropGate for ScriptedGate {
    async fn resolve(&self, filename: &str, _width: u32, _height: u32) -> CropDecision {
        match self.regions.get(filename) {
            Some(region) => CropDecision::Apply(*region),
            None => CropDecision::Cancel,
        }
    }
}

#[tokio::test]
async fn crop_cancel_aborts_only_that_item() {
    let uploader = Arc::new(RecordingUploader::new());
    let validator = ImageValidator::default();
    let mut regions = HashMap::new();
    regions.insert(
        "kept.png".to_string(),
        CropRegion {
            x: 10,
            y: 10,
            side: 64,
        },
    );
    let pipeline = UploadPipeline::new(validator, ImageOptimizer::default(), uploader.clone())
        .with_crop_gate(Arc::new(ScriptedGate { regions }));

    let outcome = pipeline
        .run_batch(
            vec![
                file("kept.png", "image/png", solid_png(200, 200)),
                file("dropped.png", "image/png", solid_png(200, 200)),
            ],
            0,
        )
        .await
        .unwrap();

    let kept = outcome
        .items
        .iter()
        .find(|item| item.filename == "kept.png")
        .unwrap();
    assert_eq!(kept.status, UploadStatus::Done);

    let dropped = outcome
        .items
        .iter()
        .find(|item| item.filename == "dropped.png")
        .unwrap();
    assert_eq!(dropped.status, UploadStatus::Error);
    assert!(dropped.error.as_deref().unwrap().contains("cancelled"));

    // The cropped upload is square.
    let uploads = uploader.uploaded();
    assert_eq!(uploads.len(), 1);
    let decoded = image::load_from_memory(&uploads[0].1).unwrap();
    assert_eq!(image::GenericImageView::dimensions(&decoded), (64, 64));
}
