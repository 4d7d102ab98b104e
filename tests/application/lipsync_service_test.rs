use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use lipsync::application::services::{InferenceOptions, LipSyncError, LipSyncService};
use lipsync::domain::{GuidanceScale, InferenceParams, InferenceSteps, Seed};
use lipsync::infrastructure::inference::MockInferenceRunner;

use crate::helpers::RecordingRunner;

struct Fixture {
    _dir: tempfile::TempDir,
    video: PathBuf,
    audio: PathBuf,
    output_dir: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::TempDir::new().unwrap();
    let video = dir.path().join("demo1_video.mp4");
    let audio = dir.path().join("demo1_audio.wav");
    std::fs::write(&video, b"video-bytes").unwrap();
    std::fs::write(&audio, b"audio-bytes").unwrap();
    let output_dir = dir.path().join("temp");
    Fixture {
        _dir: dir,
        video,
        audio,
        output_dir,
    }
}

fn assert_timestamped_name(path: &Path, stem: &str) {
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    let rest = name
        .strip_prefix(&format!("{}_", stem))
        .and_then(|r| r.strip_suffix(".mp4"))
        .unwrap_or_else(|| panic!("unexpected output name {}", name));

    assert_eq!(rest.len(), 15, "timestamp part {}", rest);
    assert_eq!(&rest[8..9], "_");
    assert!(rest[..8].chars().all(|c| c.is_ascii_digit()));
    assert!(rest[9..].chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn given_existing_inputs_when_processing_then_returns_timestamped_output_in_output_dir() {
    let fx = fixture();
    let service = LipSyncService::new(
        Arc::new(MockInferenceRunner::new(Duration::ZERO)),
        InferenceOptions::default(),
        fx.output_dir.clone(),
    );

    let output = service
        .process_video(&fx.video, &fx.audio, InferenceParams::default())
        .await
        .unwrap();

    assert!(output.starts_with(&fx.output_dir));
    assert_timestamped_name(&output, "demo1_video");
    assert_eq!(std::fs::read(&output).unwrap(), b"video-bytes");
}

#[tokio::test]
async fn given_params_when_processing_then_runner_receives_them_unchanged() {
    let fx = fixture();
    let runner = Arc::new(RecordingRunner::default());
    let service = LipSyncService::new(
        runner.clone(),
        InferenceOptions::default(),
        fx.output_dir.clone(),
    );
    let params = InferenceParams::new(
        GuidanceScale::new(2.4).unwrap(),
        InferenceSteps::new(42).unwrap(),
        Seed::new(7),
    );

    let output = service
        .process_video(&fx.video, &fx.audio, params)
        .await
        .unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    let args = &calls[0];
    assert_eq!(args.guidance_scale.value(), 2.4);
    assert_eq!(args.inference_steps.value(), 42);
    assert_eq!(args.seed.value(), 7);
    assert_eq!(Path::new(&args.video_path), fx.video.as_path());
    assert_eq!(Path::new(&args.audio_path), fx.audio.as_path());
    assert_eq!(Path::new(&args.video_out_path), output.as_path());
}

#[tokio::test]
async fn given_missing_output_dir_when_processing_then_it_is_created() {
    let fx = fixture();
    let nested = fx.output_dir.join("a").join("b");
    let service = LipSyncService::new(
        Arc::new(RecordingRunner::default()),
        InferenceOptions::default(),
        nested.clone(),
    );

    service
        .process_video(&fx.video, &fx.audio, InferenceParams::default())
        .await
        .unwrap();

    assert!(nested.is_dir());
}

#[tokio::test]
async fn given_missing_audio_when_processing_then_returns_missing_input_without_running() {
    let fx = fixture();
    let runner = Arc::new(RecordingRunner::default());
    let service = LipSyncService::new(
        runner.clone(),
        InferenceOptions::default(),
        fx.output_dir.clone(),
    );

    let result = service
        .process_video(
            &fx.video,
            &fx.audio.with_file_name("absent.wav"),
            InferenceParams::default(),
        )
        .await;

    assert!(matches!(result, Err(LipSyncError::MissingInput(_))));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn given_failing_runner_when_processing_then_error_is_user_facing() {
    let fx = fixture();
    let service = LipSyncService::new(
        Arc::new(MockInferenceRunner::failing("CUDA out of memory")),
        InferenceOptions::default(),
        fx.output_dir.clone(),
    );

    let err = service
        .process_video(&fx.video, &fx.audio, InferenceParams::default())
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("Error during processing: "), "{}", message);
    assert!(message.contains("CUDA out of memory"));
}

#[tokio::test]
async fn given_concurrent_submissions_when_processing_then_runs_one_at_a_time() {
    let fx = fixture();
    let runner = Arc::new(RecordingRunner::with_delay(Duration::from_millis(50)));
    let service = LipSyncService::new(
        runner.clone(),
        InferenceOptions::default(),
        fx.output_dir.clone(),
    );

    let (first, second) = tokio::join!(
        service.process_video(&fx.video, &fx.audio, InferenceParams::default()),
        service.process_video(&fx.video, &fx.audio, InferenceParams::default()),
    );

    let (first, second) = (first.unwrap(), second.unwrap());
    assert_ne!(first, second);
    assert_eq!(runner.calls().len(), 2);
    assert_eq!(runner.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_back_to_back_runs_of_same_video_when_processing_then_earlier_output_is_kept() {
    let fx = fixture();
    let service = LipSyncService::new(
        Arc::new(MockInferenceRunner::new(Duration::ZERO)),
        InferenceOptions::default(),
        fx.output_dir.clone(),
    );

    let first = service
        .process_video(&fx.video, &fx.audio, InferenceParams::default())
        .await
        .unwrap();
    std::fs::write(&first, b"first-result").unwrap();

    let second = service
        .process_video(&fx.video, &fx.audio, InferenceParams::default())
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(std::fs::read(&first).unwrap(), b"first-result");
    assert!(
        second
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("demo1_video_")
    );
}
