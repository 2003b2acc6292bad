use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use pulmoscan::application::ports::ImageClassifier;
use pulmoscan::application::services::{
    AnalysisService, ReportCache, TranscriptionService, VisionRouter,
};
use pulmoscan::domain::UploadPolicy;
use pulmoscan::infrastructure::audio::{SymphoniaAudioProbe, TranscriptionEngineFactory};
use pulmoscan::infrastructure::classifier::{CandleVitClassifier, ClassifierLoader, LazyClassifier};
use pulmoscan::infrastructure::observability::{TracingConfig, init_tracing};
use pulmoscan::infrastructure::vision::VisionProviderFactory;
use pulmoscan::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(
        TracingConfig::new(
            environment.as_str(),
            &settings.logging.format,
            settings.logging.filter.clone(),
        ),
        settings.server.port,
    );

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.http.timeout_secs))
        .build()
        .context("failed to build http client")?;

    let vision_order = settings.vision_order();
    let providers = VisionProviderFactory::create_ordered(&vision_order, &http_client, |name| {
        settings.vision_provider_config(name)
    });
    let router = Arc::new(VisionRouter::new(providers));

    let model_path = settings.classifier.model_path.clone();
    let loader_path = model_path.clone();
    let loader: ClassifierLoader = Arc::new(move || {
        CandleVitClassifier::load(&loader_path)
            .map(|c| Arc::new(c) as Arc<dyn ImageClassifier>)
    });
    let classifier = Arc::new(LazyClassifier::new(loader));

    if settings.classifier.preload {
        tracing::info!(model = %model_path, "Preloading classifier");
        if let Err(e) = classifier.ensure_loaded().await {
            tracing::warn!(error = %e, "Classifier preload failed, fast mode unavailable");
        }
    }

    let mut analysis_service = AnalysisService::new(
        router,
        classifier,
        model_path,
        UploadPolicy::images(settings.upload.max_image_bytes),
    );
    if settings.cache.enabled {
        analysis_service = analysis_service.with_cache(ReportCache::new(
            Duration::from_secs(settings.cache.ttl_secs),
            settings.cache.max_entries,
        ));
    }

    let audio_order = settings.audio_order();
    let engines = TranscriptionEngineFactory::create_ordered(&audio_order, &http_client, |name| {
        settings.transcription_engine_config(name)
    });
    let transcription_service = TranscriptionService::new(
        engines,
        Arc::new(SymphoniaAudioProbe),
        UploadPolicy::audio(settings.upload.max_audio_bytes),
    );

    let state = AppState {
        analysis_service: Arc::new(analysis_service),
        transcription_service: Arc::new(transcription_service),
    };

    let max_upload = settings
        .upload
        .max_image_bytes
        .max(settings.upload.max_audio_bytes);
    let app = create_router(state, max_upload);

    let host: std::net::IpAddr = settings
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host: {}", settings.server.host))?;
    let addr = SocketAddr::new(host, settings.server.port);

    tracing::info!(
        %addr,
        vision_providers = ?vision_order,
        audio_providers = ?audio_order,
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
