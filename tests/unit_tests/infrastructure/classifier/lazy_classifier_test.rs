use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::helpers::{StubClassifier, png_bytes};
use pulmoscan::application::ports::{ClassifierError, ClassifierStatus, ImageClassifier};
use pulmoscan::domain::ClassLabel;
use pulmoscan::infrastructure::classifier::{ClassifierLoader, LazyClassifier};

fn counting_loader(
    loads: Arc<AtomicUsize>,
    outcome: Result<(), &'static str>,
) -> ClassifierLoader {
    Arc::new(move || {
        loads.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(50));
        match outcome {
            Ok(()) => Ok(StubClassifier::predicting(0.3, 0.7) as Arc<dyn ImageClassifier>),
            Err(reason) => Err(ClassifierError::ModelLoadFailed(reason.to_string())),
        }
    })
}

#[tokio::test]
async fn given_concurrent_first_use_when_classifying_then_loads_exactly_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let classifier = Arc::new(LazyClassifier::new(counting_loader(loads.clone(), Ok(()))));
    let image = png_bytes(16, 16);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let classifier = Arc::clone(&classifier);
        let image = image.clone();
        handles.push(tokio::spawn(async move { classifier.classify(&image).await }));
    }

    for handle in handles {
        let classification = handle.await.unwrap().unwrap();
        assert_eq!(classification.label, ClassLabel::Pneumonia);
    }
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(classifier.status(), ClassifierStatus::Ready);
}

#[tokio::test]
async fn given_failed_load_when_classifying_again_then_reports_not_ready_without_reloading() {
    let loads = Arc::new(AtomicUsize::new(0));
    let classifier = LazyClassifier::new(counting_loader(loads.clone(), Err("weights missing")));

    let first = classifier.classify(b"img").await;
    let second = classifier.classify(b"img").await;

    for result in [first, second] {
        match result {
            Err(ClassifierError::ModelNotReady(reason)) => {
                assert!(reason.contains("weights missing"))
            }
            other => panic!("expected ModelNotReady, got {other:?}"),
        }
    }
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(matches!(classifier.status(), ClassifierStatus::Failed(_)));
}

#[tokio::test]
async fn given_untouched_classifier_when_checking_status_then_not_loaded() {
    let loads = Arc::new(AtomicUsize::new(0));
    let classifier = LazyClassifier::new(counting_loader(loads.clone(), Ok(())));

    assert_eq!(classifier.status(), ClassifierStatus::NotLoaded);
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_preload_when_ensuring_loaded_then_later_classify_reuses_instance() {
    let loads = Arc::new(AtomicUsize::new(0));
    let classifier = LazyClassifier::new(counting_loader(loads.clone(), Ok(())));

    classifier.ensure_loaded().await.unwrap();
    classifier.classify(b"img").await.unwrap();

    assert_eq!(loads.load(Ordering::SeqCst), 1);
}
