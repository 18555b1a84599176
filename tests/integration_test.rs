use mac_clip::{
    clipboard::{
        processor::{Action, MacProcessor, ProcessorConfig},
        watcher::{ClipboardWatcher, MacEvent},
        ClipboardBackend, MemoryClipboard,
    },
    mac::{format_mac_address, is_mac_address, MacError, MacStyle},
    MacClipError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

#[tokio::test]
async fn test_detect_then_reformat_roundtrip() {
    let clipboard = Arc::new(MemoryClipboard::with_text("AA:BB:CC:DD:EE:FF"));

    let (watcher, mut event_rx) =
        ClipboardWatcher::new(clipboard.clone(), Duration::from_millis(5));
    tokio::spawn(watcher.start_watching());

    let event = timeout(Duration::from_secs(2), event_rx.recv())
        .await
        .expect("Watcher did not report the MAC")
        .expect("Watcher channel closed");

    let mut processor = MacProcessor::new(
        ProcessorConfig {
            auto_format: None,
            print_renderings: false,
        },
        clipboard.clone(),
    );
    let report = processor.handle_event(event).expect("Failed to handle event");
    assert_eq!(report.rendering(MacStyle::Dashes), Some("AA-BB-CC-DD-EE-FF"));

    processor
        .apply(Action::Format(MacStyle::DotSeparated))
        .expect("Failed to format");
    assert_eq!(clipboard.read_text().unwrap(), "AABB.CCDD.EEFF");

    // The rewritten clipboard is a new MAC rendering and is reported again.
    let event = timeout(Duration::from_secs(2), event_rx.recv())
        .await
        .expect("Watcher did not report the reformatted MAC")
        .expect("Watcher channel closed");
    assert_eq!(event.mac, "AABB.CCDD.EEFF");
    assert_eq!(event.style, Some(MacStyle::DotSeparated));
}

#[tokio::test]
async fn test_auto_format_settles() {
    let clipboard = Arc::new(MemoryClipboard::with_text("aabb.ccdd.eeff"));

    let (watcher, event_rx) = ClipboardWatcher::new(clipboard.clone(), Duration::from_millis(5));
    let processor = MacProcessor::new(
        ProcessorConfig {
            auto_format: Some(MacStyle::Colons),
            print_renderings: false,
        },
        clipboard.clone(),
    );
    let (_action_tx, action_rx) = mpsc::channel::<Action>(1);

    tokio::spawn(watcher.start_watching());
    tokio::spawn(processor.run(event_rx, action_rx));

    let settled = timeout(Duration::from_secs(2), async {
        loop {
            if clipboard.read_text().ok().as_deref() == Some("aa:bb:cc:dd:ee:ff") {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(settled.is_ok(), "Clipboard was never reformatted");
}

#[tokio::test]
async fn test_manual_format_survives_auto_format() {
    let clipboard = Arc::new(MemoryClipboard::with_text("aa:bb:cc:dd:ee:ff"));

    let (watcher, event_rx) = ClipboardWatcher::new(clipboard.clone(), Duration::from_millis(5));
    let processor = MacProcessor::new(
        ProcessorConfig {
            auto_format: Some(MacStyle::Colons),
            print_renderings: false,
        },
        clipboard.clone(),
    );
    let (action_tx, action_rx) = mpsc::channel(4);

    tokio::spawn(watcher.start_watching());
    tokio::spawn(processor.run(event_rx, action_rx));

    // Let the first poll hand the MAC to the processor.
    tokio::time::sleep(Duration::from_millis(100)).await;
    action_tx
        .send(Action::Format(MacStyle::Dashes))
        .await
        .expect("Processor stopped");

    let copied = timeout(Duration::from_secs(2), async {
        loop {
            if clipboard.read_text().ok().as_deref() == Some("aa-bb-cc-dd-ee-ff") {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(copied.is_ok(), "Dashed MAC was never copied");

    // Several poll intervals later the watcher has seen the dashed MAC and
    // the processor has left it alone.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(clipboard.read_text().unwrap(), "aa-bb-cc-dd-ee-ff");
}

#[test]
fn test_invalid_input_is_explicit() {
    let err = format_mac_address("12:34:56", MacStyle::Colons).unwrap_err();
    assert_eq!(err.degraded(), "123456");

    let err: MacClipError = err.into();
    assert!(matches!(
        err,
        MacClipError::InvalidMac(MacError::InvalidLength { .. })
    ));
    assert!(err.to_string().contains("found 6"));
}

#[test]
fn test_case_toggle_then_format() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let processor = MacProcessor::new(
        ProcessorConfig {
            auto_format: None,
            print_renderings: false,
        },
        clipboard.clone(),
    );

    let (event_tx, event_rx) = mpsc::channel(4);
    let (action_tx, action_rx) = mpsc::channel(4);
    event_tx.try_send(MacEvent::new("0a-1b-2c-3d-4e-5f")).unwrap();
    action_tx.try_send(Action::ConvertCase).unwrap();
    action_tx
        .try_send(Action::Format(MacStyle::Colons))
        .unwrap();
    drop(event_tx);
    drop(action_tx);

    tokio_test::block_on(processor.run(event_rx, action_rx));

    let output = clipboard.read_text().unwrap();
    assert_eq!(output, "0A:1B:2C:3D:4E:5F");
    assert!(is_mac_address(&output));
}
