use super::*;

struct StaticSource {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl StaticSource {
    fn opaque_gray(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bytes: vec![128u8; (width * height * 4) as usize],
        }
    }

    fn not_ready() -> Self {
        Self {
            width: 0,
            height: 0,
            bytes: Vec::new(),
        }
    }
}

impl FrameSource for StaticSource {
    fn frame(&mut self) -> BoothResult<Option<CaptureFrame<'_>>> {
        Ok(Some(CaptureFrame::new(self.width, self.height, &self.bytes)?))
    }
}

struct WarmingUpSource;

impl FrameSource for WarmingUpSource {
    fn frame(&mut self) -> BoothResult<Option<CaptureFrame<'_>>> {
        Ok(None)
    }
}

#[derive(Default)]
struct RecordingSink {
    deliveries: Vec<(String, Vec<u8>)>,
}

impl ArtifactSink for RecordingSink {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> BoothResult<()> {
        self.deliveries.push((file_name.to_string(), png.to_vec()));
        Ok(())
    }
}

fn session_with(verses: &[&str]) -> BoothSession {
    let collection = VerseCollection::from(
        verses.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
    );
    BoothSession::new(collection, PreparedBoothAssets::empty(), ComposeOptions::default())
}

#[test]
fn capture_before_first_frame_is_a_benign_noop() {
    let mut session = session_with(&["Prva"]);
    let mut sink = RecordingSink::default();

    let outcome = session.capture(&mut WarmingUpSource, &mut sink).unwrap();
    assert_eq!(outcome, CaptureOutcome::NotReady);
    assert!(sink.deliveries.is_empty());

    let outcome = session
        .capture(&mut StaticSource::not_ready(), &mut sink)
        .unwrap();
    assert_eq!(outcome, CaptureOutcome::NotReady);
    assert!(sink.deliveries.is_empty());
}

#[test]
fn capture_delivers_png_with_timestamped_name() {
    let mut session = session_with(&[]);
    let mut sink = RecordingSink::default();

    let outcome = session
        .capture(&mut StaticSource::opaque_gray(320, 240), &mut sink)
        .unwrap();
    let CaptureOutcome::Captured { file_name } = outcome else {
        panic!("expected a capture, got {outcome:?}");
    };

    assert_eq!(sink.deliveries.len(), 1);
    let (delivered_name, png) = &sink.deliveries[0];
    assert_eq!(delivered_name, &file_name);

    // musa-selfie-<epoch-ms>.png
    let digits = file_name
        .strip_prefix("musa-selfie-")
        .and_then(|rest| rest.strip_suffix(".png"))
        .unwrap();
    assert!(!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));

    // PNG signature.
    assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn verse_cursor_walks_cyclically_through_the_list() {
    let mut session = session_with(&["Prva", "Druga", "Treća"]);
    assert_eq!(session.current_verse(), Some("Prva"));
    assert_eq!(session.next_verse(), Some("Druga"));
    assert_eq!(session.next_verse(), Some("Treća"));
    assert_eq!(session.next_verse(), Some("Prva"));

    // 4 advances from the start land on 4 mod 3 = 1.
    let mut session = session_with(&["Prva", "Druga", "Treća"]);
    for _ in 0..4 {
        session.next_verse();
    }
    assert_eq!(session.current_verse(), Some("Druga"));
}

#[test]
fn empty_verse_list_disables_the_verse_trigger() {
    let mut session = session_with(&[]);
    assert_eq!(session.current_verse(), None);
    assert_eq!(session.next_verse(), None);
    assert_eq!(session.verse_label(), None);
}

#[test]
fn verse_label_is_quoted() {
    let session = session_with(&["Kad svane dan"]);
    assert_eq!(session.verse_label().as_deref(), Some("\"Kad svane dan\""));
}

#[test]
fn file_name_format_is_stable() {
    assert_eq!(capture_file_name(0), "musa-selfie-0.png");
    assert_eq!(
        capture_file_name(1_756_400_000_123),
        "musa-selfie-1756400000123.png"
    );
}

#[test]
fn encode_png_round_trips_dimensions() {
    let artifact = RenderedArtifact {
        width: 3,
        height: 2,
        rgba8_premul: vec![255u8; 3 * 2 * 4],
    };
    let png = encode_png(&artifact).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (3, 2));
}

#[test]
fn encode_png_unpremultiplies_translucent_pixels() {
    // Premultiplied half-transparent red next to an opaque white pixel.
    let artifact = RenderedArtifact {
        width: 2,
        height: 1,
        rgba8_premul: vec![128, 0, 0, 128, 255, 255, 255, 255],
    };
    let png = encode_png(&artifact).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    // PNG is straight alpha: 128/128 scales back to full red.
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(decoded.get_pixel(1, 0).0, [255, 255, 255, 255]);
}
