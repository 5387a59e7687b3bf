use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use musabooth::{
    ArtifactSink, BoothError, BoothResult, BoothSession, CaptureFrame, CaptureOutcome,
    ComposeOptions, DecodedImage, DecorStyle, FRAME_BROWN, FramePolicy, FrameSource,
    PreparedBoothAssets, VerseCollection, decode_image,
};

#[derive(Parser, Debug)]
#[command(name = "musabooth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one capture from a still image and write the PNG artifact.
    Capture(CaptureArgs),
    /// Validate a verse list and print it with cursor order.
    Verses(VersesArgs),
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Input still image standing in for the live camera frame.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Verse list JSON (array of strings).
    #[arg(long)]
    verses: Option<PathBuf>,

    /// Directory holding ornament SVGs and the verse font.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Output directory for the timestamped artifact.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// How many times to advance the verse cursor before capturing.
    #[arg(long, default_value_t = 0)]
    advance: u32,

    /// Booth configuration file (JSON with `policy` and `decor` presets).
    /// Explicit --policy/--decor flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame layout policy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Frame decoration preset.
    #[arg(long, value_enum)]
    decor: Option<DecorArg>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct BoothConfig {
    policy: Option<FramePolicy>,
    decor: Option<DecorStyle>,
}

impl BoothConfig {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config '{}'", path.display()))
    }
}

#[derive(Parser, Debug)]
struct VersesArgs {
    /// Verse list JSON (array of strings).
    #[arg(long)]
    verses: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    /// Fixed-pixel control zone on the longer side.
    Fixed,
    /// Fully-proportional margins.
    Proportional,
}

impl From<PolicyArg> for FramePolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Fixed => FramePolicy::default(),
            PolicyArg::Proportional => FramePolicy::Proportional {
                side_frac: 0.05,
                top_frac: 0.05,
                bottom_frac: 0.18,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecorArg {
    /// Edge segments inset from the corners.
    Ornamented,
    /// Stroked outline with corner ticks.
    Stroke,
}

impl From<DecorArg> for DecorStyle {
    fn from(value: DecorArg) -> Self {
        match value {
            DecorArg::Ornamented => DecorStyle::default(),
            DecorArg::Stroke => DecorStyle::ProportionalStroke {
                stroke_frac: 0.004,
                min_stroke_px: 2.0,
                tick_frac: 0.15,
                color: FRAME_BROWN,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Capture(args) => cmd_capture(args),
        Command::Verses(args) => cmd_verses(args),
    }
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    // The still image stands in for camera acquisition; failure here is the
    // fatal CameraAcquisitionError of a live session.
    let mut source = StillFrameSource::open(&args.in_path)?;

    // Verse load failure is non-fatal: capture continues with no verse text.
    let verses = match &args.verses {
        Some(path) => match VerseCollection::from_path(path) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("warning: {e}; continuing without verses");
                VerseCollection::default()
            }
        },
        None => VerseCollection::default(),
    };

    let assets = match &args.assets {
        Some(root) => PreparedBoothAssets::prepare(root)?,
        None => PreparedBoothAssets::empty(),
    };

    let config = match &args.config {
        Some(path) => BoothConfig::load(path)?,
        None => BoothConfig::default(),
    };
    let opts = ComposeOptions {
        policy: args
            .policy
            .map(Into::into)
            .or(config.policy)
            .unwrap_or_default(),
        decor: args
            .decor
            .map(Into::into)
            .or(config.decor)
            .unwrap_or_default(),
        ..ComposeOptions::default()
    };

    let mut session = BoothSession::new(verses, assets, opts);
    for _ in 0..args.advance {
        session.next_verse();
    }
    if let Some(label) = session.verse_label() {
        eprintln!("verse: {label}");
    }

    let mut sink = DirArtifactSink {
        dir: args.out_dir.clone(),
    };
    match session.capture(&mut source, &mut sink)? {
        CaptureOutcome::Captured { file_name } => {
            eprintln!("wrote {}", args.out_dir.join(file_name).display());
        }
        CaptureOutcome::NotReady => {
            eprintln!("capture skipped: source produced no frame");
        }
    }
    Ok(())
}

fn cmd_verses(args: VersesArgs) -> anyhow::Result<()> {
    let verses = VerseCollection::from_path(&args.verses)?;
    if verses.is_empty() {
        eprintln!("verse list is empty");
        return Ok(());
    }
    let mut store = musabooth::VerseStore::new(verses.clone());
    for i in 0..verses.len() {
        let current = store.current().unwrap_or_default();
        println!("{i}: \"{current}\"");
        store.advance();
    }
    Ok(())
}

/// Frame source backed by a decoded still image.
struct StillFrameSource {
    image: DecodedImage,
}

impl StillFrameSource {
    fn open(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read frame '{}'", path.display()))?;
        let image = decode_image(&bytes)
            .map_err(|e| BoothError::camera(format!("decode frame '{}': {e}", path.display())))?;
        Ok(Self { image })
    }
}

impl FrameSource for StillFrameSource {
    fn frame(&mut self) -> BoothResult<Option<CaptureFrame<'_>>> {
        Ok(Some(CaptureFrame::new(
            self.image.width,
            self.image.height,
            &self.image.rgba8,
        )?))
    }
}

/// Sink writing delivered artifacts into a directory.
struct DirArtifactSink {
    dir: PathBuf,
}

impl ArtifactSink for DirArtifactSink {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> BoothResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, png)
            .with_context(|| format!("write artifact '{}'", path.display()))?;
        Ok(())
    }
}
