use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use texanim::ImageSource as _;

#[derive(Parser, Debug)]
#[command(name = "texanim", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one target at a given tick and write it as a PNG.
    Frame(FrameArgs),
    /// Bake a target's full cycle into PNG frames plus `index.json`.
    Bake(BakeArgs),
    /// Print the phase list and cycle length of every descriptor.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Animation manifest JSON. Image ids resolve relative to its directory.
    #[arg(long)]
    manifest: PathBuf,

    /// Target image id.
    #[arg(long)]
    target: String,

    /// Tick to render (0-based).
    #[arg(long, default_value_t = 0)]
    tick: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BakeArgs {
    /// Animation manifest JSON. Image ids resolve relative to its directory.
    #[arg(long)]
    manifest: PathBuf,

    /// Target image id.
    #[arg(long)]
    target: String,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Engine config JSON; only the `bake` section is used.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Animation manifest JSON.
    #[arg(long)]
    manifest: PathBuf,
}

/// Top-level manifest document.
///
/// `files` lists descriptor documents (one `AnimationDescriptor` each); ids in those starting with
/// `./` resolve against the document's own directory.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    animations: Vec<texanim::AnimationDescriptor>,
    #[serde(default)]
    files: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
struct BakeIndex<'a> {
    target: &'a str,
    cycle_len: u64,
    frames: Vec<String>,
    index: &'a [u32],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Bake(args) => cmd_bake(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn manifest_root(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn read_descriptors(path: &Path) -> anyhow::Result<Vec<texanim::AnimationDescriptor>> {
    let manifest: Manifest = read_json(path, "manifest")?;
    let root = manifest_root(path);

    let mut out = manifest.animations;
    for file_id in &manifest.files {
        let norm = texanim::normalize_rel_path(file_id)?;
        let mut desc: texanim::AnimationDescriptor =
            read_json(&root.join(&norm), "animation descriptor")?;
        desc.source = texanim::resolve_relative_id(&norm, &desc.source);
        desc.target = texanim::resolve_relative_id(&norm, &desc.target);
        out.push(desc);
    }
    Ok(out)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<texanim::EngineConfig> {
    match path {
        Some(p) => Ok(texanim::EngineConfig::from_path(p)?),
        None => Ok(texanim::EngineConfig::default()),
    }
}

fn write_png(buf: &texanim::PixelBuffer, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let bytes = texanim::encode_png(buf)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let descriptors = read_descriptors(&args.manifest)?;
    let config = texanim::EngineConfig {
        animated_textures: true,
        mode: texanim::PlaybackMode::Live,
        ..read_config(args.config.as_deref())?
    };

    let mut source = texanim::FsImageSource::new(manifest_root(&args.manifest));
    let mut registry = texanim::TextureRegistry::new();
    let summary = registry.reload(&config, &descriptors, &mut source);
    if summary.skipped > 0 {
        eprintln!("skipped {} animation(s)", summary.skipped);
    }

    let frame = if registry.get(&args.target).is_some() {
        for _ in 0..=args.tick {
            registry.tick_all();
        }
        registry
            .frame_for(&args.target, args.tick)
            .with_context(|| format!("target '{}' vanished", args.target))?
            .clone()
    } else {
        // Not animated: show the plain image.
        eprintln!("'{}' has no animations, writing base image", args.target);
        source.load(&args.target)?
    };

    write_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_bake(args: BakeArgs) -> anyhow::Result<()> {
    let descriptors: Vec<_> = read_descriptors(&args.manifest)?
        .into_iter()
        .filter(|d| d.target == args.target)
        .collect();
    if descriptors.is_empty() {
        anyhow::bail!("no animations target '{}'", args.target);
    }
    let config = read_config(args.config.as_deref())?;

    let mut source = texanim::FsImageSource::new(manifest_root(&args.manifest));
    let base = source.load(&args.target)?;
    let mut texture = texanim::AnimatedTexture::build(&args.target, base, &descriptors, &mut source);
    for skipped in texture.skipped() {
        eprintln!(
            "skipped animation #{} ({}): {}",
            skipped.index, skipped.source, skipped.reason
        );
    }
    let baked = texanim::BakedTextureAnimation::bake(&mut texture, &config.bake)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let mut names = Vec::with_capacity(baked.distinct_frames());
    for (i, frame) in baked.frames().iter().enumerate() {
        let name = format!("frame_{i:04}.png");
        write_png(frame, &args.out_dir.join(&name))?;
        names.push(name);
    }

    let index = BakeIndex {
        target: baked.target(),
        cycle_len: baked.cycle_len(),
        frames: names,
        index: baked.frame_indices(),
    };
    let index_path = args.out_dir.join("index.json");
    let f = File::create(&index_path)
        .with_context(|| format!("create '{}'", index_path.display()))?;
    serde_json::to_writer_pretty(f, &index).with_context(|| "write index JSON")?;

    eprintln!(
        "wrote {} frame(s) for a {}-tick cycle to {}",
        baked.distinct_frames(),
        baked.cycle_len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let descriptors = read_descriptors(&args.manifest)?;
    let mut source = texanim::FsImageSource::new(manifest_root(&args.manifest));

    for (i, desc) in descriptors.iter().enumerate() {
        println!(
            "#{i} {} -> {} at ({}, {}) {}x{}",
            desc.source, desc.target, desc.x, desc.y, desc.width, desc.height
        );
        let phases = source
            .load(&desc.source)
            .and_then(|img| texanim::build_phases(desc, img.height()));
        match phases {
            Ok(phases) => {
                println!("  cycle: {} ticks", texanim::cycle_length(&phases));
                for phase in &phases {
                    println!("  {}", serde_json::to_string(phase)?);
                }
            }
            Err(e) => println!("  error: {e}"),
        }
    }
    Ok(())
}
