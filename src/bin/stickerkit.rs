use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stickerkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a styled text sticker as a PNG.
    Text(TextArgs),
    /// Apply a config's preset stickers and texts and composite the canvas as a PNG.
    Compose(ComposeArgs),
    /// List the bundled chartlet categories, optionally exporting them as PNGs.
    Catalog(CatalogArgs),
}

#[derive(Parser, Debug)]
struct TextArgs {
    /// Sticker text. `\n` starts a new paragraph line.
    #[arg(long)]
    text: String,

    /// Font file used as the system family (the bundled face when omitted).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Directory of additional named fonts.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Family name to render with (falls back to the system family).
    #[arg(long)]
    font_name: Option<String>,

    /// Font size in pixels.
    #[arg(long, default_value_t = 25.0)]
    size: f32,

    /// Text color as `#rrggbb` or `#rrggbbaa`.
    #[arg(long, default_value = "#ffffff")]
    color: String,

    /// Opacity in `0..=1`.
    #[arg(long, default_value_t = 1.0)]
    alpha: f32,

    #[arg(long)]
    bold: bool,

    #[arg(long)]
    italic: bool,

    #[arg(long)]
    underline: bool,

    #[arg(long)]
    strikethrough: bool,

    /// Draw the text on a highlight in the text color.
    #[arg(long)]
    background: bool,

    /// Wrap width in pixels (unbounded when omitted).
    #[arg(long)]
    width: Option<f32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Editor config JSON. Relative paths inside it resolve against its directory.
    #[arg(long = "config")]
    config_path: PathBuf,

    /// Photo drawn under the stickers, stretched to the canvas.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Write every bundled chartlet as `<dir>/<category>_<entry>.png`.
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Text(args) => cmd_text(args),
        Command::Compose(args) => cmd_compose(args),
        Command::Catalog(args) => cmd_catalog(args),
    }
}

fn cmd_text(args: TextArgs) -> anyhow::Result<()> {
    let mut fonts = stickerkit::FontBook::new();
    if let Some(path) = &args.font {
        let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        fonts.set_system_font(bytes)?;
    }
    if let Some(dir) = &args.fonts_dir {
        let n = fonts.load_dir(dir);
        eprintln!("loaded {n} font(s) from {}", dir.display());
    }

    let mut config = stickerkit::TextConfig::default();
    config.default_font_size = args.size;
    config.min_font_size = config.min_font_size.min(args.size);
    config.max_font_size = config.max_font_size.max(args.size);
    config.validate()?;

    let color = stickerkit::Rgba8::from_hex(&args.color)
        .map_err(|e| anyhow::anyhow!("--color: {e}"))?;

    let mut state = stickerkit::StyleState::new(&config);
    state.set_text(args.text.replace("\\n", "\n"));
    state.set_font_name(args.font_name.clone());
    state.select_custom_color(color);
    state.set_alpha(args.alpha);
    if args.bold {
        state.toggle_bold();
    }
    if args.italic {
        state.toggle_italic();
    }
    if args.underline {
        state.toggle_underline();
    }
    if args.strikethrough {
        state.toggle_strikethrough();
    }
    if args.background {
        state.toggle_background();
    }

    let mut composer = stickerkit::TextComposer::new(fonts);
    let sticker = composer.compose(&state, args.width)?;
    write_png(&sticker.image, &args.out)
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let config = stickerkit::StickerConfig::from_json_file(&args.config_path)?;
    let base_dir = args.config_path.parent().unwrap_or_else(|| Path::new("."));

    let mut editor = stickerkit::StickerEditor::headless(config, base_dir)?;
    let ids = editor.apply_presets();
    editor.settle_layout();
    eprintln!("placed {} preset sticker(s)", ids.len());

    let background = match &args.background {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read photo '{}'", path.display()))?;
            Some(stickerkit::decode_image(&bytes)?)
        }
        None => None,
    };
    let frame = editor
        .surface()
        .render(background.as_ref(), stickerkit::Rgba8::rgb(18, 20, 28))?;
    write_png(&frame, &args.out)
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let mut catalog = stickerkit::ChartletCatalog::default();
    catalog.load_titles();
    catalog.pump();

    for index in 0..catalog.categories().len() {
        catalog.select(index);
        catalog.pump();
        let entries = catalog.entries(index).unwrap_or_default();
        let names: Vec<String> = entries
            .iter()
            .filter_map(|c| c.ext.as_ref()?.get("builtin")?.as_str().map(str::to_string))
            .collect();
        println!("category {index}: {}", names.join(", "));

        if let Some(dir) = &args.export_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create export dir '{}'", dir.display()))?;
            for (entry, chartlet) in entries.iter().enumerate() {
                let stickerkit::ChartletSource::Image(bitmap) = &chartlet.source else {
                    continue;
                };
                bitmap.save_png(&dir.join(format!("{index}_{entry}.png")))?;
            }
        }
    }
    Ok(())
}

fn write_png(bitmap: &stickerkit::StickerBitmap, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    bitmap.save_png(out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
