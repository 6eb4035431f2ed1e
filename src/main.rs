//! Skin Forge
//!
//! Composes a skin from the assets and selections named in configuration
//! and exports it as a PNG.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use rand::Rng;
use tracing::{info, warn};

use skin_forge::config::Settings;
use skin_forge::domain::{placeholder_texture, ColorPair, GarmentSlot, Outfit, Palette};
use skin_forge::engine::{decode_png, encode_png, palette_swatches, Image, SkinComposer};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skin_forge=info".parse()?)
        )
        .json()
        .init();

    let settings = Settings::load().context("Failed to load configuration")?;
    let assets = &settings.assets.path;

    info!(
        "Starting Skin Forge v{} with assets from {}",
        env!("CARGO_PKG_VERSION"),
        assets.display()
    );

    let colors = load_palette(&assets.join("Colors.txt"))?;
    let mask_colors = load_palette(&assets.join("MaskColors.txt"))?;
    let skin_colors = select(&colors, settings.selection.color.as_deref(), "color")?;
    let mask = select(&mask_colors, settings.selection.mask_color.as_deref(), "mask color")?;

    let pattern_path = assets
        .join("Patterns")
        .join(&settings.selection.pattern)
        .join("pattern.png");
    let pattern = load_texture(&pattern_path);

    let mut composer = SkinComposer::new(pattern, skin_colors.clone(), mask.clone());
    if let Some(name) = &settings.selection.top {
        composer.set_top(load_outfit(assets, name)?)?;
    }
    if let Some(name) = &settings.selection.bottom {
        composer.set_bottom(load_outfit(assets, name)?)?;
    }

    let skin = composer.compose()?;
    let export_dir = &settings.export.dir;
    std::fs::create_dir_all(export_dir)
        .with_context(|| format!("Failed to create {}", export_dir.display()))?;

    let file_name = format!("R_{}.png", rand::thread_rng().gen_range(0..100_000));
    let output = export_dir.join(file_name);
    write_png(&output, &skin)?;
    info!(path = %output.display(), "Exported skin");

    if settings.export.swatches {
        let swatch_dir = export_dir.join("swatches");
        std::fs::create_dir_all(&swatch_dir)
            .with_context(|| format!("Failed to create {}", swatch_dir.display()))?;

        let (width, height) = (settings.swatch.width, settings.swatch.height);
        for (prefix, palette) in [("color", &colors), ("mask", &mask_colors)] {
            for (name, swatch) in palette_swatches(palette, width, height)? {
                write_png(&swatch_dir.join(format!("{prefix}_{name}.png")), &swatch)?;
            }
        }
        info!(path = %swatch_dir.display(), "Exported swatches");
    }

    Ok(())
}

/// Read a palette file; a missing file is an empty palette
fn load_palette(path: &Path) -> anyhow::Result<Palette> {
    if !path.exists() {
        warn!(path = %path.display(), "Palette file not found");
        return Ok(Palette::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let palette = Palette::parse(&text);
    info!(path = %path.display(), entries = palette.len(), "Loaded palette");
    Ok(palette)
}

fn select(palette: &Palette, name: Option<&str>, what: &str) -> anyhow::Result<ColorPair> {
    let entry = match name {
        Some(name) => palette.find(name),
        None => palette.first(),
    };

    match entry {
        Some(pair) => Ok(pair.clone()),
        None => bail!("No {what} entry {:?} in palette", name.unwrap_or("<first>")),
    }
}

/// Load a PNG texture, substituting the placeholder when it cannot be read
fn load_texture(path: &Path) -> Image {
    let decoded = std::fs::read(path)
        .map_err(anyhow::Error::from)
        .and_then(|data| decode_png(&data).map_err(anyhow::Error::from));

    match decoded {
        Ok(image) => image,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Using placeholder texture");
            placeholder_texture()
        }
    }
}

/// Load the first PNG in `Outfits/<name>/`; its file name decides the slot
fn load_outfit(assets: &Path, name: &str) -> anyhow::Result<Outfit> {
    let dir = assets.join("Outfits").join(name);
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to read outfit directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
        .collect();
    files.sort();

    let Some(file) = files.first() else {
        bail!("Outfit {name} has no PNG texture in {}", dir.display());
    };

    let slot = file
        .file_name()
        .and_then(|f| f.to_str())
        .map(GarmentSlot::from_file_name)
        .unwrap_or_default();

    Ok(Outfit::new(name, load_texture(file), slot))
}

fn write_png(path: &Path, image: &Image) -> anyhow::Result<()> {
    let png = encode_png(image)?;
    std::fs::write(path, &png).with_context(|| format!("Failed to write {}", path.display()))
}
