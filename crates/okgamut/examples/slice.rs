use std::io::{Result, Write};

use okgamut::opt::{SliceOptions, Volume};
use okgamut::{GamutPolicy, Slice};

/// Render a constant-hue slice as a binary PPM image to standard output.
///
/// Usage: `cargo run --example slice -- [hue] [clip|chroma|cone] > slice.ppm`
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let hue = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(29.2);
    let policy = match args.next() {
        Some(name) => name
            .parse::<GamutPolicy>()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?,
        None => GamutPolicy::ConeClamp,
    };

    let options = SliceOptions::builder()
        .hue(hue)
        .policy(policy)
        .highlight(policy == GamutPolicy::Clip)
        .boundary(true)
        .volume(Volume::from_environment())
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let image = Slice::new(options).render_with_log(&mut std::io::stderr().lock())?;

    let mut out = std::io::stdout().lock();
    write!(out, "P6\n{} {}\n255\n", image.width(), image.height())?;
    for pixel in image.rgba().chunks_exact(4) {
        out.write_all(&pixel[..3])?;
    }
    out.flush()
}
