//! Host-side helper: `serve` builds the WASM bundle and serves `static/`
//! (exposing it via ngrok when available); `still` and `frames` render the
//! warp on the CPU for quick previews.

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process::{Command, Stdio};
    use std::{thread, time::Duration};

    use anyhow::{bail, Context, Result};
    use clap::{ArgAction, Parser, Subcommand};
    use dp_warp_wasm::{HoverDriver, MeshRenderer, RasterSurface, WarpConfig};
    use tracing::{info, warn, Level};
    use tracing_subscriber::{fmt, EnvFilter};

    #[derive(Debug, Parser)]
    #[command(name = "dp-warp", about = "Build, serve and preview the hover warp")]
    struct Cli {
        /// TOML file overriding the warp constants (previews only)
        #[arg(short, long, value_name = "FILE", global = true)]
        config: Option<PathBuf>,

        /// Increase log verbosity (repeatable)
        #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: Cmd,
    }

    #[derive(Debug, Subcommand)]
    enum Cmd {
        /// Build the wasm package into static/pkg and serve static/
        Serve {
            #[arg(long, default_value_t = 8000)]
            port: u16,
        },
        /// Render a single frame at a fixed distortion factor
        Still {
            #[arg(long)]
            image: PathBuf,
            #[arg(long, default_value_t = 1.0)]
            factor: f64,
            #[arg(long, default_value = "still.png")]
            out: PathBuf,
        },
        /// Render every step of a hover enter followed by a leave
        Frames {
            #[arg(long)]
            image: PathBuf,
            #[arg(long, default_value = "frames")]
            out_dir: PathBuf,
        },
    }

    fn init_tracing(verbosity: u8) {
        let level = match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("dp_warp_wasm={level},dp_warp={level}")));
        fmt().with_env_filter(filter).with_target(true).init();
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        init_tracing(cli.verbose);

        let config = match &cli.config {
            Some(path) => WarpConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => WarpConfig::default(),
        };

        match cli.command {
            Cmd::Serve { port } => serve(port),
            Cmd::Still { image, factor, out } => still(&config, &image, factor, &out),
            Cmd::Frames { image, out_dir } => frames(&config, &image, &out_dir),
        }
    }

    fn renderer(config: &WarpConfig, path: &Path) -> Result<MeshRenderer<RasterSurface>> {
        let pixels = image::open(path)
            .with_context(|| format!("decoding {}", path.display()))?
            .to_rgba8();
        info!(
            width = pixels.width(),
            height = pixels.height(),
            path = %path.display(),
            "loaded image"
        );
        let surface = RasterSurface::new(config.canvas_width, config.canvas_height);
        let mut renderer = MeshRenderer::new(surface, config);
        renderer.set_image(pixels);
        Ok(renderer)
    }

    fn still(config: &WarpConfig, image: &Path, factor: f64, out: &Path) -> Result<()> {
        if !(0.0..=1.0).contains(&factor) {
            bail!("factor must be within [0, 1], got {factor}");
        }
        let mut renderer = renderer(config, image)?;
        let stats = renderer.render(factor)?;
        renderer.surface().save_png(out)?;
        info!(
            painted = stats.painted,
            skipped = stats.skipped,
            out = %out.display(),
            "wrote frame"
        );
        Ok(())
    }

    fn frames(config: &WarpConfig, image: &Path, out_dir: &Path) -> Result<()> {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("creating {}", out_dir.display()))?;
        let mut renderer = renderer(config, image)?;
        let mut driver = HoverDriver::new(config);
        let mut index = 0usize;

        for entering in [true, false] {
            if entering {
                driver.pointer_enter();
            } else {
                driver.pointer_leave();
            }
            loop {
                let step = driver.tick(&mut renderer)?;
                let path = out_dir.join(format!("frame_{index:04}.png"));
                renderer.surface().save_png(&path)?;
                index += 1;
                if step.settled {
                    info!(frames = index, progress = step.progress, "transition settled");
                    break;
                }
            }
        }
        Ok(())
    }

    fn serve(port: u16) -> Result<()> {
        info!("building wasm pkg");
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
        {
            Ok(st) if st.success() => {}
            Ok(st) => bail!("wasm-pack exited with {st}"),
            Err(_) => warn!("wasm-pack not found in PATH; the site may serve stale artifacts"),
        }

        info!("serving static/ at http://127.0.0.1:{port}");
        let port = port.to_string();
        let _server = Command::new("python3")
            .args(["-m", "http.server", port.as_str(), "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to start http server")?;

        // Optional public tunnel.
        match Command::new("ngrok")
            .args(["http", port.as_str()])
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
        {
            Ok(_) => info!("ngrok tunnel starting"),
            Err(_) => warn!("ngrok not found; install it to expose the site over the internet"),
        }

        // Serve until interrupted.
        loop {
            thread::sleep(Duration::from_secs(60));
        }
    }
}
