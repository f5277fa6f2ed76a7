use std::io::{self, BufWriter, Write};

use clap::Parser;
use escape_grid::{LogProgress, Sampler, ScoreGrid, Viewport};
use log::debug;

/// Sample the Mandelbrot set over a rectangle of the complex plane and print the
/// escape-time scores, one line per y index.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value_t = -2.0, allow_hyphen_values = true)]
    from_x: f64,

    #[arg(long, default_value_t = 2.0, allow_hyphen_values = true)]
    to_x: f64,

    #[arg(long, default_value_t = -2.0, allow_hyphen_values = true)]
    from_y: f64,

    #[arg(long, default_value_t = 2.0, allow_hyphen_values = true)]
    to_y: f64,

    /// Samples along the x axis. The y step uses the same count.
    #[arg(long, default_value_t = 100)]
    box_count: u32,

    #[arg(long, default_value_t = 100)]
    iterations: u32,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long)]
    sequential: bool,

    /// Zoom toward the centre by this fraction of the extent. Negative values zoom out.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    zoom: f64,

    /// Pan by this fraction of the width.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,

    /// Pan by this fraction of the height.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,
}

impl Args {
    fn viewport(&self) -> escape_grid::Result<Viewport> {
        let mut viewport = Viewport::new(
            self.from_x,
            self.to_x,
            self.from_y,
            self.to_y,
            self.box_count,
        )?;
        if self.zoom != 0.0 {
            viewport = viewport.zoom(self.zoom)?;
        }
        if self.pan_x != 0.0 || self.pan_y != 0.0 {
            viewport = viewport.pan(self.pan_x, self.pan_y)?;
        }
        Ok(viewport)
    }
}

fn write_grid(out: &mut impl Write, grid: &ScoreGrid) -> io::Result<()> {
    for j in 0..grid.rows() {
        for i in 0..grid.columns() {
            if i > 0 {
                out.write_all(b" ")?;
            }
            write!(out, "{:.4}", grid[(i, j)])?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    debug!("{:?}", args);

    let threads = args.threads.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;

    let viewport = args.viewport()?;
    debug!("viewport {:?}", viewport);

    let grid = Sampler::new(args.iterations)
        .parallel(!args.sequential)
        .with_progress(&LogProgress)
        .sample(&viewport)?;

    let stdout = io::stdout();
    write_grid(&mut BufWriter::new(stdout.lock()), &grid)?;

    Ok(())
}
