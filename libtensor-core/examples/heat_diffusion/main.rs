//! Explicit heat equation on a square plate with a hot spot in the middle.
//!
//! Run with `RUST_LOG=debug` to see the per-call spans of the library.

use libtensor_core::{conv2d, Parallelism, Result, Tensor};
use tracing_subscriber::EnvFilter;

const SIZE: usize = 64;
const STEPS: usize = 200;
const DIFFUSIVITY: f64 = 0.2;

fn laplacian() -> Tensor<f64, 2> {
    let mut f = Tensor::zeros([3, 3]);
    f[0][1] = 1.0;
    f[1][0] = 1.0;
    f[1][1] = -4.0;
    f[1][2] = 1.0;
    f[2][1] = 1.0;
    f
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let parallelism = Parallelism::from_env()?;
    tracing::info!(threads = parallelism.num_threads(), "starting");

    let filter = laplacian();
    let mut u = Tensor::<f64, 2>::zeros([SIZE, SIZE]);
    for row in u.iter_mut().skip(SIZE / 2 - 4).take(8) {
        for v in row.iter_mut().skip(SIZE / 2 - 4).take(8) {
            *v = 100.0;
        }
    }
    let mut lap = Tensor::like(&u);

    parallelism.install(|| -> Result<()> {
        for step in 0..STEPS {
            conv2d(&u, &filter, &mut lap)?;
            u.map(|r: &mut f64, l: &f64| *r += DIFFUSIVITY * l, [&lap]);
            if step % 50 == 0 {
                tracing::info!(step, centre = u[SIZE / 2][SIZE / 2], "progress");
            }
        }
        Ok(())
    })??;

    let peak = u
        .iter()
        .flat_map(|row| row.iter().copied())
        .fold(f64::MIN, f64::max);
    println!("after {STEPS} steps: peak {peak:.3}, centre {:.3}", u[SIZE / 2][SIZE / 2]);
    Ok(())
}
