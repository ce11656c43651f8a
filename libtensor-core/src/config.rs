use std::env;

use crate::{Context, Error, Result};

/// Environment variable overriding the default thread count.
pub const NUM_THREADS_ENV: &str = "LIBTENSOR_NUM_THREADS";

/// How many threads the parallel loops of `map`, `resize` and `conv2d` may use.
///
/// Those loops run on whichever rayon pool is current. Outside of
/// [`Parallelism::install`] that is the global pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    /// Run everything on the calling thread.
    None,
    /// Run on a pool of this many threads.
    Rayon(usize),
}

impl Parallelism {
    pub fn with_threads(n: usize) -> Self {
        if n > 1 {
            Self::Rayon(n)
        } else {
            Self::None
        }
    }

    /// Read [`NUM_THREADS_ENV`], falling back to one thread per logical CPU.
    pub fn from_env() -> Result<Self> {
        match env::var(NUM_THREADS_ENV) {
            Ok(value) => Self::parse(&value),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(e).context(NUM_THREADS_ENV),
        }
    }

    /// Parse a thread count. `0` selects the default.
    pub fn parse(value: &str) -> Result<Self> {
        let n: usize = value.trim().parse().map_err(|e| {
            Error::msg(format!("{NUM_THREADS_ENV}: invalid thread count {value:?}: {e}"))
        })?;
        if n == 0 {
            return Ok(Self::default());
        }
        Ok(Self::with_threads(n))
    }

    pub fn num_threads(&self) -> usize {
        match *self {
            Self::None => 1,
            Self::Rayon(n) => n.max(1),
        }
    }

    /// Run `f` inside a dedicated pool sized by `self`.
    pub fn install<R, F>(&self, f: F) -> Result<R>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        let threads = self.num_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("failed to build thread pool")?;
        tracing::debug!(threads, "installing thread pool");
        Ok(pool.install(f))
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::with_threads(num_cpus::get())
    }
}
