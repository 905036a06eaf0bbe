use rayon::prelude::*;

/// Number of pixels from which [`ExecutionStrategy::Auto`] runs in parallel.
pub const AUTO_PARALLEL_MIN_PIXELS: usize = 100_000;

/// Controls how per-pixel operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    Parallel,

    /// Parallel for images with at least [`AUTO_PARALLEL_MIN_PIXELS`] pixels, serial otherwise.
    #[default]
    Auto,
}

impl ExecutionStrategy {
    /// Whether an operation over `num_pixels` pixels should run in parallel.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => num_pixels >= AUTO_PARALLEL_MIN_PIXELS,
        }
    }
}

/// Apply a function to each row of a buffer, passing the row index.
///
/// # Arguments
///
/// * `dst` - The destination buffer, split in rows of `row_len` elements.
/// * `row_len` - The row stride (width * channels).
/// * `strategy` - The execution strategy.
/// * `f` - The function receiving the row index and the mutable row.
pub fn for_each_row_mut<T: Send>(
    dst: &mut [T],
    row_len: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) {
    if row_len == 0 {
        return;
    }

    if strategy.is_parallel(dst.len()) {
        dst.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    } else {
        dst.chunks_mut(row_len)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    }
}

/// Apply a function to each pixel of two sources and one destination.
///
/// PRECONDITION: `src1`, `src2` and `dst` have the same length.
pub fn for_each_pixel_two<T1, T2, T3>(
    src1: &[T1],
    src2: &[T2],
    dst: &mut [T3],
    strategy: ExecutionStrategy,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) where
    T1: Sync,
    T2: Sync,
    T3: Send,
{
    if strategy.is_parallel(dst.len()) {
        src1.par_iter()
            .zip(src2.par_iter())
            .zip(dst.par_iter_mut())
            .for_each(|((a, b), out)| f(a, b, out));
    } else {
        src1.iter()
            .zip(src2.iter())
            .zip(dst.iter_mut())
            .for_each(|((a, b), out)| f(a, b, out));
    }
}
