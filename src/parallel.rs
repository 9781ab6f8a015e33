//! Optional data parallelism over independent jobs.
//!
//! With the `parallel` feature and `parallel = true`, jobs run on the rayon
//! global pool. Output order always matches input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
pub(crate) fn map_jobs<T, U, F>(jobs: &[T], parallel: bool, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    if parallel {
        jobs.par_iter().map(f).collect()
    } else {
        jobs.iter().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_jobs<T, U, F>(jobs: &[T], _parallel: bool, f: F) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    jobs.iter().map(f).collect()
}
