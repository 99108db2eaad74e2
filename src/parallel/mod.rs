//! Worker pool for the embarrassingly parallel stages.
//!
//! Basis reconstruction and reduced-matrix columns are independent units of
//! work over read-only shared data. With the `rayon` feature they run on
//! either a dedicated pool (when a thread count is configured) or the global
//! rayon pool; without it they run serially on the calling thread.

use crate::error::Result;
#[cfg(feature = "rayon")]
use crate::error::PodError;

pub struct WorkerPool {
    #[cfg(feature = "rayon")]
    pool: Option<rayon::ThreadPool>,
}

impl WorkerPool {
    /// Runs work on the global rayon pool.
    pub fn global() -> Self {
        Self {
            #[cfg(feature = "rayon")]
            pool: None,
        }
    }

    /// `None` defers to the global pool.
    pub fn new(num_threads: Option<usize>) -> Result<Self> {
        #[cfg(feature = "rayon")]
        {
            let pool = match num_threads {
                Some(n) => Some(
                    rayon::ThreadPoolBuilder::new()
                        .num_threads(n)
                        .build()
                        .map_err(|e| PodError::ThreadPool(e.to_string()))?,
                ),
                None => None,
            };
            Ok(Self { pool })
        }
        #[cfg(not(feature = "rayon"))]
        {
            let _ = num_threads;
            Ok(Self {})
        }
    }

    /// Number of workers that will run a `for_each_mut` call.
    pub fn size(&self) -> usize {
        #[cfg(feature = "rayon")]
        {
            match &self.pool {
                Some(pool) => pool.current_num_threads(),
                None => rayon::current_num_threads(),
            }
        }
        #[cfg(not(feature = "rayon"))]
        {
            1
        }
    }

    /// Run `f(index, slot)` once for every slot. Slots are disjoint, so each
    /// worker owns its output exclusively.
    pub fn for_each_mut<S, F>(&self, slots: &mut [S], f: F)
    where
        S: Send,
        F: Fn(usize, &mut S) + Send + Sync,
    {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            let mut run = || slots.par_iter_mut().enumerate().for_each(|(i, s)| f(i, s));
            match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }
        }
        #[cfg(not(feature = "rayon"))]
        {
            slots.iter_mut().enumerate().for_each(|(i, s)| f(i, s));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slot_is_visited_once() {
        let pool = WorkerPool::new(Some(2)).unwrap();
        let mut slots = vec![0usize; 17];
        pool.for_each_mut(&mut slots, |i, s| *s += i * i);
        assert_eq!(slots, (0..17).map(|i| i * i).collect::<Vec<_>>());
        assert!(pool.size() >= 1);
    }

    #[test]
    fn global_pool_is_default() {
        let pool = WorkerPool::global();
        let mut slots = vec![1.0f64; 4];
        pool.for_each_mut(&mut slots, |_, s| *s *= 2.0);
        assert_eq!(slots, vec![2.0; 4]);
    }
}
