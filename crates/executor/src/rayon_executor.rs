//! Work-stealing executor backed by rayon's global thread pool.

use rayon::prelude::*;
use stencil_traits::Executor;

/// Executor that fans items out over rayon's global pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct RayonExecutor;

impl RayonExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for RayonExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        items.into_par_iter().map(f).collect()
    }

    fn execute_all_fallible<T, R, E, F>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + Clone + 'static,
    {
        items.into_par_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        rayon::current_num_threads()
    }

    fn name(&self) -> &'static str {
        "RayonExecutor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rayon_executor_preserves_order() {
        let executor = RayonExecutor::new();
        let results = executor.execute_all((0..64).collect(), |x| x * x);
        let expected: Vec<i32> = (0..64).map(|x| x * x).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_rayon_executor_fallible_keeps_errors_in_place() {
        let executor = RayonExecutor::new();
        let results: Vec<Result<i32, String>> =
            executor.execute_all_fallible(vec![1, 2, 3], |x| {
                if x % 2 == 0 {
                    Err(format!("even: {x}"))
                } else {
                    Ok(x)
                }
            });
        assert!(results[0].is_ok());
        assert_eq!(results[1].as_ref().unwrap_err(), "even: 2");
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_rayon_executor_parallelism_positive() {
        assert!(RayonExecutor::new().parallelism() >= 1);
    }
}
