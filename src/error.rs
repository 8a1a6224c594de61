use thiserror::Error;

/// ソルバー入力の検証エラー。
/// いずれもワーカー起動前に検出して即座に失敗させる（途中結果は作らない）。
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("worker count {workers} exceeds matrix size {size}")]
    TooManyWorkers { workers: usize, size: usize },

    #[error("matrix is {size}x{size} but rhs vector has length {len}")]
    DimensionMismatch { size: usize, len: usize },

    #[error("zero diagonal entry at row {row}")]
    ZeroDiagonal { row: usize },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
