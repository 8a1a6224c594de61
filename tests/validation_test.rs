use jacobi_linsolve::error::SolverError;
use jacobi_linsolve::implementations::barrier_parallel::jacobi_barrier;
use jacobi_linsolve::implementations::parallel_for::jacobi_parallel_for;
use jacobi_linsolve::implementations::partition_rows;
use jacobi_linsolve::implementations::sequential::jacobi_sequential;
use jacobi_linsolve::matrix::{generate_matrix, generate_vector, Matrix, MatrixKind};

const TEST_SEED: u64 = 42;

/// 対角優位な 8x8 の係数行列と右辺ベクトル
fn small_system() -> (Matrix, Vec<f64>) {
    let a = generate_matrix(8, MatrixKind::DiagonallyDominant, TEST_SEED);
    let b = generate_vector(8, TEST_SEED);
    (a, b)
}

#[test]
fn test_zero_workers_rejected() {
    let (a, b) = small_system();

    // ワーカー0は構成エラー。スレッドを起動する前に弾かれる
    let barrier = jacobi_barrier(&a, &b, 10, 0);
    assert!(
        matches!(barrier, Err(SolverError::NoWorkers)),
        "Barrier solver accepted zero workers"
    );

    let parallel = jacobi_parallel_for(&a, &b, 10, 0);
    assert!(
        matches!(parallel, Err(SolverError::NoWorkers)),
        "Parallel-for solver accepted zero workers"
    );

    println!("✓ Zero workers: rejected before any computation!");
}

#[test]
fn test_oversized_worker_count_rejected() {
    let (a, b) = small_system();

    let barrier = jacobi_barrier(&a, &b, 10, 9);
    assert!(
        matches!(
            barrier,
            Err(SolverError::TooManyWorkers { workers: 9, size: 8 })
        ),
        "Barrier solver accepted more workers than rows"
    );

    let parallel = jacobi_parallel_for(&a, &b, 10, 9);
    assert!(
        matches!(
            parallel,
            Err(SolverError::TooManyWorkers { workers: 9, size: 8 })
        ),
        "Parallel-for solver accepted more workers than rows"
    );

    println!("✓ Oversized worker count: rejected!");
}

#[test]
fn test_dimension_mismatch_rejected() {
    let (a, _) = small_system();
    let short_b = vec![1.0; 7];

    assert!(
        matches!(
            jacobi_sequential(&a, &short_b, 10),
            Err(SolverError::DimensionMismatch { size: 8, len: 7 })
        ),
        "Sequential solver accepted a mismatched rhs"
    );
    assert!(
        matches!(
            jacobi_barrier(&a, &short_b, 10, 2),
            Err(SolverError::DimensionMismatch { .. })
        ),
        "Barrier solver accepted a mismatched rhs"
    );
    assert!(
        matches!(
            jacobi_parallel_for(&a, &short_b, 10, 2),
            Err(SolverError::DimensionMismatch { .. })
        ),
        "Parallel-for solver accepted a mismatched rhs"
    );

    println!("✓ Dimension mismatch: rejected by all solvers!");
}

#[test]
fn test_zero_diagonal_rejected() {
    let (mut a, b) = small_system();
    a[(3, 3)] = 0.0;

    assert!(
        matches!(
            jacobi_sequential(&a, &b, 10),
            Err(SolverError::ZeroDiagonal { row: 3 })
        ),
        "Sequential solver accepted a zero diagonal"
    );
    assert!(
        matches!(
            jacobi_barrier(&a, &b, 10, 2),
            Err(SolverError::ZeroDiagonal { row: 3 })
        ),
        "Barrier solver accepted a zero diagonal"
    );
    assert!(
        matches!(
            jacobi_parallel_for(&a, &b, 10, 2),
            Err(SolverError::ZeroDiagonal { row: 3 })
        ),
        "Parallel-for solver accepted a zero diagonal"
    );

    println!("✓ Zero diagonal: rejected by all solvers!");
}

#[test]
fn test_partition_coverage() {
    // 分割は連続・互いに素で [0, n) を過不足なく覆う。
    // 末尾のパーティションが余りを引き受ける
    for (n, workers) in [
        (1, 1),
        (8, 1),
        (8, 2),
        (8, 3),
        (8, 8),
        (13, 4),
        (100, 7),
        (1000, 16),
    ] {
        let ranges = partition_rows(n, workers);

        assert_eq!(ranges.len(), workers, "n={} workers={}", n, workers);

        let delta = n / workers;
        let mut expected_start = 0;

        for (w, range) in ranges.iter().enumerate() {
            assert_eq!(
                range.start, expected_start,
                "Gap or overlap at partition {} for n={} workers={}",
                w, n, workers
            );

            if w < workers - 1 {
                assert_eq!(
                    range.len(),
                    delta,
                    "Non-tail partition {} has wrong width for n={} workers={}",
                    w,
                    n,
                    workers
                );
            }

            expected_start = range.end;
        }

        assert_eq!(
            expected_start, n,
            "Partitions do not cover [0, {}) for {} workers",
            n, workers
        );
    }

    println!("✓ Partition coverage: disjoint ranges covering [0, n)!");
}

#[test]
fn test_generator_determinism() {
    let size = 16;

    let a1 = generate_matrix(size, MatrixKind::DiagonallyDominant, TEST_SEED);
    let a2 = generate_matrix(size, MatrixKind::DiagonallyDominant, TEST_SEED);
    let a3 = generate_matrix(size, MatrixKind::DiagonallyDominant, TEST_SEED + 1);

    let mut same_seed_equal = true;
    let mut other_seed_differs = false;

    for i in 0..size {
        for j in 0..size {
            if a1[(i, j)] != a2[(i, j)] {
                same_seed_equal = false;
            }
            if a1[(i, j)] != a3[(i, j)] {
                other_seed_differs = true;
            }
        }
    }

    assert!(same_seed_equal, "Same seed produced different matrices");
    assert!(other_seed_differs, "Different seed produced the same matrix");

    let b1 = generate_vector(size, TEST_SEED);
    let b2 = generate_vector(size, TEST_SEED);
    assert_eq!(b1, b2, "Same seed produced different vectors");

    println!("✓ Generator determinism: seed fully determines the system!");
}

#[test]
fn test_generated_matrix_is_diagonally_dominant() {
    let size = 32;
    let a = generate_matrix(size, MatrixKind::DiagonallyDominant, TEST_SEED);

    for i in 0..size {
        let mut off_diagonal_sum = 0.0;
        for j in 0..size {
            if j != i {
                off_diagonal_sum += a[(i, j)].abs();
            }
        }

        assert!(
            a[(i, i)] > off_diagonal_sum,
            "Row {} is not diagonally dominant: diag {} vs off-diagonal sum {}",
            i,
            a[(i, i)],
            off_diagonal_sum
        );
    }

    println!("✓ Diagonal dominance: holds for every generated row!");
}
