use std::ops::{Index, IndexMut};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const COEFF_MIN: f64 = -128.0; // 係数の下限
pub const COEFF_MAX: f64 = 128.0; // 係数の上限
pub const DEFAULT_SEED: u64 = 42; // デフォルトの乱数シード
pub const DEFAULT_ITERATIONS: usize = 1000; // デフォルトの反復回数

/// 行優先の1次元Vecで保持する正方行列。
/// 構築後のリサイズは不可。(row, col) アクセスは O(1)。
#[derive(Clone, Debug)]
pub struct Matrix {
    size: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn new(size: usize) -> Self {
        Matrix {
            size,
            data: vec![0.0; size * size],
        }
    }

    pub fn filled(size: usize, value: f64) -> Self {
        Matrix {
            size,
            data: vec![value; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    // 範囲外アクセスは呼び出し側の誤りなので、スライス側のpanicに任せる
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row * self.size + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.size + col]
    }
}

/// 係数行列の生成パターン
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixKind {
    /// 全要素を一様乱数で埋める（対角成分が0になり得る点に注意）
    Uniform,
    /// 対角優位: 対角成分 = 行の非対角成分の絶対値和 + 正のマージン。
    /// Jacobi法が収束する入力を作るためのパターン。
    DiagonallyDominant,
}

pub fn generate_matrix(size: usize, kind: MatrixKind, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut matrix = Matrix::new(size);

    match kind {
        MatrixKind::Uniform => {
            for i in 0..size {
                for j in 0..size {
                    matrix[(i, j)] = rng.random_range(COEFF_MIN..COEFF_MAX);
                }
            }
        }
        MatrixKind::DiagonallyDominant => {
            for i in 0..size {
                let mut row_sum = 0.0;

                for j in 0..size {
                    if j != i {
                        let cell = rng.random_range(COEFF_MIN..COEFF_MAX);
                        matrix[(i, j)] = cell;
                        row_sum += cell.abs();
                    }
                }

                matrix[(i, i)] = row_sum + rng.random_range(1.0..COEFF_MAX);
            }
        }
    }

    matrix
}

pub fn generate_vector(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|_| rng.random_range(COEFF_MIN..COEFF_MAX))
        .collect()
}
