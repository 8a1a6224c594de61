use std::mem;
use std::time::Instant;

use crate::error::SolverError;
use crate::matrix::Matrix;

use super::{jacobi_row, validate_system, SolveOutcome};

/*
  逐次版Jacobi法。

  current (全要素1.0で初期化) と next (全要素0.0) の2本のバッファを持ち、
  1スイープごとに役割を入れ替える。収束判定はせず、指定された回数だけ
  反復して終了する。この実装の数値結果が並列版の基準値になる。
*/

pub fn jacobi_sequential(
    a: &Matrix,
    b: &[f64],
    iterations: usize,
) -> Result<SolveOutcome, SolverError> {
    validate_system(a, b)?;

    let n = a.size();
    let mut current = vec![1.0; n];
    let mut next = vec![0.0; n];

    let started = Instant::now();

    for _ in 0..iterations {
        for i in 0..n {
            next[i] = jacobi_row(a, b, &current, i);
        }

        // スイープ内で書き込んだ値は次のスイープから読む (二重バッファ)
        mem::swap(&mut current, &mut next);
    }

    Ok(SolveOutcome {
        x: current,
        elapsed: started.elapsed(),
    })
}
