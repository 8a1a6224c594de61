use std::mem;
use std::time::Instant;

use log::debug;
use rayon::prelude::*;

use crate::error::SolverError;
use crate::matrix::Matrix;

use super::{jacobi_row, validate_system, validate_workers, SolveOutcome};

/*
  データ並列for版。

  バリアやパーティション境界を自前で管理する代わりに、ラウンドごとに
  rayon の並列イテレータで next 全体を書き切る。並列呼び出しから戻った
  時点で全ワーカーの書き込みが完了している (呼び出し自体が全体バリア) ので、
  役割の入れ替えとラウンドの前進は単一スレッドで行えばよい。

  チャンク分割の戦略は rayon 側の実装詳細であり、このソルバーは関知しない。
*/

pub fn jacobi_parallel_for(
    a: &Matrix,
    b: &[f64],
    iterations: usize,
    workers: usize,
) -> Result<SolveOutcome, SolverError> {
    validate_system(a, b)?;

    let n = a.size();
    validate_workers(workers, n)?;

    // ソルブ専用のプールを作る。グローバルプールを使うと呼び出しごとの
    // ワーカー数指定が効かない
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;
    debug!("parallel-for solver: pool with {workers} threads");

    let mut current = vec![1.0; n];
    let mut next = vec![0.0; n];

    let started = Instant::now();

    pool.install(|| {
        for _ in 0..iterations {
            let read = &current;

            next.par_iter_mut().enumerate().for_each(|(i, slot)| {
                *slot = jacobi_row(a, b, read, i);
            });

            mem::swap(&mut current, &mut next);
        }
    });

    Ok(SolveOutcome {
        x: current,
        elapsed: started.elapsed(),
    })
}
