use std::slice;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

use log::debug;

use crate::error::SolverError;
use crate::matrix::Matrix;

use super::{jacobi_row, partition_rows, validate_system, validate_workers, SolveOutcome};

/*
  手動パーティション + バリア同期版。

  行範囲 [0, n) を workers 個の連続区間に静的分割し、各ワーカーは
  ソルブ全体を通して同じ区間を担当する (ラウンドごとの再分割はしない)。

  同期パターン:
  - 各ラウンド: 自分の区間を current から読んで next に書く
  - 1回目のランデブー: 全ワーカーの書き込み完了を待つ
  - 代表スレッドだけが残ラウンド数を1減らす
  - 2回目のランデブー: 更新後のカウンタを全員が同じ値で観測してから解放
  - 各ワーカーがロックステップで src/dst の役割を入れ替え、カウンタを再チェック

  カウンタ更新を2回のランデブーで挟むのは、1回だけにすると更新と再チェックが
  競合し、ワーカー数によってはラウンド数がずれるため。
*/

// 生ポインタのラッパー構造体
#[derive(Clone, Copy)]
struct BufferPtr {
    data: *mut f64,
}

// ラッパーに対して Send / Sync を許可する
unsafe impl Send for BufferPtr {}
unsafe impl Sync for BufferPtr {}

impl BufferPtr {
    // メソッド経由でポインタを取得する。
    // これによりクロージャは "dataフィールド" ではなく "BufferPtr構造体(self)" をキャプチャする
    fn as_ptr(self) -> *mut f64 {
        self.data
    }
}

pub fn jacobi_barrier(
    a: &Matrix,
    b: &[f64],
    iterations: usize,
    workers: usize,
) -> Result<SolveOutcome, SolverError> {
    validate_system(a, b)?;

    let n = a.size();
    validate_workers(workers, n)?;

    let mut current = vec![1.0; n];
    let mut next = vec![0.0; n];

    let cur_ptr = BufferPtr { data: current.as_mut_ptr() };
    let next_ptr = BufferPtr { data: next.as_mut_ptr() };

    let barrier = Arc::new(Barrier::new(workers));
    let remaining = Arc::new(AtomicUsize::new(iterations));

    let ranges = partition_rows(n, workers);
    debug!("barrier solver: {workers} workers, partitions {ranges:?}");

    let started = Instant::now();

    thread::scope(|scope| {
        for range in ranges {
            let barrier = Arc::clone(&barrier);
            let remaining = Arc::clone(&remaining);

            scope.spawn(move || {
                let mut src = cur_ptr.as_ptr();
                let mut dst = next_ptr.as_ptr();

                while remaining.load(Ordering::Acquire) > 0 {
                    // SAFETY: src はこのラウンド中誰も書き込まない読み取り専用バッファ
                    // (前ラウンドの書き込みはバリア通過で完了済み)。dst 側の書き込み
                    // 範囲はパーティションごとに互いに素なので &mut が重ならない。
                    let current = unsafe { slice::from_raw_parts(src as *const f64, n) };
                    let mine =
                        unsafe { slice::from_raw_parts_mut(dst.add(range.start), range.len()) };

                    for (k, i) in range.clone().enumerate() {
                        mine[k] = jacobi_row(a, b, current, i);
                    }

                    // 全ワーカーの書き込み完了を待ち、代表スレッドだけが
                    // 残ラウンド数を更新する (1ラウンドにつき1回だけ)
                    if barrier.wait().is_leader() {
                        remaining.fetch_sub(1, Ordering::Release);
                    }

                    // 全員が更新後のカウンタを観測できる状態になってから次ラウンドへ
                    barrier.wait();

                    std::mem::swap(&mut src, &mut dst);
                }
            });
        }
    });

    let elapsed = started.elapsed();

    // ラウンドごとに役割を入れ替えるため、最終結果の置き場所は反復回数の偶奇で決まる
    let x = if iterations % 2 == 0 { current } else { next };

    Ok(SolveOutcome { x, elapsed })
}
