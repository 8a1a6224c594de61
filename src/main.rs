use std::fs::File;
use std::io::{self, Write};
use std::str::FromStr;
use std::time::Duration;

use log::info;

use jacobi_linsolve::error::SolverError;
use jacobi_linsolve::implementations::barrier_parallel::jacobi_barrier;
use jacobi_linsolve::implementations::parallel_for::jacobi_parallel_for;
use jacobi_linsolve::implementations::sequential::jacobi_sequential;
use jacobi_linsolve::matrix::{
    generate_matrix, generate_vector, Matrix, MatrixKind, DEFAULT_ITERATIONS, DEFAULT_SEED,
};

const BENCH_TRIALS: usize = 15;
const BENCH_WARMUP: usize = 3;
const EPSILON: f64 = 1e-10;

struct BenchConfig {
    size: usize,
    workers: usize,
    iterations: usize,
    seed: u64,
    csv: Option<String>,
}

struct BenchRecord {
    name: &'static str,
    trial: usize,
    duration: Duration,
}

fn main() {
    env_logger::init();

    let config = parse_args();

    println!("=== Jacobi法 線形システムベンチマーク ===");
    println!(
        "サイズ: {}, 反復回数: {}, ワーカー数: {}, シード: {}, 測定回数: {}\n",
        config.size, config.iterations, config.workers, config.seed, BENCH_TRIALS
    );

    info!(
        "generating {}x{} diagonally dominant system (seed {})",
        config.size, config.size, config.seed
    );
    let a = generate_matrix(config.size, MatrixKind::DiagonallyDominant, config.seed);
    let b = generate_vector(config.size, config.seed);

    // 逐次版の解を基準値とし、各並列版の結果を測定前に突き合わせる
    let reference = jacobi_sequential(&a, &b, config.iterations)
        .expect("sequential solver rejected generated input")
        .x;

    verify_against_reference("Barrier", &reference, &a, &b, &config, |a, b, c| {
        jacobi_barrier(a, b, c.iterations, c.workers).map(|o| o.x)
    });
    verify_against_reference("ParallelFor", &reference, &a, &b, &config, |a, b, c| {
        jacobi_parallel_for(a, b, c.iterations, c.workers).map(|o| o.x)
    });
    println!();

    let mut records = Vec::new();

    let seq_median = run_benchmark("Sequential", &mut records, || {
        jacobi_sequential(&a, &b, config.iterations)
            .expect("sequential solver rejected generated input")
            .elapsed
    });

    let barrier_median = run_benchmark("Barrier", &mut records, || {
        jacobi_barrier(&a, &b, config.iterations, config.workers)
            .expect("barrier solver rejected validated configuration")
            .elapsed
    });

    let rayon_median = run_benchmark("ParallelFor", &mut records, || {
        jacobi_parallel_for(&a, &b, config.iterations, config.workers)
            .expect("parallel-for solver rejected validated configuration")
            .elapsed
    });

    println!("スピードアップ (対 逐次版・中央値):");
    println!("  Barrier:     {:.2}x", speedup(seq_median, barrier_median));
    println!("  ParallelFor: {:.2}x", speedup(seq_median, rayon_median));

    if let Some(path) = &config.csv {
        if let Err(e) = export_csv(path, &records) {
            eprintln!("エラー: CSV出力に失敗しました: {e}");
            std::process::exit(1);
        }
        println!("\n試行結果を {path} に出力しました");
    }

    println!("\n=== ベンチマーク完了 ===");
}

// コマンドライン引数: [サイズ] [ワーカー数] [反復回数] [シード] [CSVパス]
fn parse_args() -> BenchConfig {
    let args: Vec<String> = std::env::args().collect();

    let size = parse_at(&args, 1, 128, "サイズ");
    let workers = parse_at(&args, 2, 2, "ワーカー数");
    let iterations = parse_at(&args, 3, DEFAULT_ITERATIONS, "反復回数");
    let seed = parse_at(&args, 4, DEFAULT_SEED, "シード");
    let csv = args.get(5).cloned();

    if size < 1 {
        eprintln!("エラー: サイズは1以上である必要があります");
        std::process::exit(1);
    }

    if workers < 1 || workers > size {
        eprintln!("エラー: ワーカー数は1以上かつサイズ以下である必要があります");
        std::process::exit(1);
    }

    BenchConfig { size, workers, iterations, seed, csv }
}

fn parse_at<T: FromStr>(args: &[String], index: usize, default: T, label: &str) -> T {
    match args.get(index) {
        None => default,
        Some(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            eprintln!("エラー: {label}は非負の整数である必要があります");
            std::process::exit(1);
        }),
    }
}

fn verify_against_reference<F>(
    name: &str,
    reference: &[f64],
    a: &Matrix,
    b: &[f64],
    config: &BenchConfig,
    solve: F,
) where
    F: Fn(&Matrix, &[f64], &BenchConfig) -> Result<Vec<f64>, SolverError>,
{
    let x = solve(a, b, config).unwrap_or_else(|e| {
        eprintln!("エラー: {name} ソルバーが失敗しました: {e}");
        std::process::exit(1);
    });

    let max_diff = x
        .iter()
        .zip(reference)
        .map(|(l, r)| (l - r).abs())
        .fold(0.0_f64, f64::max);

    if max_diff > EPSILON {
        eprintln!("エラー: {name} の結果が逐次版と一致しません (最大誤差 {max_diff:e})");
        std::process::exit(1);
    }

    println!("✓ {name} の結果が逐次版と一致");
}

fn run_benchmark<F>(name: &'static str, records: &mut Vec<BenchRecord>, mut bench_fn: F) -> Duration
where
    F: FnMut() -> Duration,
{
    println!("{}:", name);

    // ウォームアップ
    for _ in 0..BENCH_WARMUP {
        bench_fn();
        std::thread::sleep(Duration::from_millis(100));
    }

    // 本番計測
    let mut times = Vec::with_capacity(BENCH_TRIALS);
    for i in 0..BENCH_TRIALS {
        // キャッシュクリア（疑似的）
        let _dummy: Vec<u8> = vec![0; 5 * 1024 * 1024];

        let duration = bench_fn();
        times.push(duration);
        records.push(BenchRecord {
            name,
            trial: i + 1,
            duration,
        });
        println!("  試行 {:2}: {:?}", i + 1, duration);

        std::thread::sleep(Duration::from_millis(50));
    }

    // 統計計算
    times.sort();
    let median = times[BENCH_TRIALS / 2];
    let avg = times.iter().sum::<Duration>() / BENCH_TRIALS as u32;
    let min = times[0];
    let max = times[BENCH_TRIALS - 1];

    println!("  ---");
    println!("  最小値:   {:?}", min);
    println!("  中央値:   {:?}", median);
    println!("  平均値:   {:?}", avg);
    println!("  最大値:   {:?}", max);
    println!();

    median
}

fn speedup(baseline: Duration, candidate: Duration) -> f64 {
    baseline.as_secs_f64() / candidate.as_secs_f64()
}

fn export_csv(path: &str, records: &[BenchRecord]) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "implementation,trial,microseconds")?;

    for record in records {
        writeln!(
            file,
            "{},{},{}",
            record.name,
            record.trial,
            record.duration.as_micros()
        )?;
    }

    Ok(())
}
