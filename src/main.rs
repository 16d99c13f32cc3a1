//! Benchmark runner for the six loop orders.
//!
//! ```text
//! matmul-loops [M P N | SIZE] [--trials T] [--layout row|col]
//!              [--threads N] [--orders ijk,jki,...] [--seed S]
//! ```
//!
//! Without sizes it sweeps 128, 256 and 512 square matrices.

use matmul_loops::alloc_counter::CountingAllocator;
use matmul_loops::{
    BenchConfig, BenchmarkRunner, Error, ExecutionMode, Layout, LoopOrder, Result, format_summary,
    format_table,
};
use std::process::ExitCode;
use std::str::FromStr;

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

const DEFAULT_SIZES: [usize; 3] = [128, 256, 512];

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let configs = parse_args(args)?;

    println!("=== Loop Order Benchmark ===\n");

    for config in configs {
        let runner = BenchmarkRunner::new(config)?;
        let cfg = runner.config();

        println!(
            "A: {}×{}  B: {}×{}  layout={}  mode={}  trials={}",
            cfg.m, cfg.p, cfg.p, cfg.n, cfg.layout, cfg.mode, cfg.trials
        );
        println!("{}", "-".repeat(50));

        let results = runner.run()?;
        print!("{}", format_table(&results));
        println!();
        print!("{}", format_summary(&results));
        println!("{}\n", "=".repeat(50));
    }

    println!("GFLOPS at median time. Speedup relative to the slowest order.");
    println!("unit-str: innermost loop walks every array with stride 1.\n");
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Vec<BenchConfig>> {
    let mut sizes: Vec<usize> = Vec::new();
    let mut trials: Option<usize> = None;
    let mut layout = Layout::ColMajor;
    let mut mode = ExecutionMode::Sequential;
    let mut orders = None;
    let mut seed = None;

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--trials" => trials = Some(parse_num(flag_value(&mut it, arg)?, arg)?),
            "--threads" => {
                let threads = parse_num(flag_value(&mut it, arg)?, arg)?;
                mode = ExecutionMode::Parallel { threads };
            }
            "--layout" => {
                layout = match flag_value(&mut it, arg)? {
                    "row" | "row-major" => Layout::RowMajor,
                    "col" | "col-major" => Layout::ColMajor,
                    other => return Err(invalid(format!("unknown layout '{other}'"))),
                }
            }
            "--orders" => {
                let list = flag_value(&mut it, arg)?
                    .split(',')
                    .map(str::parse::<LoopOrder>)
                    .collect::<Result<Vec<_>>>()?;
                orders = Some(list);
            }
            "--seed" => seed = Some(parse_num::<u64>(flag_value(&mut it, arg)?, arg)?),
            value => sizes.push(parse_num(value, "size")?),
        }
    }

    let shapes: Vec<(usize, usize, usize)> = match sizes.as_slice() {
        [] => DEFAULT_SIZES.iter().map(|&s| (s, s, s)).collect(),
        &[s] => vec![(s, s, s)],
        &[m, p, n] => vec![(m, p, n)],
        _ => return Err(invalid("expected either SIZE or M P N".to_string())),
    };

    Ok(shapes
        .into_iter()
        .map(|(m, p, n)| {
            let mut config = BenchConfig::new(m, p, n).with_layout(layout).with_mode(mode);
            if let Some(t) = trials {
                config = config.with_trials(t);
            }
            if let Some(o) = &orders {
                config = config.with_orders(o.clone());
            }
            if let Some(s) = seed {
                config = config.with_seed(s);
            }
            config
        })
        .collect())
}

fn flag_value<'a>(it: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a str> {
    it.next()
        .map(String::as_str)
        .ok_or_else(|| invalid(format!("{flag} needs a value")))
}

fn parse_num<T: FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| invalid(format!("{what}: '{value}' is not a non-negative integer")))
}

fn invalid(reason: String) -> Error {
    Error::InvalidConfiguration {
        reason: reason.into(),
    }
}
