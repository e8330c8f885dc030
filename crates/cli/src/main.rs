//! Interactive cache hierarchy simulator CLI.
//!
//! This binary wires the core simulator to a small read-eval-print loop. It performs:
//! 1. **Argument parsing:** Geometry as power-of-two exponents (matching how cache
//!    parameters are usually quoted), or a JSON config file via `--config`.
//! 2. **Banner:** A summary of the constructed hierarchy before the prompt appears.
//! 3. **REPL:** Byte-level `read`/`write`, bulk random accesses, cache and memory
//!    dumps, and hit/miss statistics.
//!
//! All user input is validated here; addresses that reach the core are already
//! known to be in range.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use cachesim_core::cache::Cache;
use cachesim_core::common::rng::XorShift64;
use cachesim_core::config::{ReplacementKind, SimConfig, WritePolicy};
use cachesim_core::hierarchy::CacheHierarchy;
use cachesim_core::mem::MainMemory;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    version,
    about = "Simulate the two-level cache hierarchy of a CPU",
    long_about = "Simulate byte-level reads and writes through an L1/L2 cache hierarchy \
backed by a flat main memory.\n\nSize arguments are exponents: MEMORY 16 means a 2^16 byte \
memory. MAPPING 0 selects a direct-mapped cache, MAPPING 2 a 4-way set-associative one.\n\n\
Examples:\n  cachesim 16 8 10 4 1 LRU WB\n  cachesim 16 8 10 4 0 RAND WT --seed 42\n  \
cachesim --config hierarchy.json\n\nAt the prompt, try: read 64, write 64 171, randread 500, \
printl1 0 8, stats, quit."
)]
struct Cli {
    /// Size of main memory in 2^N bytes
    #[arg(value_name = "MEMORY", required_unless_present = "config")]
    memory: Option<u32>,

    /// Size of the L1 cache in 2^N bytes
    #[arg(value_name = "L1CACHE", required_unless_present = "config")]
    l1: Option<u32>,

    /// Size of the L2 cache in 2^N bytes
    #[arg(value_name = "L2CACHE", required_unless_present = "config")]
    l2: Option<u32>,

    /// Size of a block of memory in 2^N bytes
    #[arg(value_name = "BLOCK", required_unless_present = "config")]
    block: Option<u32>,

    /// Mapping policy for the caches in 2^N ways (0 = direct-mapped)
    #[arg(value_name = "MAPPING", required_unless_present = "config")]
    mapping: Option<u32>,

    /// Replacement policy for both cache levels
    #[arg(value_name = "REPLACE", required_unless_present = "config", ignore_case = true)]
    replace: Option<ReplaceArg>,

    /// Write policy for the hierarchy
    #[arg(value_name = "WRITE", required_unless_present = "config", ignore_case = true)]
    write: Option<WriteArg>,

    /// Load the configuration from a JSON file instead of positional arguments
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["memory", "l1", "l2", "block", "mapping", "replace", "write"]
    )]
    config: Option<PathBuf>,

    /// Seed for RAND replacement and the randread/randwrite generators
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

/// Replacement policy names as they appear on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReplaceArg {
    #[value(name = "LRU")]
    Lru,
    #[value(name = "LFU")]
    Lfu,
    #[value(name = "FIFO")]
    Fifo,
    #[value(name = "RAND")]
    Rand,
}

impl From<ReplaceArg> for ReplacementKind {
    fn from(arg: ReplaceArg) -> Self {
        match arg {
            ReplaceArg::Lru => Self::Lru,
            ReplaceArg::Lfu => Self::Lfu,
            ReplaceArg::Fifo => Self::Fifo,
            ReplaceArg::Rand => Self::Rand,
        }
    }
}

/// Write policy names as they appear on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WriteArg {
    #[value(name = "WB")]
    Wb,
    #[value(name = "WT")]
    Wt,
}

impl From<WriteArg> for WritePolicy {
    fn from(arg: WriteArg) -> Self {
        match arg {
            WriteArg::Wb => Self::WriteBack,
            WriteArg::Wt => Self::WriteThrough,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut sim = match CacheHierarchy::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    print_banner(&config);
    run_repl(&mut sim, &config);
}

/// Builds the simulator configuration from the parsed arguments.
///
/// Positional arguments are exponents and get expanded to byte sizes here;
/// `--config` loads a JSON file instead. `--seed` overrides the seed from
/// either source.
fn build_config(cli: &Cli) -> Result<SimConfig, String> {
    if let Some(path) = &cli.config {
        let mut config = SimConfig::from_json_file(path).map_err(|e| e.to_string())?;
        if let Some(seed) = cli.seed {
            config.rng_seed = seed;
        }
        return Ok(config);
    }

    // clap guarantees the positionals are present when --config is absent.
    let config = SimConfig {
        memory_bytes: expand("MEMORY", cli.memory.expect("required by clap"))?,
        l1_bytes: expand("L1CACHE", cli.l1.expect("required by clap"))?,
        l2_bytes: expand("L2CACHE", cli.l2.expect("required by clap"))?,
        block_bytes: expand("BLOCK", cli.block.expect("required by clap"))?,
        ways: expand("MAPPING", cli.mapping.expect("required by clap"))?,
        replacement: cli.replace.expect("required by clap").into(),
        write_policy: cli.write.expect("required by clap").into(),
        rng_seed: cli.seed.unwrap_or_else(|| SimConfig::default().rng_seed),
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Expands an exponent argument to `2^exponent` bytes.
fn expand(name: &str, exponent: u32) -> Result<usize, String> {
    const MAX_EXPONENT: u32 = 32;
    if exponent > MAX_EXPONENT {
        return Err(format!(
            "{name} exponent {exponent} is too large (max {MAX_EXPONENT})"
        ));
    }
    Ok(1usize << exponent)
}

/// Prints the geometry summary shown before the first prompt.
fn print_banner(config: &SimConfig) {
    let mapping = if config.ways == 1 {
        "direct".to_string()
    } else {
        format!("2^{}-way associative", config.ways.trailing_zeros())
    };

    println!();
    println!(
        "Memory size: {} bytes ({} blocks)",
        config.memory_bytes,
        config.num_blocks()
    );
    println!(
        "L1 cache size: {} bytes ({} lines)",
        config.l1_bytes,
        config.l1_bytes / config.block_bytes
    );
    println!(
        "L2 cache size: {} bytes ({} lines)",
        config.l2_bytes,
        config.l2_bytes / config.block_bytes
    );
    println!("Block size: {} bytes", config.block_bytes);
    println!("Mapping policy: {mapping}");
    println!("Replacement policy: {}", replacement_name(config.replacement));
    println!("Write policy: {}", write_policy_name(config.write_policy));
    println!();
}

fn replacement_name(kind: ReplacementKind) -> &'static str {
    match kind {
        ReplacementKind::Lru => "LRU",
        ReplacementKind::Lfu => "LFU",
        ReplacementKind::Fifo => "FIFO",
        ReplacementKind::Rand => "RAND",
    }
}

fn write_policy_name(policy: WritePolicy) -> &'static str {
    match policy {
        WritePolicy::WriteBack => "write-back",
        WritePolicy::WriteThrough => "write-through",
    }
}

/// Runs the interactive loop until `quit` or end of input.
///
/// Unknown commands and wrong argument counts report `invalid command`,
/// unparseable numbers report `incorrect syntax`, and range violations
/// report `out of bounds`. The simulator state is only touched once a
/// command has fully validated.
fn run_repl(sim: &mut CacheHierarchy, config: &SimConfig) {
    let mut rng = XorShift64::new(config.rng_seed);
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().ok();

        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            ["read", addr] => cmd_read(sim, config, addr),
            ["write", addr, byte] => cmd_write(sim, config, addr, byte),
            ["randread", amount] => cmd_randread(sim, config, &mut rng, amount),
            ["randwrite", amount] => cmd_randwrite(sim, config, &mut rng, amount),
            ["printl1", start, amount] => cmd_print_cache(sim.l1(), config, start, amount),
            ["printl2", start, amount] => cmd_print_cache(sim.l2(), config, start, amount),
            ["printmem", start, amount] => cmd_print_mem(sim.memory(), config, start, amount),
            ["stats"] => cmd_stats(sim),
            ["quit", ..] => break,
            _ => println!("\nERROR: invalid command\n"),
        }
    }
}

fn print_syntax_error() {
    println!("\nERROR: incorrect syntax\n");
}

fn print_out_of_bounds() {
    println!("\nERROR: out of bounds\n");
}

/// `read ADDRESS`: reads one byte through the hierarchy.
fn cmd_read(sim: &mut CacheHierarchy, config: &SimConfig, addr: &str) {
    let Ok(addr) = addr.parse::<u64>() else {
        print_syntax_error();
        return;
    };
    if addr >= config.memory_bytes as u64 {
        print_out_of_bounds();
        return;
    }

    let byte = sim.read(addr);
    println!(
        "\nByte 0x{byte:02X} read from {}\n",
        format_addr(addr, config)
    );
}

/// `write ADDRESS BYTE`: writes one byte through the hierarchy.
fn cmd_write(sim: &mut CacheHierarchy, config: &SimConfig, addr: &str, byte: &str) {
    let Ok(addr) = addr.parse::<u64>() else {
        print_syntax_error();
        return;
    };
    let Ok(byte) = byte.parse::<u8>() else {
        print_syntax_error();
        return;
    };
    if addr >= config.memory_bytes as u64 {
        print_out_of_bounds();
        return;
    }

    sim.write(addr, byte);
    println!(
        "\nByte 0x{byte:02X} written to {}\n",
        format_addr(addr, config)
    );
}

/// `randread AMOUNT`: reads that many uniformly random addresses.
fn cmd_randread(sim: &mut CacheHierarchy, config: &SimConfig, rng: &mut XorShift64, amount: &str) {
    let Ok(amount) = amount.parse::<u64>() else {
        print_syntax_error();
        return;
    };

    for _ in 0..amount {
        let addr = rng.next_below(config.memory_bytes as u64);
        sim.read(addr);
    }
    println!("\n{amount} bytes read from memory\n");
}

/// `randwrite AMOUNT`: writes random bytes to that many random addresses.
fn cmd_randwrite(sim: &mut CacheHierarchy, config: &SimConfig, rng: &mut XorShift64, amount: &str) {
    let Ok(amount) = amount.parse::<u64>() else {
        print_syntax_error();
        return;
    };

    for _ in 0..amount {
        let addr = rng.next_below(config.memory_bytes as u64);
        let byte = rng.next_below(256) as u8;
        sim.write(addr, byte);
    }
    println!("\n{amount} bytes written to memory\n");
}

/// `printl1 START AMOUNT` / `printl2 START AMOUNT`: dumps a run of cache lines.
fn cmd_print_cache(cache: &Cache, config: &SimConfig, start: &str, amount: &str) {
    let (Ok(start), Ok(amount)) = (start.parse::<usize>(), amount.parse::<usize>()) else {
        print_syntax_error();
        return;
    };
    let Some(end) = start.checked_add(amount) else {
        print_out_of_bounds();
        return;
    };
    if end > cache.num_lines() {
        print_out_of_bounds();
        return;
    }

    println!();
    for index in start..end {
        let line = cache.line(index);
        let set = index / cache.ways();
        let way = index % cache.ways();
        if line.is_valid() {
            println!(
                "line {index:>4} [set {set:>3} way {way}]  tag {}  {}",
                format_tag(line.tag(), cache, config),
                format_block(line.data())
            );
        } else {
            println!("line {index:>4} [set {set:>3} way {way}]  <invalid>");
        }
    }
    println!();
}

/// `printmem START AMOUNT`: dumps a run of memory blocks.
fn cmd_print_mem(memory: &MainMemory, config: &SimConfig, start: &str, amount: &str) {
    let (Ok(start), Ok(amount)) = (start.parse::<usize>(), amount.parse::<usize>()) else {
        print_syntax_error();
        return;
    };
    let Some(end) = start.checked_add(amount) else {
        print_out_of_bounds();
        return;
    };
    if end > memory.num_blocks() {
        print_out_of_bounds();
        return;
    }

    println!();
    for index in start..end {
        let addr = (index * memory.block_bytes()) as u64;
        println!(
            "block {index:>4} @ {}  {}",
            format_addr(addr, config),
            format_block(memory.block_at(index))
        );
    }
    println!();
}

/// `stats`: prints the hit/miss counters and ratio.
fn cmd_stats(sim: &CacheHierarchy) {
    let stats = sim.stats();
    println!("\nHits: {} | Misses: {}", stats.hits, stats.misses);
    println!("Hit/Miss Ratio: {:.2}%\n", stats.hit_ratio());
}

/// Formats an address as zero-padded binary, wide enough for the memory size.
fn format_addr(addr: u64, config: &SimConfig) -> String {
    let width = config.memory_bytes.trailing_zeros() as usize;
    format!("0b{addr:0width$b}")
}

/// Formats a tag as zero-padded binary, wide enough for this cache's tag field.
fn format_tag(tag: u64, cache: &Cache, config: &SimConfig) -> String {
    let addr_bits = config.memory_bytes.trailing_zeros();
    let field_bits = cache.block_bytes().trailing_zeros() + cache.num_sets().trailing_zeros();
    let width = addr_bits.saturating_sub(field_bits) as usize;
    format!("0b{tag:0width$b}")
}

/// Formats a block payload as space-separated hex bytes.
fn format_block(data: &[u8]) -> String {
    data.iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
