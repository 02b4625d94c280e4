//! EP-133 Memory Saver - command line front end

use anyhow::Context;
use clap::Parser;
use std::process;
use memsaver::processing::spawn_batch;
use memsaver::{init_logging, Args, Config, ConversionResult};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(args: Args) -> anyhow::Result<i32> {
    if args.verbose {
        println!("{}", memsaver::get_library_info());
        println!();
    }

    if let Some(path) = &args.init_config {
        Config::create_default_config(path)
            .with_context(|| format!("Cannot create {}", path.display()))?;
        println!("Wrote default config to {}", path.display());
        return Ok(0);
    }

    let config = Config::from_args_and_config(args)?;
    let request = config.into_request()?;

    println!("=== EP-133 Memory Saver ===");
    println!("Files: {}", request.inputs.len());
    println!("Output: {}", request.output_dir.display());
    println!("Format: {}", request.target);
    println!("===========================\n");

    let result = spawn_batch(request)?
        .wait(|event| println!("[{}/{}] {}", event.index, event.total, event.file_name))?;

    print_summary(&result);

    if result.is_empty() {
        eprintln!("Warning: no files were converted");
        return Ok(2);
    }
    Ok(0)
}

fn print_summary(result: &ConversionResult) {
    println!("\n=== Conversion Complete ===");
    println!("Converted: {} file(s)", result.converted_count());
    for name in &result.outputs {
        println!("  {}", name);
    }
    for failure in &result.failures {
        println!("Skipped: {} ({})", failure.path.display(), failure.reason);
    }
    println!("Original size: {}", format_size(result.total_original_size));
    println!("Converted size: {}", format_size(result.total_converted_size));
    if let Some(change) = result.size_change_percent() {
        println!("Size change: {:+.1}%", change);
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}
