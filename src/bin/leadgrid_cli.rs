//! CLI tool for leadgrid - renders a grid snapshot and outputs the frame as JSON
//!
//! Usage:
//!   leadgrid_cli <snapshot.json>                     # Frame JSON to stdout
//!   leadgrid_cli <snapshot.json> -o out.json         # Frame JSON to file
//!   leadgrid_cli <snapshot.json> --scroll 720 --height 400 --collapse Won -v

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use leadgrid::{DataGrid, GridError};
use simplelog::{Config, LevelFilter, WriteLogger};

const USAGE: &str = "Usage: leadgrid_cli <snapshot.json> [-o output.json] [--scroll PX] [--height PX] [--collapse KEY]... [-v]";

struct Args {
    input: String,
    output: Option<String>,
    scroll: Option<f32>,
    height: Option<f32>,
    collapse: Vec<String>,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        input: String::new(),
        output: None,
        scroll: None,
        height: None,
        collapse: Vec::new(),
        verbose: false,
    };
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{flag} needs a value"))
        };
        match arg.as_str() {
            "-o" | "--output" => parsed.output = Some(value(arg.as_str())?),
            "--scroll" => parsed.scroll = Some(parse_px(arg, &value(arg.as_str())?)?),
            "--height" => parsed.height = Some(parse_px(arg, &value(arg.as_str())?)?),
            "--collapse" => parsed.collapse.push(value(arg.as_str())?),
            "-v" | "--verbose" => parsed.verbose = true,
            flag if flag.starts_with('-') => return Err(format!("unknown flag {flag}")),
            path if parsed.input.is_empty() => parsed.input = path.to_string(),
            extra => return Err(format!("unexpected argument {extra}")),
        }
    }
    if parsed.input.is_empty() {
        return Err("missing snapshot path".to_string());
    }
    Ok(parsed)
}

fn parse_px(flag: &str, raw: &str) -> Result<f32, String> {
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{flag} expects a number of pixels, got {raw}"))
}

fn run(args: &Args) -> Result<String, GridError> {
    let json = fs::read_to_string(&args.input)?;
    let mut grid = DataGrid::from_json(&json)?;
    log::info!(
        "loaded {} columns, {} rows from {}",
        grid.columns().len(),
        grid.rows().len(),
        args.input
    );

    if let Some(height) = args.height {
        let width = grid.viewport().width;
        grid.resize(width, height);
    }
    for key in &args.collapse {
        if !grid.is_group_collapsed(key) {
            grid.toggle_group(key);
        }
    }
    if let Some(scroll) = args.scroll {
        grid.set_scroll(0.0, scroll);
    }

    let frame = grid.render();
    log::info!(
        "window {}..{} of {} items",
        frame.window.start,
        frame.window.end,
        frame.item_count
    );
    Ok(serde_json::to_string_pretty(&frame)?)
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = WriteLogger::init(level, Config::default(), io::stderr());

    let json = match run(&args) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error rendering {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
