//! simon_says — interactive entry point.

use simon_says::app::{parse_args, run};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║         Simon Says — Gesture-Controlled Memory Game          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hand tracking");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let cfg = match parse_args(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            println!();
            print_usage();
            std::process::exit(2);
        }
    };

    println!("  Opening game window…");
    println!("  Watch the sequence, then hold each gesture until it confirms.");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("  Usage: simon_says [--seed N] [--timeout SECONDS] [--stable FRAMES]");
    println!();
    println!("    --seed N           fix the RNG so the same sequence comes up every run");
    println!("    --timeout SECONDS  per-gesture answer budget (default 6)");
    println!("    --stable FRAMES    consecutive frames a gesture must be held (default 7)");
}
