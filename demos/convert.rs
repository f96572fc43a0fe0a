//! Converts a decimal number to IEEE-754 and explains the encoding.
//!  cargo run --example convert -- 0.1 32
//! Set FLOATCODEC_LOG=trace to see the log.

use floatcodec::{convert, Precision};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

fn init_tracing() {
    const ENV: &str = "FLOATCODEC_LOG";
    let filter = match std::env::var(ENV) {
        Ok(filter) => EnvFilter::new(filter),
        _ => return,
    };
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let subscriber = tracing_subscriber::Registry::default()
        .with(filter)
        .with(layer);
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Could not install the logger: {}", err);
    }
}

fn main() {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let text = args.next().unwrap_or_default();
    let precision = args.next().unwrap_or_else(|| "32".to_string());

    let precision: Precision = match precision.parse() {
        Ok(p) => p,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    let conv = match convert(&text, precision) {
        Ok(conv) => conv,
        Err(err) => {
            eprintln!("Please enter a valid decimal number: {}", err);
            std::process::exit(1);
        }
    };

    println!("Binary:   {}", conv.binary());
    println!("Hex:      {}", conv.hex());
    println!("Sign:     {}", conv.sign_bit());
    println!("Exponent: {}", conv.exponent_bits());
    println!("Mantissa: {}", conv.mantissa_bits());
    println!();
    for step in conv.explain() {
        println!("{}", step);
    }
}
