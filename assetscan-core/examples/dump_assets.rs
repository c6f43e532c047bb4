//! Print the assets of an HTML file (or stdin) as JSON lines.
//!
//! ```text
//! cargo run --example dump_assets --features serde -- page.html [import-attribute]
//! ```

use std::io::Read;

use assetscan_core::{scan, AssetEvent, ScanConfig};

fn main() {
    let mut args = std::env::args().skip(1);
    let mut input = Vec::new();
    match args.next() {
        Some(path) if path != "-" => input = std::fs::read(&path).unwrap(),
        _ => {
            std::io::stdin().read_to_end(&mut input).unwrap();
        }
    }

    let mut config = ScanConfig::default();
    if let Some(attribute) = args.next() {
        config = config.with_import_attribute(attribute);
    }

    let result = scan(&input, &config, |event: AssetEvent| {
        println!("{}", serde_json::to_string(&event).unwrap());
    });
    if let Err(err) = result {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
