use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use live_oc::config::{self, Settings};
use live_oc::prelude::*;

// Reads commands from stdin:
//   <attribute>           show the attribute
//   <attribute> <value>   write the value to the attribute
//   dump                  print all parameters as JSON
fn main() -> std::result::Result<(), Box<dyn Error>> {
    let settings = match std::env::args().nth(1) {
        Some(path) => config::load_from_file(path)?,
        None => Settings::default(),
    };
    config::init_logging(&settings);

    let registry = LocalRegistry::default();
    let device = LiveOcDevice::initcall(&registry, &settings, Arc::new(LoggingPolicy))?;
    let attrs = device.attributes();

    println!("LiveOC Attribute Shell");
    println!("======================");
    for attr in registry.published(&settings.device_name) {
        println!("{}/{} ({:o})", settings.device_name, attr, attr.mode());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let name = match parts.next() {
            Some("") | None => continue,
            Some(name) => name,
        };

        if name == "dump" {
            println!("{}", serde_json::to_string_pretty(&attrs.store_handle().snapshot())?);
            continue;
        }

        let result = match parts.next() {
            Some(value) => attrs.store_by_name(name, format!("{}\n", value.trim())).map(|ack| {
                format!("consumed {} bytes: {:?}", ack.consumed, ack.outcome)
            }),
            None => attrs.show_by_name(name).map(|text| text.trim_end().to_string()),
        };
        match result {
            Ok(text) => println!("{}", text),
            Err(e) => println!("error: {}", e),
        }
        stdout.flush()?;
    }

    Ok(())
}
