//! # Tarifa CLI
//!
//! Usage:
//!   tarifa catalog.json -o pricelist.pdf
//!   echo '{ ... }' | tarifa -o pricelist.pdf
//!   tarifa --example > catalog.json

use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_catalog_json());
        return;
    }

    // Read input
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).expect("Failed to read input file")
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).expect("Failed to read stdin");
        buf
    };

    // Parse output path
    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "pricelist.pdf".to_string());

    // Render
    match tarifa::render_json(&input) {
        Ok(pdf_bytes) => {
            fs::write(&output_path, &pdf_bytes).expect("Failed to write PDF");
            eprintln!("✓ Written {} bytes to {}", pdf_bytes.len(), output_path);
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

fn example_catalog_json() -> &'static str {
    r##"{
  "info": {
    "company": "Acme Industrial Supply",
    "title": "Wholesale Price List",
    "contact": [
      "sales@acme-industrial.example",
      "+1 555 010 0199",
      "123 Business St, Suite 100"
    ]
  },
  "options": {
    "currency": "$",
    "priceSource": "Unit",
    "categoryOrder": ["Power Tools", "Hand Tools", "Fasteners"]
  },
  "items": [
    { "name": "Cordless drill 18V", "category": "Power Tools", "unitPrice": 129.0 },
    { "name": "Angle grinder", "category": "Power Tools", "unitPrice": 84.5 },
    { "name": "Orbital sander", "category": "Power Tools", "unitPrice": 61.0, "salePrice": 49.99 },
    { "name": "Claw hammer 16oz", "category": "Hand Tools", "unitPrice": 14.25 },
    { "name": "Adjustable wrench", "category": "Hand Tools", "unitPrice": 11.8 },
    { "name": "Screwdriver set", "category": "Hand Tools", "unitPrice": 22.0 },
    { "name": "Hex bolt M8 (100)", "category": "Fasteners", "unitPrice": 7.6 },
    { "name": "Wood screw #8 (500)", "category": "Fasteners", "unitPrice": 12.4 },
    { "name": "Shop towels (roll)", "category": "Consumables", "unitPrice": 4.99 }
  ]
}
"##
}
