//! Swap the exported product payload into the storefront database document.
//!
//! Reads `src/lib/db.json` and `/tmp/products.json`, replaces the document's
//! `products` key, and writes the document back. Takes no arguments.

use storefront_db::ProductMerger;

fn main() {
    match ProductMerger::new().run() {
        Ok(count) => println!("Database updated with {} products", count),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
