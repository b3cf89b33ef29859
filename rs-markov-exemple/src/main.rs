use std::fs;
use std::path::Path;

use rs_markov_core::{DictionaryStore, DEFAULT_DEPTH};

mod trainer;

const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog. \
    The lazy dog sleeps in the sun. Paris is far from the dog. \
    The fox runs to Paris. Does the fox like the sun? The sun likes the fox!";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows what the store does with the file
    env_logger::init();

    // Usage: rs-markov-exemple [dictionary path] [depth]
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "./data/dictionary.cbor".to_owned());
    let depth = match args.next() {
        Some(depth) => depth.parse()?,
        None => DEFAULT_DEPTH,
    };

    // Depth is checked before anything is read
    match DictionaryStore::new(&path, 6) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Depth 6 is invalid: {e}"),
    }

    // The store does not create directories, the application does
    if let Some(parent) = Path::new(&path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Loads the file if it exists, otherwise starts empty
    let mut store = DictionaryStore::new(&path, depth)?;
    if store.is_empty() {
        println!("No dictionary at {path}, training on the sample text");
        trainer::add_text(&mut store, SAMPLE_TEXT);
        store.save()?;
    }

    // A fresh store sees exactly what was saved (depth included)
    let store = DictionaryStore::new(&path, depth)?;
    println!(
        "{} n-grams, {} capitalized words, depth {}",
        store.dictionary().len(),
        store.capitalized_words().len(),
        store.depth()
    );

    let mut rng = rand::rng();
    for i in 0..5 {
        match trainer::generate(&store, 20, &mut rng) {
            Some(sentence) => println!("Generated sentence {}: {}", i + 1, sentence),
            None => println!("Dictionary is empty"),
        }
    }

    // Deleting twice is fine, the second call just reports it
    let scratch = format!("{path}.scratch");
    DictionaryStore::new(&scratch, depth)?.save()?;
    println!("{}", DictionaryStore::delete(&scratch)?);
    println!("{}", DictionaryStore::delete(&scratch)?);

    Ok(())
}
