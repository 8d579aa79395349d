use crossterm::style::{style, Stylize};
use pinyin_search::core::highlight::find_literal;
use pinyin_search::{NamedEntry, PinyinSearch, SearchConfig, SearchError};
use std::io::{self, stdin, stdout, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_CONFIG_PATH: &str = "pinyin_search.json";
const MAX_RESULTS: usize = 20;

fn main() -> io::Result<()> {
    // Logs go to stderr so results on stdout stay readable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "pinyin_search=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let Some(names_path) = std::env::args().nth(1) else {
        eprintln!("usage: pinyin-filter <names.txt | names.json>");
        std::process::exit(2);
    };

    let config_path = std::env::var("PINYIN_SEARCH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = SearchConfig::load_or_default(&config_path).unwrap_or_else(|e| {
        tracing::error!("{}, falling back to defaults", e);
        SearchConfig::default()
    });
    let snapshot_path = config.snapshot_path.clone().map(PathBuf::from);
    let engine = match &snapshot_path {
        Some(path) => PinyinSearch::from_snapshot_or_new(path, config),
        None => PinyinSearch::with_config(config),
    };

    let entries = match load_entries(Path::new(&names_path)) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    engine.learn_entries(&entries);
    tracing::info!("Preheated {} names", entries.len());

    println!("Pinyin filter. Type a query; ':stats', ':clear', ':save' or 'exit'.");
    println!("---------------------------------------------------------------");

    loop {
        print!("\n> ");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            ":stats" => {
                let stats = engine.stats();
                println!(
                    "cached chars: {}  indexed words: {}  hits: {}  misses: {}",
                    stats.cached_chars, stats.indexed_words, stats.cache_hits, stats.cache_misses
                );
            }
            ":clear" => {
                engine.clear();
                println!("Caches cleared.");
            }
            ":save" => save(&engine, snapshot_path.as_deref()),
            query => print_results(&engine, &entries, query),
        }
    }

    save(&engine, snapshot_path.as_deref());
    Ok(())
}

/// Plain text (one name per line) or a JSON array of names or entries.
fn load_entries(path: &Path) -> Result<Vec<NamedEntry>, SearchError> {
    let content = std::fs::read_to_string(path).map_err(|e| SearchError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if content.trim_start().starts_with('[') {
        let values: Vec<serde_json::Value> = serde_json::from_str(&content)
            .map_err(|e| SearchError::Config { path: path.to_path_buf(), source: e })?;
        let entries = values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::String(name) => Some(NamedEntry::new(name)),
                other => serde_json::from_value(other).ok(),
            })
            .collect();
        return Ok(entries);
    }

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(NamedEntry::new)
        .collect())
}

fn print_results(engine: &PinyinSearch, entries: &[NamedEntry], query: &str) {
    let hits = engine.filter_default(entries, query);
    if hits.is_empty() {
        println!("No matches.");
        return;
    }

    for entry in hits.iter().take(MAX_RESULTS) {
        let initials = engine.get_initials(&entry.name);
        print!("  {}  [{}]", styled(&entry.name, query), initials);
        if !entry.nicknames.is_empty() {
            let nicknames: Vec<String> = entry.nicknames.iter().map(|n| styled(n, query)).collect();
            print!("  ({})", nicknames.join(", "));
        }
        println!();
    }
    if hits.len() > MAX_RESULTS {
        println!("  ... {} more", hits.len() - MAX_RESULTS);
    }
}

fn styled(text: &str, query: &str) -> String {
    match find_literal(text, query) {
        Some(range) => format!(
            "{}{}{}",
            &text[..range.start],
            style(&text[range.clone()]).yellow().bold(),
            &text[range.end..]
        ),
        None => text.to_string(),
    }
}

fn save(engine: &PinyinSearch, path: Option<&Path>) {
    match path {
        Some(path) => match engine.save_snapshot(path) {
            Ok(()) => println!("Snapshot saved to {:?}", path),
            Err(e) => eprintln!("[ERROR] Could not save snapshot: {}", e),
        },
        None => println!("No snapshot_path configured, nothing saved."),
    }
}
