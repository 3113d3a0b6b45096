use clap::Parser;
use obsidian_markdown::prelude::*;
use petgraph::algo::connected_components;
use std::{collections::HashMap, path::PathBuf, time::Instant};
use tracing_subscriber::EnvFilter;

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.is_dir() {
        return Err(format!("{} is not dir", path.display()));
    }

    Ok(path)
}

#[derive(Parser, Debug)]
struct Args {
    /// Path to the vault
    #[arg(long, value_parser = parse_path)]
    path: PathBuf,

    /// Also read dot-files and dot-directories
    #[arg(long)]
    include_hidden: bool,

    /// Write every note as HTML into this directory
    #[arg(long)]
    html: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let open_vault = Instant::now();
    let options = VaultOptions::new(&args.path).include_hidden(args.include_hidden);
    let vault = Vault::par_open(&options).unwrap();

    println!("Time open vault: {:.2?}", open_vault.elapsed());
    println!("Count notes: {}", vault.count_notes());
    println!(
        "Todo notes: {}",
        vault.notes().iter().filter(|note| note.is_todo()).count()
    );
    println!(
        "Check unique note name by name: {}",
        !vault.par_have_duplicates_by_name()
    );

    let word_count: usize = vault.notes().iter().map(Note::count_words).sum();
    println!("Word count: {word_count}");

    let mut tags: HashMap<String, usize> = HashMap::new();
    for tag in vault.notes().iter().flat_map(Note::tags) {
        *tags.entry(tag).or_default() += 1;
    }

    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort_unstable_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then(a.cmp(b)));
    println!("Top tags: {:?}", tags.iter().take(10).collect::<Vec<_>>());

    let get_graph = Instant::now();
    let graph = vault.par_link_graph();
    let ungraph = graph.to_ungraph();

    println!("Time get graph: {:.2?}", get_graph.elapsed());
    println!("Count nodes in graph: {}", ungraph.node_count());
    println!("Count edges in graph: {}", ungraph.edge_count());
    println!(
        "connected components in graph: {}",
        connected_components(&ungraph)
    );

    if let Some(hub) = graph
        .notes()
        .into_iter()
        .max_by_key(|note| graph.backlinks(note).len())
    {
        println!("Knowledge hub: {hub} ({} backlinks)", graph.backlinks(hub).len());
    }

    if let Some(out_dir) = args.html {
        let renderer = render::html::renderer(HtmlOptions::default());
        std::fs::create_dir_all(&out_dir).unwrap();

        for note in vault.notes() {
            if let Some(name) = note.name() {
                let html = render(note.parsed(), &renderer);
                std::fs::write(out_dir.join(format!("{name}.html")), html).unwrap();
            }
        }

        println!("HTML written to {}", out_dir.display());
    }
}
