use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use roadweave_canvas::{LayoutConfig, RoadmapLayout};
use roadweave_common::{LayoutResult, RoadmapDocument};
use roadweave_graph_layout::RankDir;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Lay out a roadmap graph and colour its branches
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Roadmap JSON document, stdin when missing or `-`
    input: Option<PathBuf>,

    /// Where to write the layout, stdout by default
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// RON file with layout settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Direction of the ranks: lr, rl, tb or bt
    #[arg(long, value_parser = parse_rank_dir)]
    rank_dir: Option<RankDir>,

    /// Gap between ranks
    #[arg(long)]
    rank_sep: Option<f32>,

    /// Gap between nodes of a rank
    #[arg(long)]
    node_sep: Option<f32>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn layout_config(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => LayoutConfig::load(path)?,
            None => LayoutConfig::default(),
        };

        if let Some(rank_dir) = self.rank_dir {
            config.rank_dir = rank_dir;
        }
        if let Some(rank_sep) = self.rank_sep {
            config.rank_sep = rank_sep;
        }
        if let Some(node_sep) = self.node_sep {
            config.node_sep = node_sep;
        }

        Ok(config)
    }
}

fn parse_rank_dir(value: &str) -> Result<RankDir, String> {
    match value.to_ascii_lowercase().as_str() {
        "lr" => Ok(RankDir::LeftRight),
        "rl" => Ok(RankDir::RightLeft),
        "tb" => Ok(RankDir::TopBottom),
        "bt" => Ok(RankDir::BottomTop),
        _ => Err(format!("unknown rank direction `{value}`, expected lr, rl, tb or bt")),
    }
}

fn read_document(input: Option<&Path>) -> Result<RoadmapDocument> {
    match input {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            RoadmapDocument::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse {}", path.display()))
        }
        _ => {
            let mut json = String::new();
            io::stdin()
                .read_to_string(&mut json)
                .context("Failed to read stdin")?;
            RoadmapDocument::from_json(&json).context("Failed to parse stdin")
        }
    }
}

fn write_result(result: &LayoutResult, output: Option<&Path>, pretty: bool) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if pretty {
        serde_json::to_writer_pretty(&mut writer, result)?;
    } else {
        serde_json::to_writer(&mut writer, result)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = args.layout_config()?;
    debug!("Layout config: {config:?}");

    let document = read_document(args.input.as_deref())?;
    if let Some((topic, difficulty)) = document.meta() {
        info!("Laying out saved roadmap {topic:?} ({difficulty})");
    }

    let result = RoadmapLayout::new(config).layout(&document.into_roadmap());
    write_result(&result, args.output.as_deref(), args.pretty)
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    run(&args)
}
