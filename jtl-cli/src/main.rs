//! JTL command line driver.
//!
//! Loads pages headlessly, prints what the engine built, and runs or talks to
//! JTLTP servers.

mod serve;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use jtl_browser::{EngineConfig, Page, RenderList};
use jtl_widgets::InputState;
use owo_colors::OwoColorize;

/// JTL - live document engine for JTL pages
#[derive(Parser, Debug)]
#[command(name = "jtl")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the render list of a local page
    jtl render pages/index.json

    # Run ten frames, pressing the pointer at (40, 30) on the first
    jtl render pages/index.json --frames 10 --click 40,30

    # Print the records of a page served over JTLTP
    jtl dump jtltp://127.0.0.1:7070/index

    # Serve a directory of pages
    jtl serve ./pages --addr 127.0.0.1:7070

    # Fetch one document
    jtl fetch 127.0.0.1:7070 index
"#)]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a page and print its render list
    Render {
        /// Page path, http(s) URL or jtltp:// location
        #[arg(value_name = "PAGE")]
        page: String,

        /// Frames to run before printing
        #[arg(long, default_value = "1")]
        frames: u32,

        /// Press the pointer at X,Y on the first frame
        #[arg(long, value_name = "X,Y", value_parser = parse_point)]
        click: Option<(f32, f32)>,

        /// Also print the display list
        #[arg(long)]
        paint: bool,
    },

    /// Load a page and print its records as JSON
    Dump {
        /// Page path, http(s) URL or jtltp:// location
        #[arg(value_name = "PAGE")]
        page: String,
    },

    /// Serve a directory of pages over JTLTP
    Serve {
        /// Directory holding the documents
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:7070")]
        addr: String,
    },

    /// Fetch one document from a JTLTP server
    Fetch {
        /// Server address (host:port)
        #[arg(value_name = "ADDR")]
        addr: String,

        /// Document identifier
        #[arg(value_name = "ID")]
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Render {
            page,
            frames,
            click,
            paint,
        } => render(&page, &config, frames, click, paint),
        Command::Dump { page } => dump(&page, &config),
        Command::Serve { dir, addr } => serve::run(&dir, &addr),
        Command::Fetch { addr, id } => fetch(&addr, &id),
    }
}

/// Parse `X,Y` into a point.
fn parse_point(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{value}'"))?;
    let coordinate = |part: &str| {
        part.trim()
            .parse::<f32>()
            .map_err(|e| format!("bad coordinate '{part}': {e}"))
    };
    Ok((coordinate(x)?, coordinate(y)?))
}

fn load(page: &str, config: &EngineConfig) -> anyhow::Result<Page> {
    Page::load(page, config).with_context(|| format!("cannot load '{page}'"))
}

fn render(
    page: &str,
    config: &EngineConfig,
    frames: u32,
    click: Option<(f32, f32)>,
    paint: bool,
) -> anyhow::Result<()> {
    let mut page = load(page, config)?;

    let mut display = page.draw();
    for frame in 0..frames {
        let input = match click {
            Some((x, y)) if frame == 0 => InputState::pressed(x, y),
            Some((x, y)) => InputState::hover(x, y),
            None => InputState::default(),
        };
        display = page.frame(&input, &[]);
    }

    println!("{} {}", "Page:".bold(), page.location());
    print_render_list(&page.snapshot());
    println!(
        "{} {:.0}px",
        "Content height:".bold(),
        page.content_height()
    );

    if paint {
        println!("\n{}", "=== Display List ===".bold());
        for command in display.commands() {
            println!("  {command:?}");
        }
    }
    Ok(())
}

fn print_render_list(list: &RenderList) {
    println!("\n{} ({})", "=== Render List ===".bold(), list.len());
    for (index, widget) in list.widgets().iter().enumerate() {
        let base = widget.base();
        let mut name = base.tag.clone();
        if !base.id.is_empty() {
            name.push('#');
            name.push_str(&base.id);
        }
        if !base.class.is_empty() {
            name.push('.');
            name.push_str(&base.class);
        }
        print!(
            "  {:3}: {} {} [{:.0},{:.0} {:.0}x{:.0}]",
            index + 1,
            widget.kind().cyan(),
            name.yellow(),
            base.x,
            base.y,
            base.width,
            base.height
        );
        if let Some(text) = widget.live_text() {
            print!(" \"{}\"", text.green());
        }
        for kind in base.event_handlers.keys() {
            print!(" {}", format!("on{kind}").magenta());
        }
        println!();
    }
}

fn dump(page: &str, config: &EngineConfig) -> anyhow::Result<()> {
    let page = load(page, config)?;
    println!("{}", serde_json::to_string_pretty(&page.records())?);
    Ok(())
}

fn fetch(addr: &str, id: &str) -> anyhow::Result<()> {
    let response = jtl_net::fetch(addr, id).with_context(|| format!("cannot fetch '{id}' from {addr}"))?;
    let status = response.status.to_string();
    if response.is_ok() {
        println!("{} {}", status.green().bold(), response.doc_type);
    } else {
        println!("{} {}", status.red().bold(), response.doc_type);
    }
    println!("{}", response.body);
    Ok(())
}
