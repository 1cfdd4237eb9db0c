use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::*;
use slide2pdf::scaffold::{self, PromptLanguage, TEMPLATE_NAMES};
use slide2pdf::{parse_scale, BrowserOptions, ChromiumBackend, ConvertOptions, Converter};
use std::path::PathBuf;
use std::process;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "slide2pdf")]
#[command(about = "HTML to 16:9 PDF slide generator")]
#[command(version = "0.1.0")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an HTML slide deck to PDF
    #[command(alias = "g")]
    Generate {
        /// Input HTML file
        input: PathBuf,

        /// Output PDF file
        #[arg(short = 'o', long = "output", default_value = "output.pdf")]
        output: PathBuf,

        /// Use screenshot mode (better CSS support, text is not selectable)
        #[arg(short = 's', long = "screenshot")]
        screenshot: bool,

        /// PDF scale factor (0.1-2)
        #[arg(long = "scale", default_value = "1", value_parser = parse_scale)]
        scale: f64,

        /// Slide width in pixels
        #[arg(long = "width", default_value_t = 1920, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,

        /// Slide height in pixels
        #[arg(long = "height", default_value_t = 1080, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,

        /// Path to the Chrome/Chromium executable
        #[arg(long = "chrome")]
        chrome: Option<PathBuf>,

        /// Show the browser window while converting
        #[arg(long = "headed")]
        headed: bool,
    },
    /// Output a starter template
    #[command(alias = "t")]
    Template {
        /// Template name: basic, minimal, dark
        #[arg(default_value = "basic")]
        name: String,

        /// List available templates
        #[arg(short = 'l', long = "list")]
        list: bool,
    },
    /// Output example prompts for LLM
    #[command(alias = "p")]
    Prompt {
        /// Output Japanese version
        #[arg(short = 'j', long = "ja")]
        ja: bool,
    },
    /// Initialize a new slides project
    #[command(alias = "i")]
    Init {
        /// Directory name
        #[arg(default_value = "slides")]
        dir: String,
    },
}

fn print_template(name: &str, list: bool) -> Result<()> {
    if list {
        println!("Available templates:");
        for name in TEMPLATE_NAMES {
            println!("  - {}", name);
        }
        return Ok(());
    }

    let content = scaffold::template(name).ok_or_else(|| {
        anyhow!(
            "Unknown template: {}\nAvailable: {}",
            name,
            TEMPLATE_NAMES.join(", ")
        )
    })?;
    print!("{}", content);
    Ok(())
}

async fn init(dir: &str) -> Result<()> {
    let target = std::env::current_dir()?.join(dir);
    scaffold::init_project(&target).await?;

    println!("Created slides project in ./{}\n", dir.green());
    println!("Next steps:");
    println!("  cd {}", dir);
    println!("  slide2pdf g sample.html -o sample.pdf\n");
    println!("Files:");
    println!("  sample.html     Sample slide (try it now!)");
    println!("  templates/      Starter templates");
    println!("  prompts/        LLM prompt examples");
    Ok(())
}

#[tokio::main]
async fn main() {
    // Set up logging with chromiumoxide errors suppressed
    let filter = EnvFilter::from_default_env()
        .add_directive("chromiumoxide::conn=off".parse().unwrap())
        .add_directive("chromiumoxide::handler=off".parse().unwrap())
        .add_directive("slide2pdf=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Generate {
            input,
            output,
            screenshot,
            scale,
            width,
            height,
            chrome,
            headed,
        } => {
            let options = ConvertOptions::new(input, output)
                .size(width, height)
                .screenshot(screenshot)
                .scale(scale);
            let backend = ChromiumBackend::new(BrowserOptions {
                executable: chrome,
                headed,
            });
            Converter::new(backend)
                .convert(&options)
                .await
                .map(|_| ())
                .map_err(Into::into)
        }
        Commands::Template { name, list } => print_template(&name, list),
        Commands::Prompt { ja } => {
            let language = if ja {
                PromptLanguage::Japanese
            } else {
                PromptLanguage::English
            };
            print!("{}", scaffold::prompts(language));
            Ok(())
        }
        Commands::Init { dir } => init(&dir).await,
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        process::exit(1);
    }
}
