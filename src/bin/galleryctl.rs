use std::path::PathBuf;

use clap::{Parser, Subcommand};
use prompt_gallery::client::filename_from_url;
use prompt_gallery::{Config, GalleryClient};

#[derive(Parser, Debug)]
#[command(name = "galleryctl", about = "CLI for the Prompt Gallery API", version)]
struct Cli {
    /// Base URL of a running gallery server
    #[arg(global = true, long, env = "GALLERY_URL", default_value = "http://127.0.0.1:8080")]
    server_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an image from a prompt and add it to the gallery
    Generate {
        /// Text describing the desired image
        prompt: String,
        /// Output raw JSON instead of pretty lines
        #[arg(long)]
        json: bool,
    },
    /// List gallery images, newest first
    List {
        /// Output raw JSON instead of pretty lines
        #[arg(long)]
        json: bool,
    },
    /// Download an image by URL
    Download {
        /// Image URL as shown by `list`
        url: String,
        /// Output path (defaults to ./<last URL segment>)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();
    let client = GalleryClient::new(cli.server_url);

    match cli.command {
        Commands::Generate { prompt, json } => {
            let res = client.generate(&prompt).await.map_err(|e| {
                eprintln!("Error: {}", e);
                e
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else if res.images.is_empty() {
                eprintln!("{}, but the provider returned no image URLs", res.message);
            } else {
                for image in &res.images {
                    println!("{}", image.url);
                }
            }
            Ok(())
        }
        Commands::List { json } => {
            let images = client.list().await.map_err(|e| {
                eprintln!("Error: {}", e);
                e
            })?;
            if json {
                println!("{}", serde_json::to_string(&images)?);
            } else {
                for image in &images {
                    println!("{}\t{}\t{}", image.created_at.to_rfc3339(), image.prompt, image.url);
                }
            }
            Ok(())
        }
        Commands::Download { url, out } => {
            let bytes = client.download(&url).await.map_err(|e| {
                eprintln!("Error: {}", e);
                e
            })?;
            let path = out.unwrap_or_else(|| PathBuf::from(filename_from_url(&url)));
            tokio::fs::write(&path, &bytes).await?;
            println!("Saved {} ({} bytes)", path.display(), bytes.len());
            Ok(())
        }
    }
}
