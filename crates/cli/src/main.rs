use std::io::{self, Read};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use shapeshift_core::{
    FetchConfig, GeminiModel, GroqModel, LengthPreference, LinkedinFormat, Transformer, TransformerConfig,
    UserSettings, XAccountType, XFormat, persona_by_id,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for transform results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

fn parse_length(s: &str) -> Result<LengthPreference, String> {
    match s.to_lowercase().as_str() {
        "short" => Ok(LengthPreference::Short),
        "default" => Ok(LengthPreference::Default),
        "long" => Ok(LengthPreference::Long),
        _ => Err(format!("Invalid length: {}. Valid options: short, default, long", s)),
    }
}

fn parse_x_format(s: &str) -> Result<XFormat, String> {
    match s.to_lowercase().as_str() {
        "thread" => Ok(XFormat::Thread),
        "post" => Ok(XFormat::Post),
        _ => Err(format!("Invalid X format: {}. Valid options: thread, post", s)),
    }
}

fn parse_x_account(s: &str) -> Result<XAccountType, String> {
    match s.to_lowercase().as_str() {
        "basic" => Ok(XAccountType::Basic),
        "premium" => Ok(XAccountType::Premium),
        _ => Err(format!("Invalid X account type: {}. Valid options: basic, premium", s)),
    }
}

fn parse_linkedin_format(s: &str) -> Result<LinkedinFormat, String> {
    match s.to_lowercase().as_str() {
        "post" => Ok(LinkedinFormat::Post),
        "article" => Ok(LinkedinFormat::Article),
        _ => Err(format!("Invalid LinkedIn format: {}. Valid options: post, article", s)),
    }
}

/// Transform articles and raw text into platform-specific content
#[derive(Parser, Debug)]
#[command(name = "shapeshift")]
#[command(version = VERSION)]
#[command(about = "Transform a URL or raw text into platform-specific content", long_about = None)]
struct Args {
    /// URL to scrape, raw text, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Leave emojis out of the generated content
    #[arg(long)]
    no_emojis: bool,

    /// Leave hashtags out of the generated content
    #[arg(long)]
    no_hashtags: bool,

    /// Length preference (short, default, long)
    #[arg(long, default_value = "default", value_parser = parse_length, value_name = "LENGTH")]
    length: LengthPreference,

    /// X output shape (thread, post)
    #[arg(long, default_value = "thread", value_parser = parse_x_format, value_name = "SHAPE")]
    x_format: XFormat,

    /// X account tier (basic, premium)
    #[arg(long, default_value = "basic", value_parser = parse_x_account, value_name = "TIER")]
    x_account: XAccountType,

    /// LinkedIn output shape (post, article)
    #[arg(long, default_value = "post", value_parser = parse_linkedin_format, value_name = "SHAPE")]
    linkedin_format: LinkedinFormat,

    /// Edit-stage sampling temperature
    #[arg(long, value_name = "TEMP")]
    temperature: Option<f32>,

    /// HTTP timeout for the page fetch, in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Show staged progress output
    #[arg(short, long)]
    verbose: bool,
}

fn print_banner() {
    eprintln!("\n{} {} {}", "Shapeshift".bold().bright_magenta(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Transform any article into platform-specific content".dimmed());
    eprintln!();
}

fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
    }

    let input = if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
        buffer
    } else {
        args.input.clone()
    };

    let settings = UserSettings {
        include_emojis: !args.no_emojis,
        include_hashtags: !args.no_hashtags,
        length_preference: args.length,
        x_format: args.x_format,
        x_account_type: args.x_account,
        linkedin_format: args.linkedin_format,
        temperature: args.temperature,
    };

    let draft_model = Arc::new(GroqModel::from_env().context("draft provider configuration")?);
    let edit_model = Arc::new(GeminiModel::from_env().context("edit provider configuration")?);

    let config = TransformerConfig {
        fetch: FetchConfig { timeout: args.timeout, ..Default::default() },
        ..Default::default()
    };
    let transformer = Transformer::with_config(draft_model, edit_model, config);

    if args.verbose {
        let kind = if input.trim().starts_with("http") { "URL" } else { "text" };
        print_step(2, 3, &format!("Transforming {} input", kind));
    }

    let response = transformer
        .transform(&input, &settings)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    if args.verbose {
        print_step(3, 3, "Rendering results");
        if let Some(title) = &response.title {
            eprintln!("  {} {}", "Title:".dimmed(), title.bright_white());
        }
        eprintln!("  {} {}", "Extracted:".dimmed(), format!("{} chars", response.extracted_text.len()).bright_white());
        eprintln!();
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response).context("Failed to serialize response")?);
        }
        OutputFormat::Text => {
            for result in &response.results {
                println!("{}", format!("── {} ", result.platform).bold().bright_white());
                if let Some(persona) = persona_by_id(&result.platform_id) {
                    println!("{}", persona.description.dimmed());
                }
                println!();
                println!("{}", result.content);
                println!();
            }
        }
    }

    if args.verbose {
        print_success(&format!("Generated {} formats", response.results.len()));
    }

    Ok(())
}
