//! richpost CLI - render and inspect stored rich-text posts

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use richpost::detect::{detect_payload, post_from_payload, unwrap_payload};
use richpost::render::{extract_image_names_from_wire, to_html_with_stats};
use richpost::{JsonFormat, Project, RenderOptions, RetentionOptions, RetentionPlan, Richpost};

#[derive(Parser)]
#[command(name = "richpost")]
#[command(version)]
#[command(about = "Render and inspect rich-text post content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render content to HTML
    Html {
        /// Post, envelope or document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Prefix upload paths with this server URL
        #[arg(long, env = "RICHPOST_BASE_URL")]
        base_url: Option<String>,

        /// Omit crossorigin="anonymous" on images
        #[arg(long)]
        no_crossorigin: bool,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        /// Render undecodable content as an empty post
        #[arg(long)]
        lenient: bool,
    },

    /// Extract plain text
    Text {
        /// Post, envelope or document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Normalize content to editor JSON
    Json {
        /// Post, envelope or document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List image file names referenced by the content
    Images {
        /// Post, envelope or document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show post information
    Info {
        /// Post, envelope or document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Delete uploads no post references
    Cleanup {
        /// Upload directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Post files whose images must be kept
        #[arg(value_name = "FILES")]
        posts: Vec<PathBuf>,

        /// Project files whose media must be kept (repeatable)
        #[arg(long = "project", value_name = "FILE")]
        projects: Vec<PathBuf>,

        /// Keep unreferenced files younger than this many hours
        #[arg(long, default_value = "0")]
        max_age_hours: u64,

        /// Show the plan without deleting anything
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Html {
            input,
            output,
            base_url,
            no_crossorigin,
            max_heading,
            lenient,
        } => cmd_html(
            &input,
            output.as_deref(),
            base_url,
            !no_crossorigin,
            max_heading,
            lenient,
        ),
        Commands::Text { input, output } => cmd_text(&input, output.as_deref()),
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&input, output.as_deref(), compact),
        Commands::Images { input } => cmd_images(&input),
        Commands::Info { input } => cmd_info(&input),
        Commands::Cleanup {
            dir,
            posts,
            projects,
            max_age_hours,
            dry_run,
        } => cmd_cleanup(&dir, &posts, &projects, max_age_hours, dry_run),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn read_value(input: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    Ok(serde_json::from_str(&json)?)
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    base_url: Option<String>,
    cross_origin: bool,
    max_heading: u8,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Richpost::new()
        .with_cross_origin(cross_origin)
        .with_max_heading(max_heading);
    if let Some(base) = base_url {
        builder = builder.with_base_url(base);
    }
    if lenient {
        builder = builder
            .lenient()
            .with_empty_placeholder("<p class=\"text-gray-400 italic\">No content available.</p>");
    }

    let html = builder.load(input)?.to_html()?;
    write_output(output, &html)
}

fn cmd_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = richpost::extract_text(input)?;
    write_output(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = Richpost::new().load(input)?.to_json(format)?;
    write_output(output, &json)
}

fn cmd_images(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_value(input)?;
    // Raw extraction so broken content still reports its files
    let names = extract_image_names_from_wire(&unwrap_payload(&value)?);
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_value(input)?;
    let kind = detect_payload(&value)?;
    let post = post_from_payload(&value)?;

    println!("{}", "Post Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), kind);
    if !post.id.is_empty() {
        println!("{}: {}", "Id".bold(), post.id);
    }
    if !post.title.is_empty() {
        println!("{}: {}", "Title".bold(), post.title);
    }
    if !post.slug.is_empty() {
        println!("{}: {}", "Slug".bold(), post.slug);
    }
    if post.date.is_some() {
        println!("{}: {}", "Date".bold(), post.date_string());
    }
    if !post.cover_image.is_empty() {
        println!("{}: {}", "Cover".bold(), post.cover_image);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let result = to_html_with_stats(&post.content, &RenderOptions::default())?;
    let stats = &result.stats;

    println!("{}: {}", "Blocks".bold(), post.content.len());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {} bytes", "HTML".bold(), result.content_len());

    Ok(())
}

fn cmd_cleanup(
    dir: &Path,
    posts: &[PathBuf],
    projects: &[PathBuf],
    max_age_hours: u64,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let referenced = collect_references(posts, projects)?;
    let options = RetentionOptions::new().with_max_age(max_age_from_hours(max_age_hours));
    let plan = RetentionPlan::scan(dir, &referenced, &options)?;

    for (name, reason) in plan.kept() {
        println!("  {} {} ({:?})", "keep".green(), name, reason);
    }
    for name in plan.to_delete() {
        println!("  {} {}", "delete".red(), name);
    }

    if dry_run {
        println!(
            "\n{} {} files would be deleted",
            "Dry run:".yellow().bold(),
            plan.to_delete().len()
        );
        return Ok(());
    }

    let report = plan.apply();
    for (name, err) in &report.failed {
        eprintln!("  {} {}: {}", "failed".red().bold(), name, err);
    }
    println!(
        "\n{} {} deleted, {} kept",
        "Done!".green().bold(),
        report.deleted.len(),
        report.kept
    );

    if report.is_clean() {
        Ok(())
    } else {
        Err(format!("{} files could not be deleted", report.failed.len()).into())
    }
}

/// File names still in use by the given post and project files.
fn collect_references(
    posts: &[PathBuf],
    projects: &[PathBuf],
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut referenced = Vec::new();
    for path in posts {
        let value = read_value(path)?;
        referenced.extend(extract_image_names_from_wire(&unwrap_payload(&value)?));
        if let Ok(post) = post_from_payload(&value) {
            if !post.cover_image.is_empty() {
                referenced.push(post.cover_image);
            }
        }
    }
    for path in projects {
        let project = Project::from_json(&fs::read_to_string(path)?)?;
        referenced.extend(project.media_files());
    }
    log::info!(
        "{} file references from {} posts and {} projects",
        referenced.len(),
        posts.len(),
        projects.len()
    );
    Ok(referenced)
}

/// Hours to a duration, saturating instead of overflowing.
fn max_age_from_hours(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}
