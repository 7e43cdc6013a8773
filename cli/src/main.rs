//! mailblock CLI - email template export and import tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use mailblock::render::{to_html_with_stats, to_json};
use mailblock::detect::strip_bom;
use mailblock::store::{duplicate_template, save_document};
use mailblock::{
    detect_format_from_bytes, detect_format_from_path, Backup, Document, HtmlParser,
    ImportFormat, JsonFileStore, JsonFormat, ParseOptions, RenderOptions, TemplateStore,
};

#[derive(Parser)]
#[command(name = "mailblock")]
#[command(version)]
#[command(about = "Export and import block-based email templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON template document to HTML
    Export {
        /// Input JSON document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Title used when the template has no name
        #[arg(long, default_value = "Email Template")]
        title: String,

        /// Print section statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Decode an HTML export into a JSON template document
    Import {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Template name (defaults to the page title)
        #[arg(short, long)]
        name: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Fail if the file is not a template export
        #[arg(long)]
        strict: bool,

        /// Base URL for relative image sources
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Import stray images from pages that are not template exports
        #[arg(long)]
        orphan_images: bool,
    },

    /// Show information about an HTML export, JSON document or backup
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Manage templates in a store file
    Templates {
        /// Store file
        #[arg(long, env = "MAILBLOCK_STORE", default_value = "templates.json")]
        store: PathBuf,

        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Back up every template in a store
    Backup {
        /// Store file
        #[arg(long, env = "MAILBLOCK_STORE", default_value = "templates.json")]
        store: PathBuf,

        /// Output file (defaults to a dated name in the current directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Restore templates from a backup into a store
    Restore {
        /// Backup file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Store file
        #[arg(long, env = "MAILBLOCK_STORE", default_value = "templates.json")]
        store: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum TemplateAction {
    /// List stored templates, newest first
    List,

    /// Save a JSON document as a template
    Save {
        /// Input JSON document or HTML export
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Update this template instead of creating a new one
        #[arg(long)]
        id: Option<String>,

        /// Template name (overrides the name in the file)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Store a copy of a template
    Duplicate {
        /// Template id
        id: String,
    },

    /// Render a stored template to HTML
    Export {
        /// Template id
        id: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Export {
            input,
            output,
            title,
            stats,
        }) => cmd_export(&input, output.as_deref(), &title, stats),
        Some(Commands::Import {
            input,
            name,
            output,
            compact,
            strict,
            base_url,
            orphan_images,
        }) => {
            let mut options = ParseOptions::new().with_orphan_images(orphan_images);
            if strict {
                options = options.strict();
            }
            if let Some(base) = base_url {
                options = options.with_base_url(base);
            }
            cmd_import(&input, name.as_deref(), output.as_deref(), compact, options)
        }
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Templates { store, action }) => cmd_templates(&store, action),
        Some(Commands::Backup { store, output }) => cmd_backup(&store, output.as_deref()),
        Some(Commands::Restore { input, store }) => cmd_restore(&input, &store),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: mailblock <COMMAND>".yellow());
            println!("       mailblock --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load a template document from a JSON document or an HTML export.
fn load_document(input: &Path, name: Option<&str>) -> Result<Document, Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let data = strip_bom(&data);
    let mut doc = match detect_format_from_bytes(data)? {
        ImportFormat::Document => serde_json::from_slice(data)?,
        ImportFormat::Html => {
            let html = std::str::from_utf8(data)?;
            HtmlParser::new().parse_document(html, name.unwrap_or_default())?
        }
        ImportFormat::Backup => {
            return Err(format!(
                "{} is a backup; use `mailblock restore` to load it",
                input.display()
            )
            .into())
        }
    };
    if let Some(name) = name {
        doc.name = name.to_string();
    }
    Ok(doc)
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

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    title: &str,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input, None)?;
    let options = RenderOptions::new().with_title_fallback(title);
    let result = to_html_with_stats(&doc, &options);

    write_output(output, &result.content)?;

    if stats {
        eprintln!(
            "{} {} text, {} image, {} spacer, {} skipped ({} bytes)",
            "Rendered".cyan(),
            result.stats.text_count,
            result.stats.image_count,
            result.stats.spacer_count,
            result.stats.skipped_count,
            result.stats.byte_len
        );
    }

    Ok(())
}

fn cmd_import(
    input: &Path,
    name: Option<&str>,
    output: Option<&Path>,
    compact: bool,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let html = std::str::from_utf8(strip_bom(&data))?;
    let doc = HtmlParser::with_options(options).parse_document(html, name.unwrap_or_default())?;

    if doc.is_empty() {
        log::warn!("No template sections found in {}", input.display());
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    write_output(output, &to_json(&doc, format)?)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;

    println!("{}", "Template Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    if format == ImportFormat::Backup {
        let backup = Backup::from_slice(&fs::read(input)?)?;
        println!("{}: {}", "Version".bold(), backup.version);
        println!("{}: {}", "Date".bold(), backup.date);
        println!("{}: {}", "Templates".bold(), backup.templates.len());
        for template in &backup.templates {
            println!(
                "  {} {} ({} sections)",
                "•".dimmed(),
                template.name,
                template.content.len()
            );
        }
        return Ok(());
    }

    let doc = load_document(input, None)?;
    let stats = to_html_with_stats(&doc, &RenderOptions::default()).stats;
    let text = doc.plain_text();

    println!(
        "{}: {}",
        "Name".bold(),
        if doc.name.is_empty() { "(unnamed)" } else { doc.name.as_str() }
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Sections".bold(), doc.len());
    println!("{}: {}", "Text".bold(), stats.text_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Spacers".bold(), stats.spacer_count);
    if stats.skipped_count > 0 {
        println!("{}: {}", "Unknown".bold(), stats.skipped_count);
    }
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {} bytes", "HTML size".bold(), stats.byte_len);

    Ok(())
}

fn cmd_templates(store_path: &Path, action: TemplateAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = JsonFileStore::open(store_path)?;

    match action {
        TemplateAction::List => {
            let templates = store.list()?;
            if templates.is_empty() {
                println!("{}", "No templates stored".yellow());
            }
            for template in templates {
                println!(
                    "{}  {}  {} ({} sections)",
                    template.id.dimmed(),
                    template.created_at.format("%Y-%m-%d %H:%M"),
                    template.name.bold(),
                    template.content.len()
                );
            }
        }
        TemplateAction::Save { input, id, name } => {
            let doc = load_document(&input, name.as_deref())?;
            let template = save_document(&mut store, id.as_deref(), &doc)?;
            println!("{} {} ({})", "Saved".green(), template.name, template.id);
        }
        TemplateAction::Duplicate { id } => {
            let original = store.get(&id)?;
            let copy = duplicate_template(&mut store, &original)?;
            println!("{} {} ({})", "Created".green(), copy.name, copy.id);
        }
        TemplateAction::Export { id, output } => {
            let doc = store.get(&id)?.to_document();
            write_output(output.as_deref(), &mailblock::encode(&doc))?;
        }
    }

    Ok(())
}

fn cmd_backup(store_path: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(store_path)?;
    let backup = Backup::from_store(&store)?;

    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(backup.suggested_filename()));
    fs::write(&path, backup.to_json(JsonFormat::Pretty)?)?;

    println!(
        "{} {} templates to {}",
        "Backed up".green().bold(),
        backup.templates.len(),
        path.display()
    );
    Ok(())
}

fn cmd_restore(input: &Path, store_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let backup = Backup::from_slice(&fs::read(input)?)?;
    let mut store = JsonFileStore::open(store_path)?;
    let restored = backup.restore_into(&mut store)?;

    println!(
        "{} {} templates into {}",
        "Restored".green().bold(),
        restored.len(),
        store.path().display()
    );
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mailblock".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Block-based email template tool");
    println!();
    println!("License: MIT");
}
