//! notepager CLI - split notes into fixed-size slide pages

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use notepager::layout::fonts;
use notepager::render::{pagination_to_text, to_html_document, to_json};
use notepager::{
    FixedWidthMetrics, FontMetricsProvider, FontSizePreset, JsonFormat, Notepager, PageGeometry,
    Pagination, TextAlign, TtfMetrics,
};

#[derive(Parser)]
#[command(name = "notepager")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Split markup notes into fixed-size slide pages", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paginate a note and print the pages as JSON
    Paginate {
        /// Input note file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Paginate a note and print the pages as plain text
    Text {
        /// Input note file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Write one HTML file per page (page-1.html, page-2.html, ...)
    Html {
        /// Input note file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show document and layout information
    Info {
        /// Input note file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

/// Geometry and font options shared by all paginating commands.
#[derive(Args, Clone)]
struct LayoutArgs {
    /// Geometry JSON file; flags below override its fields
    #[arg(long, value_name = "FILE", env = "NOTEPAGER_CONFIG")]
    config: Option<PathBuf>,

    /// Aspect ratio, 200px per unit (e.g. "3:4", "9:16")
    #[arg(long, conflicts_with_all = ["width", "height"])]
    ratio: Option<String>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Horizontal padding in percent of the width
    #[arg(long, value_name = "PCT")]
    h_padding: Option<f32>,

    /// Vertical padding in percent of the height
    #[arg(long, value_name = "PCT")]
    v_padding: Option<f32>,

    /// Body font size in pixels
    #[arg(long, conflicts_with = "font_preset")]
    font_size: Option<f32>,

    /// Body font size preset
    #[arg(long, value_enum)]
    font_preset: Option<FontPreset>,

    /// Line height multiplier
    #[arg(long)]
    line_height: Option<f32>,

    /// Font family (e.g. "黑体", "Arial", "Courier New")
    #[arg(long)]
    font_family: Option<String>,

    /// Text alignment
    #[arg(long, value_enum)]
    align: Option<Align>,

    /// TrueType/OpenType font used to measure glyph widths
    #[arg(long, value_name = "FILE")]
    font_file: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FontPreset {
    /// 14px body text
    Small,
    /// 16px body text (default)
    Medium,
    /// 18px body text
    Large,
}

impl From<FontPreset> for FontSizePreset {
    fn from(preset: FontPreset) -> Self {
        match preset {
            FontPreset::Small => FontSizePreset::Small,
            FontPreset::Medium => FontSizePreset::Medium,
            FontPreset::Large => FontSizePreset::Large,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Align {
    Left,
    Center,
    Right,
    Justify,
}

impl From<Align> for TextAlign {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => TextAlign::Left,
            Align::Center => TextAlign::Center,
            Align::Right => TextAlign::Right,
            Align::Justify => TextAlign::Justify,
        }
    }
}

type Pager = Notepager<Box<dyn FontMetricsProvider>>;

impl LayoutArgs {
    fn geometry(&self) -> Result<PageGeometry, Box<dyn std::error::Error>> {
        let mut geometry = match &self.config {
            Some(path) => PageGeometry::from_json(&fs::read_to_string(path)?)?,
            None => PageGeometry::default(),
        };

        if let Some(ratio) = &self.ratio {
            geometry = geometry.with_ratio(ratio)?;
        }
        if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(geometry.width);
            let height = self.height.unwrap_or(geometry.height);
            geometry = geometry.with_size(width, height);
        }
        if self.h_padding.is_some() || self.v_padding.is_some() {
            let h = self.h_padding.unwrap_or(geometry.horizontal_padding_pct);
            let v = self.v_padding.unwrap_or(geometry.vertical_padding_pct);
            geometry = geometry.with_padding(h, v);
        }
        if let Some(preset) = self.font_preset {
            geometry = geometry.with_font_size_preset(preset.into());
        }
        if let Some(size) = self.font_size {
            geometry = geometry.with_font_size(size);
        }
        if let Some(line_height) = self.line_height {
            geometry = geometry.with_line_height(line_height);
        }
        if let Some(family) = &self.font_family {
            geometry = geometry.with_font_family(family.clone());
        }
        if let Some(align) = self.align {
            geometry = geometry.with_text_align(align.into());
        }

        Ok(geometry)
    }

    fn pager(&self) -> Result<Pager, Box<dyn std::error::Error>> {
        let provider: Box<dyn FontMetricsProvider> = match &self.font_file {
            Some(path) => {
                let metrics = TtfMetrics::from_file(path)?;
                log::info!(
                    "Measuring with font {}",
                    metrics.family().unwrap_or("<unnamed>")
                );
                Box::new(metrics)
            }
            None => Box::new(FixedWidthMetrics::new()),
        };

        Ok(Notepager::new()
            .with_geometry(self.geometry()?)
            .with_metrics(provider))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Paginate {
            input,
            output,
            compact,
            layout,
        } => cmd_paginate(&input, output.as_deref(), compact, &layout),
        Commands::Text {
            input,
            output,
            layout,
        } => cmd_text(&input, output.as_deref(), &layout),
        Commands::Html {
            input,
            output,
            layout,
        } => cmd_html(&input, output.as_deref(), &layout),
        Commands::Info { input, layout } => cmd_info(&input, &layout),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn report_diagnostics(pagination: &Pagination) {
    for diagnostic in &pagination.diagnostics {
        eprintln!("{}: {}", "Warning".yellow().bold(), diagnostic);
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_paginate(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pagination = layout.pager()?.paginate_file(input)?;
    report_diagnostics(&pagination);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = to_json(&pagination, format)?;
    write_or_print(output, &json)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pagination = layout.pager()?.paginate_file(input)?;
    report_diagnostics(&pagination);

    let text = pagination_to_text(&pagination);
    write_or_print(output, &text)
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_pages", stem))
    });
    fs::create_dir_all(&output_dir)?;

    let pager = layout.pager()?;
    let pagination = pager.paginate_file(input)?;
    report_diagnostics(&pagination);

    let pb = ProgressBar::new(pagination.page_count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut written = Vec::with_capacity(pagination.page_count());
    for page in &pagination.pages {
        let filename = format!("page-{}.html", page.number);
        pb.set_message(filename.clone());
        fs::write(
            output_dir.join(&filename),
            to_html_document(page, pager.geometry()),
        )?;
        written.push(filename);
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {}",
        "Output files:".green().bold(),
        output_dir.display()
    );
    for (i, filename) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), filename);
    }

    Ok(())
}

fn cmd_info(input: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pager = layout.pager()?;
    let text = fs::read_to_string(input)?;
    let doc = notepager::parse(&text);
    let pagination = pager.paginate_document(&doc);
    let g = pager.geometry();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Blocks".bold(), doc.len());
    println!("{}: {}", "Headings".bold(), doc.heading_count());
    let plain = doc.plain_text();
    println!("{}: {}", "Words".bold(), plain.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), plain.chars().count());

    println!();
    println!("{}", "Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}x{}px", "Canvas".bold(), g.width, g.height);
    println!(
        "{}: {}x{}px",
        "Content area".bold(),
        g.available_width(),
        g.available_height()
    );
    println!(
        "{}: {}px / line height {}",
        "Body font".bold(),
        g.font_size,
        g.line_height
    );
    println!("{}: {}", "Font stack".bold(), g.font_stack());
    println!(
        "{}: {}",
        "Width compensation".bold(),
        fonts::compensation(&g.font_family)
    );

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Pages".bold(), pagination.page_count());
    for page in &pagination.pages {
        println!(
            "  {} {:>3} blocks, {:>7.1}px",
            format!("#{}", page.number).dimmed(),
            page.block_count(),
            page.estimated_height
        );
    }

    if pagination.has_diagnostics() {
        println!();
        println!("{}", "Diagnostics".yellow().bold());
        println!("{}", "─".repeat(40).dimmed());
        for diagnostic in &pagination.diagnostics {
            println!("  {}", diagnostic);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "notepager".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Split markup notes into fixed-size slide pages");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn layout(args: &[&str]) -> LayoutArgs {
        let mut argv = vec!["notepager", "info", "note.md"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Info { layout, .. } => layout,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_default_geometry() {
        let geometry = layout(&[]).geometry().unwrap();
        assert_eq!(geometry, PageGeometry::default());
    }

    #[test]
    fn test_flags_override_geometry() {
        let geometry = layout(&[
            "--ratio",
            "9:16",
            "--font-preset",
            "large",
            "--align",
            "center",
            "--h-padding",
            "5",
        ])
        .geometry()
        .unwrap();
        assert_eq!((geometry.width, geometry.height), (1800, 3200));
        assert_eq!(geometry.font_size, 18.0);
        assert_eq!(geometry.text_align, TextAlign::Center);
        assert_eq!(geometry.horizontal_padding_pct, 5.0);
        assert_eq!(geometry.vertical_padding_pct, 8.0);
    }

    #[test]
    fn test_config_file_with_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"width": 1080, "height": 1440, "font_size": 20}"#)
            .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let geometry = layout(&["--config", &path, "--height", "1920"])
            .geometry()
            .unwrap();
        assert_eq!((geometry.width, geometry.height), (1080, 1920));
        assert_eq!(geometry.font_size, 20.0);
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        assert!(layout(&["--ratio", "wide"]).geometry().is_err());
    }

    #[test]
    fn test_ratio_conflicts_with_size() {
        let result = Cli::try_parse_from([
            "notepager", "info", "n.md", "--ratio", "1:1", "--width", "10",
        ]);
        assert!(result.is_err());
    }
}
