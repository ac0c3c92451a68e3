//! Chapter Diagrams CLI
//!
//! Usage:
//!   chapter-diagrams [OPTIONS] <COMMAND>
//!
//! Commands:
//!   add        Append diagrams to one chapter's manifest
//!   batch      Append planned diagrams to every chapter with a template list
//!   check      Report manifest entries that do not match the template catalog
//!   templates  List catalog templates and their placeholder keys
//!   plan       Show the distribution plan
//!
//! Options:
//!   -r, --root <DIR>     Book root directory
//!   -c, --config <FILE>  Config file for paths and distribution plan (TOML format)
//!   -v, --verbose        Increase log verbosity
//!   -h, --help           Print help

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use chapter_diagrams::logging::init_logging;
use chapter_diagrams::{
    AuthorError, Authoring, AuthoringConfig, ChapterAllocation, ChapterId, ChapterReport,
    ChapterRequest, OutputTarget, TemplateCatalog,
};

#[derive(Parser)]
#[command(name = "chapter-diagrams")]
#[command(about = "Add diagram placeholders to book chapter manifests")]
struct Cli {
    /// Book root directory
    #[arg(
        short,
        long,
        env = "CHAPTER_DIAGRAMS_ROOT",
        default_value = ".",
        global = true
    )]
    root: PathBuf,

    /// Config file for paths and distribution plan (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Append diagrams to one chapter's manifest
    Add {
        /// Chapter to extend, e.g. 03
        chapter: Option<ChapterId>,

        /// Chapter to extend (same as the positional form)
        #[arg(long = "chapter", value_name = "NN", conflicts_with = "chapter")]
        chapter_flag: Option<ChapterId>,

        /// Comma-separated template names to add instead of rotating through the catalog
        #[arg(short, long, value_delimiter = ',')]
        templates: Option<Vec<String>>,

        /// Add the plan's template list instead of rotating through the catalog
        #[arg(long, conflicts_with = "templates")]
        planned: bool,

        /// Write content-enhanced.json instead of overwriting content.json
        #[arg(long)]
        enhanced: bool,
    },

    /// Append planned diagrams to every chapter with a template list
    Batch {
        /// Overwrite content.json instead of writing content-enhanced.json
        #[arg(long)]
        in_place: bool,
    },

    /// Report manifest entries that do not match the template catalog
    Check {
        /// Chapter to check, e.g. 03
        chapter: ChapterId,
    },

    /// List catalog templates and their placeholder keys
    Templates,

    /// Show the distribution plan
    Plan,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Documentation commands need no config
    if let Command::Templates = cli.command {
        print_templates(&TemplateCatalog::builtin());
        return;
    }

    let config = match &cli.config {
        Some(path) => match AuthoringConfig::from_file(cli.root.clone(), path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => AuthoringConfig::new(cli.root.clone()),
    };
    let authoring = Authoring::new(config);

    let code = match cli.command {
        Command::Add {
            chapter,
            chapter_flag,
            templates,
            planned,
            enhanced,
        } => {
            let target = if enhanced {
                OutputTarget::Enhanced
            } else {
                OutputTarget::InPlace
            };
            run_add(&authoring, chapter.or(chapter_flag), templates, planned, target)
        }
        Command::Batch { in_place } => {
            let target = if in_place {
                OutputTarget::InPlace
            } else {
                OutputTarget::Enhanced
            };
            run_batch(&authoring, target)
        }
        Command::Check { chapter } => run_check(&authoring, chapter),
        Command::Plan => {
            print_plan(&authoring);
            0
        }
        Command::Templates => 0,
    };

    if code != 0 {
        std::process::exit(code);
    }
}

fn run_add(
    authoring: &Authoring<'_>,
    chapter: Option<ChapterId>,
    templates: Option<Vec<String>>,
    planned: bool,
    target: OutputTarget,
) -> i32 {
    let Some(chapter) = chapter else {
        let err = AuthorError::MissingChapter {
            available: authoring.plan().available(),
        };
        eprintln!("Error: {}", err);
        eprintln!("Usage: chapter-diagrams add <NN> [--templates architecture,flowchart]");
        return 1;
    };

    let mut request = ChapterRequest::new(chapter)
        .with_planned_list(planned)
        .with_target(target);
    if let Some(list) = templates {
        request = request.with_templates(list);
    }

    match authoring.add_diagrams(&request) {
        Ok(report) => {
            print_add_report(&report);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn run_batch(authoring: &Authoring<'_>, target: OutputTarget) -> i32 {
    println!("Batch adding diagrams to all planned chapters...");
    println!();

    let report = authoring.run_batch(target);
    for done in &report.succeeded {
        println!(
            "Chapter {}: added {} ({} total) -> {}",
            done.chapter,
            join_templates(done),
            done.total(),
            done.path.display()
        );
    }
    for failure in &report.failed {
        eprintln!("Error processing chapter {}: {}", failure.chapter, failure.error);
    }

    println!();
    println!(
        "{} chapter(s) updated, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    if target == OutputTarget::Enhanced && !report.succeeded.is_empty() {
        println!();
        println!("Next steps:");
        println!("   1. Review and customize placeholder content in each content-enhanced.json");
        println!("   2. Replace content.json once the placeholders are filled in");
        println!("   3. Insert diagram references into the chapter markdown");
    }

    if report.is_success() {
        0
    } else {
        1
    }
}

fn run_check(authoring: &Authoring<'_>, chapter: ChapterId) -> i32 {
    match authoring.check_chapter(chapter) {
        Ok(issues) if issues.is_empty() => {
            println!("Chapter {}: all diagram entries match the catalog", chapter);
            0
        }
        Ok(issues) => {
            for issue in &issues {
                println!(
                    "Chapter {} diagram #{} ({}): {}",
                    chapter,
                    issue.index + 1,
                    issue.template.as_deref().unwrap_or("no template"),
                    issue.message
                );
            }
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn join_templates(report: &ChapterReport) -> String {
    report
        .added
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_add_report(report: &ChapterReport) {
    println!(
        "Added {} diagrams to chapter {}",
        report.added.len(),
        report.chapter
    );
    println!("   Previous diagrams: {}", report.existing);
    println!("   Total diagrams: {}", report.total());
    println!("   Templates: {}", join_templates(report));
    println!("Updated {}", report.path.display());
    println!();
    println!("Next steps:");
    println!("   1. Edit the manifest to fill in diagram details");
    println!(
        "   2. Render the diagrams for chapter {} from the manifest",
        report.chapter
    );
    println!("   3. Insert diagram references into the chapter markdown");
}

fn print_templates(catalog: &TemplateCatalog) {
    println!("DIAGRAM TEMPLATES");
    println!("=================");
    for def in catalog.iter() {
        println!();
        println!("{} ({} placeholders)", def.kind, def.defaults.len());
        for (key, value) in &def.defaults {
            println!("    {:<24} {}", key, value);
        }
    }
}

fn print_plan(authoring: &Authoring<'_>) {
    println!("DISTRIBUTION PLAN");
    println!("=================");
    for (chapter, allocation) in authoring.plan().chapters() {
        match allocation {
            ChapterAllocation::Count(n) => {
                println!("{}  {} diagram(s), rotated through the catalog", chapter, n)
            }
            ChapterAllocation::Templates(list) => println!(
                "{}  {}",
                chapter,
                list.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
            ),
        }
    }
}
