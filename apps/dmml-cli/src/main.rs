use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use dmml_core::{DmmlError, DmmlResult};
use dmml_layout::{LayoutLogic, config};
use dmml_scene::{BuiltinLayout, LayoutId, Scene};

#[derive(Parser)]
#[command(name = "dmml-cli")]
#[command(about = "DMML layout tool - inspect and resolve view layouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SceneArgs {
    /// Layout configuration (YAML, or JSON by extension)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Compare view rows
    #[arg(long)]
    rows: Option<u32>,
    /// Compare view columns
    #[arg(long)]
    columns: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in layouts
    Layouts,
    /// Print the description registered for a layout id
    Show {
        /// Layout id
        id: LayoutId,
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Resolve a layout against a fresh scene and list its views
    Views {
        /// Layout id
        id: LayoutId,
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Validate a layout configuration file
    Validate {
        /// Path to the configuration file
        config_path: PathBuf,
    },
}

fn main() -> DmmlResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layouts => cmd_layouts(),
        Commands::Show { id, scene } => cmd_show(id, &scene),
        Commands::Views { id, scene } => cmd_views(id, &scene),
        Commands::Validate { config_path } => cmd_validate(&config_path),
    }
}

fn build_logic(args: &SceneArgs) -> DmmlResult<LayoutLogic> {
    let mut logic = LayoutLogic::with_scene(Scene::new());
    if let Some(path) = &args.config {
        let config = config::load(path)?;
        logic.apply_config(&config)?;
    }
    if let Some(rows) = args.rows {
        logic.set_number_of_compare_view_rows(rows)?;
    }
    if let Some(columns) = args.columns {
        logic.set_number_of_compare_view_columns(columns)?;
    }
    Ok(logic)
}

fn cmd_layouts() -> DmmlResult<()> {
    let logic = build_logic(&SceneArgs {
        config: None,
        rows: None,
        columns: None,
    })?;
    let layout = logic.layout_node().ok_or_else(no_layout_node)?;

    println!("Built-in layouts:");
    for builtin in BuiltinLayout::ALL {
        let marker = if layout.is_layout_description(builtin.id()) {
            ""
        } else {
            " (no description)"
        };
        println!("  {:>4}  {}{}", builtin.id(), builtin.name(), marker);
    }
    Ok(())
}

fn cmd_show(id: LayoutId, args: &SceneArgs) -> DmmlResult<()> {
    let logic = build_logic(args)?;
    let layout = logic.layout_node().ok_or_else(no_layout_node)?;
    if !layout.is_layout_description(id) {
        return Err(DmmlError::InvalidArg {
            what: format!("no layout description registered for id {id}"),
        });
    }
    println!("{}", layout.layout_description(id));
    Ok(())
}

fn cmd_views(id: LayoutId, args: &SceneArgs) -> DmmlResult<()> {
    let mut logic = build_logic(args)?;
    logic.set_view_arrangement(id)?;

    let scene = logic.scene().ok_or_else(no_layout_node)?;
    let views = logic.view_nodes();
    debug!(id, count = views.len(), "resolved layout");
    if views.is_empty() {
        println!("Layout {id} shows no views");
        return Ok(());
    }

    println!("Layout {id} views:");
    for (index, &node) in views.iter().enumerate() {
        let Some(view) = scene.view_node(node) else {
            continue;
        };
        println!(
            "  {:>2}. {:<22} tag={:<10} name={:<10} label={}",
            index + 1,
            view.class_name(),
            view.singleton_tag().unwrap_or("-"),
            view.name(),
            view.layout_label()
        );
    }
    Ok(())
}

fn cmd_validate(config_path: &Path) -> DmmlResult<()> {
    println!("Validating layout config: {}", config_path.display());
    let config = config::load(config_path)?;
    println!(
        "✓ Config is valid ({} custom layout(s))",
        config.layouts.len()
    );
    Ok(())
}

fn no_layout_node() -> DmmlError {
    DmmlError::Invariant {
        what: "layout logic has no layout node".to_string(),
    }
}
