//! `vortex`: manage a planet canvas stored in a local directory.


use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vortex::bounds::calculate_bounds;
use vortex::camera::Point;
use vortex::canvas::{CanvasError, PlanetCanvas, PlanetDraft};
use vortex::config::Config;
use vortex::gateway::{PlanetStore, StoreError};
use vortex::image::{ImageFile, to_data_url};
use vortex::planet::{Planet, PlanetPatch};
use vortex::storage::FileStorage;
use vortex::validate::{Locale, ValidationError, validate_image};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read image {path}: {source}")]
    ReadImage { path: PathBuf, source: std::io::Error },
    #[error("invalid image: {0}")]
    Image(#[from] ValidationError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("planet with id {0} not found")]
    UnknownPlanet(String),
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn user_message(&self, locale: Locale) -> String {
        match self {
            Self::Image(e) => e.message(locale),
            Self::Canvas(e) => e.user_message(locale),
            Self::Store(e) => e.user_message(locale),
            Self::UnknownPlanet(id) => StoreError::NotFound(id.clone()).user_message(locale),
            Self::ReadImage { path, .. } => match locale {
                Locale::Es => format!("No se pudo leer la imagen {}", path.display()),
                Locale::En => format!("Could not read image {}", path.display()),
            },
            Self::Json(_) => match locale {
                Locale::Es => "No se pudo generar la salida JSON".to_owned(),
                Locale::En => "Could not render JSON output".to_owned(),
            },
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "vortex", about = "Manage the planets of a Vortex portal canvas")]
struct Cli {
    /// Directory holding the stored planets and viewport.
    #[arg(long, env = "VORTEX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Visible canvas width, used to place new planets.
    #[arg(long, default_value_t = 1280.0)]
    canvas_width: f64,

    /// Visible canvas height, used to place new planets.
    #[arg(long, default_value_t = 720.0)]
    canvas_height: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all planets.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print one planet as JSON.
    Show { id: String },
    /// Create a planet near the center of the stored viewport.
    Add(AddArgs),
    /// Change fields of an existing planet.
    Update(UpdateArgs),
    /// Delete a planet.
    Delete { id: String },
    /// Print the pannable bounds of the current planet set.
    Bounds,
    /// Inspect or change the stored viewport.
    Viewport {
        #[command(subcommand)]
        command: ViewportCommand,
    },
    /// Remove all planets (and optionally the viewport).
    Clear {
        #[arg(long)]
        viewport: bool,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    /// Image file to embed as a data URL.
    #[arg(long)]
    image: PathBuf,
    #[arg(long)]
    size: Option<f64>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Replacement image file.
    #[arg(long)]
    image: Option<PathBuf>,
    #[arg(long)]
    size: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    x: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    y: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum ViewportCommand {
    Show,
    Set {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
    },
    Reset,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {}", e.user_message(config.locale));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &Config) -> Result<(), CliError> {
    let store = PlanetStore::new(config.file_storage());
    tracing::debug!(dir = %config.data_dir.display(), "using planet store");

    match cli.command {
        Command::List { json } => list(&store, json),
        Command::Show { id } => {
            let planet = store.get_planet(&id).ok_or(CliError::UnknownPlanet(id))?;
            println!("{}", serde_json::to_string_pretty(&planet)?);
            Ok(())
        }
        Command::Add(args) => {
            let mut canvas = PlanetCanvas::mount(store, config);
            canvas.set_canvas_size(cli.canvas_width, cli.canvas_height);
            let draft = PlanetDraft {
                name: args.name,
                description: args.description,
                image_url: read_image_data_url(args.image)?,
                size: args.size,
            };
            let planet = canvas.create_planet(draft)?;
            println!("{}", planet.id);
            Ok(())
        }
        Command::Update(args) => update(store, config, args),
        Command::Delete { id } => {
            store.delete_planet(&id)?;
            Ok(())
        }
        Command::Bounds => {
            let bounds = calculate_bounds(&store.load_planets());
            println!("{}", serde_json::to_string_pretty(&bounds)?);
            Ok(())
        }
        Command::Viewport { command } => {
            match command {
                ViewportCommand::Show => {
                    let offset = store.load_viewport();
                    println!("{} {}", offset.x, offset.y);
                }
                ViewportCommand::Set { x, y } => store.save_viewport(Point::new(x, y)),
                ViewportCommand::Reset => store.clear_viewport(),
            }
            Ok(())
        }
        Command::Clear { viewport } => {
            store.clear_planets();
            if viewport {
                store.clear_viewport();
            }
            Ok(())
        }
    }
}

fn list(store: &PlanetStore<FileStorage>, json: bool) -> Result<(), CliError> {
    let planets = store.load_planets();
    if json {
        println!("{}", serde_json::to_string_pretty(&planets)?);
        return Ok(());
    }
    if planets.is_empty() {
        println!("No hay nada aquí");
        return Ok(());
    }
    for planet in &planets {
        println!("{}", summary(planet));
    }
    Ok(())
}

fn summary(planet: &Planet) -> String {
    format!(
        "{}  {:<50}  ({:.0}, {:.0})  size {:.0}",
        planet.id, planet.name, planet.position.x, planet.position.y, planet.size
    )
}

fn update(store: PlanetStore<FileStorage>, config: &Config, args: UpdateArgs) -> Result<(), CliError> {
    let position = match (args.x, args.y) {
        (None, None) => None,
        (x, y) => {
            let current = store
                .get_planet(&args.id)
                .ok_or_else(|| CliError::UnknownPlanet(args.id.clone()))?;
            Some(Point::new(x.unwrap_or(current.position.x), y.unwrap_or(current.position.y)))
        }
    };
    let image_url = match args.image {
        Some(path) => Some(read_image_data_url(path)?),
        None => None,
    };
    let patch = PlanetPatch {
        name: args.name,
        description: args.description,
        image_url,
        position,
        size: args.size,
    };
    let mut canvas = PlanetCanvas::mount(store, config);
    canvas.update_planet(&args.id, &patch)?;
    Ok(())
}

fn read_image_data_url(path: PathBuf) -> Result<String, CliError> {
    let file = match ImageFile::read(&path) {
        Ok(file) => file,
        Err(source) => return Err(CliError::ReadImage { path, source }),
    };
    validate_image(Some(&file))?;
    Ok(to_data_url(&file))
}
