mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use config::AppConfig;
use geonote_adapters::{
    present_detail, present_map_header, present_map_json, present_marker, present_nearby,
    present_photo_row, present_photos_json, present_thumbnail, FsNoteStore,
    FsThumbnailGenerator, KamadakExifReader, SystemClock, WalkdirFileScanner,
};
use geonote_application::{
    ApplicationError, GalleryService, ListPhotosCommand, LoadNoteCommand, MapViewCommand,
    NearbyCommand, OpenPhotoCommand, SaveNoteCommand, ThumbnailCommand,
};
use geonote_domain::{build_map_url, sanitize_note};

/// Browse photos, their GPS tags and notes
#[derive(Parser, Debug)]
#[command(name = "geonote", version)]
struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List photos under a folder, newest first
    List {
        dir: String,
        /// Only photos carrying GPS tags
        #[arg(long)]
        gps_only: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show details of one photo
    Show { photo: String },
    /// Read or write the note attached to a photo
    #[command(subcommand)]
    Note(NoteCommand),
    /// Map markers for geotagged photos
    Map {
        dir: String,
        /// Generate marker thumbnails
        #[arg(long)]
        thumbnails: bool,
        #[arg(long)]
        json: bool,
    },
    /// Photos within a radius (meters) of a location
    Nearby {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        radius: f64,
        #[arg(short, long, default_value_t = String::from("."))]
        dir: String,
    },
    /// Create (or reuse) a thumbnail
    Thumb {
        photo: String,
        #[arg(short, long)]
        size: Option<u32>,
    },
    /// Print a map link for a coordinate
    Url {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(short, long)]
        zoom: Option<u8>,
    },
}

#[derive(Subcommand, Debug)]
enum NoteCommand {
    Get {
        photo: String,
    },
    Set {
        photo: String,
        text: String,
        /// Squeeze blanks and drop empty lines before saving
        #[arg(long)]
        sanitize: bool,
    },
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

impl CommandError {
    fn from_application(context: &str, error: ApplicationError) -> Self {
        match error {
            ApplicationError::InvalidInput(_) | ApplicationError::Domain(_) => {
                Self::Usage(format!("{context}: {error}"))
            }
            _ => Self::Runtime(format!("{context}: {error}")),
        }
    }
}

fn main() -> ExitCode {
    logging::init_logging();
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::from(2);
        }
    };

    let service = build_gallery_service();
    match run_command(cli.command, &service, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_gallery_service() -> GalleryService {
    GalleryService::new(
        Box::new(WalkdirFileScanner),
        Box::new(KamadakExifReader),
        Box::new(FsNoteStore),
        Box::new(FsThumbnailGenerator),
        Box::new(SystemClock),
    )
}

fn run_command(
    command: Command,
    service: &GalleryService,
    config: &AppConfig,
) -> Result<(), CommandError> {
    match command {
        Command::List {
            dir,
            gps_only,
            json,
        } => {
            let photos = service
                .list_photos(ListPhotosCommand {
                    folder: dir,
                    gps_only,
                })
                .map_err(|error| CommandError::from_application("list failed", error))?;
            if json {
                let text = present_photos_json(&photos)
                    .map_err(|error| CommandError::Runtime(error.to_string()))?;
                println!("{text}");
                return Ok(());
            }
            if photos.is_empty() {
                println!("no photos found");
                return Ok(());
            }
            for photo in &photos {
                println!("{}", present_photo_row(photo));
            }
            Ok(())
        }
        Command::Show { photo } => {
            let detail = service
                .open_photo(OpenPhotoCommand { path: photo })
                .map_err(|error| CommandError::from_application("show failed", error))?;
            println!("{}", present_detail(&detail));
            Ok(())
        }
        Command::Note(NoteCommand::Get { photo }) => {
            println!("{}", service.load_note(LoadNoteCommand { path: photo }));
            Ok(())
        }
        Command::Note(NoteCommand::Set {
            photo,
            text,
            sanitize,
        }) => {
            let text = if sanitize { sanitize_note(&text) } else { text };
            let saved = service
                .save_note(SaveNoteCommand { path: photo, text })
                .map_err(|error| CommandError::from_application("note rejected", error))?;
            if !saved {
                return Err(CommandError::Runtime("failed to save note".to_string()));
            }
            println!("note saved");
            Ok(())
        }
        Command::Map {
            dir,
            thumbnails,
            json,
        } => {
            let view = service
                .map_view(MapViewCommand {
                    folder: dir,
                    thumbnail_cache: thumbnails.then(|| config.cache_dir.clone()),
                    thumbnail_size: config.marker_thumbnail_size,
                    zoom: config.map_zoom,
                })
                .map_err(|error| CommandError::from_application("map failed", error))?;
            if json {
                let text = present_map_json(&view)
                    .map_err(|error| CommandError::Runtime(error.to_string()))?;
                println!("{text}");
                return Ok(());
            }
            println!("{}", present_map_header(&view));
            for marker in &view.markers {
                println!("{}", present_marker(marker));
            }
            Ok(())
        }
        Command::Nearby {
            lat,
            lon,
            radius,
            dir,
        } => {
            let found = service
                .nearby(NearbyCommand {
                    folder: dir,
                    latitude: lat,
                    longitude: lon,
                    radius_meters: radius,
                })
                .map_err(|error| CommandError::from_application("nearby failed", error))?;
            log::info!("found {} photos", found.len());
            for nearby in &found {
                println!("{}", present_nearby(nearby));
            }
            Ok(())
        }
        Command::Thumb { photo, size } => {
            let artifact = service
                .thumbnail(ThumbnailCommand {
                    path: photo,
                    cache_root: config.cache_dir.clone(),
                    max_size: size.unwrap_or(config.thumbnail_size),
                })
                .map_err(|error| CommandError::from_application("thumbnail failed", error))?;
            println!("{}", present_thumbnail(&artifact));
            Ok(())
        }
        Command::Url { lat, lon, zoom } => {
            let url = build_map_url(lat, lon, zoom).ok_or_else(|| {
                CommandError::Usage(format!("coordinate out of range: {lat}, {lon}"))
            })?;
            println!("{url}");
            Ok(())
        }
    }
}
