mod logging;

use std::env;
use std::path::{Path, PathBuf};
use std::process;
use log::{error, info};
use unity_csproj_analyzers::csproj::{ProjectFilesGenerator, find_project_files};
use unity_csproj_analyzers::settings::{GenerationSettings, SETTINGS_FILE_NAME};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        // Use eprintln for usage info since logger isn't initialized yet
        eprintln!("Usage: {} <project_path> [csproj_file ...]", args[0]);
        eprintln!("  <project_path>: Unity project whose generated .csproj files get Roslyn analyzers");
        eprintln!("  [csproj_file]:  Project files to process (default: every .csproj in <project_path>)");
        eprintln!("Example: {} F:\\projects\\unity\\MyProject", args[0]);
        eprintln!("Note: Settings are read from <project_path>/{} if present.", SETTINGS_FILE_NAME);
        process::exit(1);
    }

    if let Err(e) = logging::init_logger() {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    info!("Unity csproj analyzers starting");
    info!("Command line arguments: {:?}", args);

    let project_root = PathBuf::from(&args[1]);
    let settings = match GenerationSettings::load_for_project(&project_root) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            process::exit(1);
        }
    };

    let project_files = if args.len() > 2 {
        args[2..].iter().map(PathBuf::from).collect()
    } else {
        match find_project_files(&project_root) {
            Ok(files) => files,
            Err(e) => {
                error!("Failed to find project files: {}", e);
                process::exit(1);
            }
        }
    };

    if project_files.is_empty() {
        info!("No project files found in {}", project_root.display());
    }

    let generator = ProjectFilesGenerator::new(project_root, settings);
    let failures = run(&generator, &project_files);

    info!(
        "Processed {} project files, {} failed",
        project_files.len(),
        failures
    );
    if failures > 0 {
        process::exit(1);
    }
}

/// Processes each project file, continuing past failures. Returns the number of failures.
fn run(generator: &ProjectFilesGenerator, project_files: &[PathBuf]) -> usize {
    project_files
        .iter()
        .filter(|path| !process_one(generator, path))
        .count()
}

fn process_one(generator: &ProjectFilesGenerator, path: &Path) -> bool {
    match generator.process_file(path) {
        Ok(_) => true,
        Err(e) => {
            error!("Failed to process {}: {}", path.display(), e);
            false
        }
    }
}
