use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use hanzi_config::Config;
use serde::{Deserialize, Serialize};

const MAIN_PROFILE: &str = "main";

/// Load the default config shipped in the repo, or built-in defaults without one
fn load_repo_default_config() -> anyhow::Result<Config> {
    let path = Path::new("config.json");
    if !path.exists() {
        tracing::info!("No repo config.json, using built-in defaults");
        return Ok(Config::default());
    }

    tracing::info!("Loading repo default config...");
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader).context("Invalid config.json")?;
    Ok(config)
}

/// Per-user config directory for the app
pub fn config_root() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir().context("No config directory for this platform")?;
    Ok(dir.join("hanzi"))
}

fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

fn profile_path(root: &Path, name: &str) -> PathBuf {
    profiles_dir(root).join(format!("{name}.json"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(profile.value)
}

fn write_profile(path: &Path, profile: &Profile) -> anyhow::Result<()> {
    fs::write(path, serde_json::to_string_pretty(profile)?)?;
    Ok(())
}

/// Initialize user config folders and main profile if missing
pub fn init_user_config(root: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(profiles_dir(root))?;

    let main_profile = profile_path(root, MAIN_PROFILE);

    if !main_profile.exists() {
        // Use repo default as the initial main profile
        let profile = Profile {
            name: MAIN_PROFILE.into(),
            value: load_repo_default_config()?,
        };
        write_profile(&main_profile, &profile)?;
        tracing::info!("Created main profile in {}", root.display());
    }

    Ok(())
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(root: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profile_path(root, name);

    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or repo default");
    let main_file = profile_path(root, MAIN_PROFILE);
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        // First-run fallback to repo default
        load_repo_default_config()
    }
}

/// Add a new profile cloned from main, keeping an existing one untouched
pub fn add_profile_from_default(root: &Path, new_name: &str) -> anyhow::Result<PathBuf> {
    let file = profile_path(root, new_name);
    if file.exists() {
        tracing::info!("Profile {new_name} already exists");
        return Ok(file);
    }

    let profile = Profile {
        name: new_name.into(),
        value: load_user_profile(root, MAIN_PROFILE)?,
    };
    fs::create_dir_all(profiles_dir(root))?;
    write_profile(&file, &profile)?;
    tracing::info!("Created new profile: {new_name}");
    Ok(file)
}
