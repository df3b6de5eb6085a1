use crate::app::cli::Cli;
use crate::app::models::{DefaultFormat, RunConfig};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

const DEFAULT_PACKAGE: &str = "main";
const DEFAULT_STR_FN: &str = "GetResStr";
const DEFAULT_BYTES_FN: &str = "GetResBytes";
/// Accessor name that disables generating the accessor.
const DISABLED_FN: &str = "nil";

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PresetConfig {
    pkg: Option<String>,
    getresstrfn: Option<String>,
    getresbytesfn: Option<String>,
    prefix: Option<String>,
    byte: Option<Vec<String>>,
    str: Option<Vec<String>>,
    def: Option<DefaultFormat>,
    sep: Option<String>,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("resembed").join("presets.toml"))
}

pub fn load_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

/// Preset entries first, then CLI entries, without blanks or duplicates.
fn merge_patterns(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| !item.is_empty() && seen.insert(item.clone()));
    combined
}

fn accessor_name(value: Option<String>, default: &str) -> Option<String> {
    match value.as_deref() {
        None | Some("") => Some(default.to_string()),
        Some(DISABLED_FN) => None,
        Some(name) => Some(name.to_string()),
    }
}

pub fn resolve_config(cli: Cli) -> Result<RunConfig> {
    let presets = match cli.preset {
        Some(_) => load_presets_file(&presets_path()?)?,
        None => HashMap::new(),
    };
    resolve_with_presets(cli, &presets)
}

pub fn resolve_with_presets(cli: Cli, presets: &HashMap<String, PresetConfig>) -> Result<RunConfig> {
    let preset = match cli.preset.as_deref() {
        Some(name) => match presets.get(name) {
            Some(preset) => preset.clone(),
            None => bail!("Unknown preset \"{}\"", name),
        },
        None => PresetConfig::default(),
    };

    let package_name = cli
        .pkg
        .or(preset.pkg)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PACKAGE.to_string());

    // The platform separator needs no rewriting.
    let path_sep = cli
        .sep
        .or(preset.sep)
        .filter(|s| !s.is_empty() && s != MAIN_SEPARATOR_STR);

    // Console output must stay a clean Go file.
    let silent = cli.silent || cli.dst.is_none();

    Ok(RunConfig {
        source: cli.src,
        destination: cli.dst,
        package_name,
        bytes_fn: accessor_name(cli.getresbytesfn.or(preset.getresbytesfn), DEFAULT_BYTES_FN),
        str_fn: accessor_name(cli.getresstrfn.or(preset.getresstrfn), DEFAULT_STR_FN),
        prefix: cli.prefix.or(preset.prefix).unwrap_or_default(),
        byte_patterns: merge_patterns(preset.byte, cli.byte),
        str_patterns: merge_patterns(preset.str, cli.str_patterns),
        default_format: cli.def.or(preset.def).unwrap_or_default(),
        path_sep,
        silent,
    })
}
