use crate::app::models::DefaultFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Embed static files into a generated Go source file"
)]
pub struct Cli {
    /// Source directory or single file to embed
    #[arg(long)]
    pub src: PathBuf,

    /// Output file; the generated source goes to stdout when omitted
    #[arg(long)]
    pub dst: Option<PathBuf>,

    /// Package name used in the generated file [default: main]
    #[arg(long)]
    pub pkg: Option<String>,

    /// Name of the string accessor function, "nil" to omit it [default: GetResStr]
    #[arg(long)]
    pub getresstrfn: Option<String>,

    /// Name of the byte slice accessor function, "nil" to omit it [default: GetResBytes]
    #[arg(long)]
    pub getresbytesfn: Option<String>,

    /// Prefix added to every embedded file key
    #[arg(long)]
    pub prefix: Option<String>,

    /// Comma separated file name patterns embedded as byte slices (e.g. '*.png,*.ico')
    #[arg(long, value_delimiter = ',')]
    pub byte: Option<Vec<String>>,

    /// Comma separated file name patterns embedded as strings (e.g. '*.txt,*.htm?')
    #[arg(long = "str", value_delimiter = ',')]
    pub str_patterns: Option<Vec<String>>,

    /// Format for files matching neither --byte nor --str [default: byte]
    #[arg(long, value_enum)]
    pub def: Option<DefaultFormat>,

    /// Path separator used in the embedded file keys
    #[arg(long)]
    pub sep: Option<String>,

    /// Do not print per-file status information
    #[arg(long)]
    pub silent: bool,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,
}
