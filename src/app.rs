// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    let args = Cli::parse();

    // Recorded in the generated header so the file can be reproduced
    let invocation = env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");

    run_with(args, &invocation)
}

pub fn run_with(args: Cli, invocation: &str) -> Result<()> {
    // 1. Resolve Configuration
    let config = resolve_config(args)?;

    // 2. Walk the source
    let scanner = Scanner::new(&config)?;
    let sink = scanner.scan()?;

    // 3. Render
    let output = OutputGenerator::generate(&sink, &config, invocation);

    // 4. Write to the destination or stdout
    match &config.destination {
        Some(dst) => {
            write_file(dst, &output)?;
            if !config.silent {
                println!("File successfully created: {}", dst.display());
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write generated source to stdout")?;
        }
    }

    Ok(())
}

fn write_file(dst: &Path, output: &str) -> Result<()> {
    let file = File::create(dst).with_context(|| {
        format!(
            "Error opening destination file \"{}\" for writing",
            dst.display()
        )
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(output.as_bytes())
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write \"{}\"", dst.display()))?;
    writer
        .get_ref()
        .sync_all()
        .with_context(|| format!("Failed to sync \"{}\"", dst.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_generated_file_to_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("data");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.txt"), "hello\n").unwrap();
        fs::write(src.join("b.bin"), [0u8, 1, 2]).unwrap();
        let dst = dir.path().join("out.go");

        let args = Cli::try_parse_from([
            "resembed",
            "--src",
            src.to_str().unwrap(),
            "--dst",
            dst.to_str().unwrap(),
            "--pkg",
            "res",
            "--str",
            "*.txt",
            "--def",
            "byte",
            "--silent",
        ])
        .unwrap();

        run_with(args, "resembed --pkg res").unwrap();

        let written = fs::read_to_string(&dst).unwrap();
        assert!(written.starts_with("// Code generated by `resembed --pkg res`; DO NOT EDIT.\n"));
        assert!(written.contains("\npackage res\n"));
        assert!(written.contains("var byteFiles = map[string][]byte{\n\t\"b.bin\": []byte{0, 1, 2}}\n"));
        assert!(written.contains("var strFiles = map[string]string{\n\t\"a.txt\": \"hello\\n\"}\n"));
        assert!(written.contains("func GetResBytes(name string) []byte {"));
        assert!(written.contains("func GetResStr(name string) (string, bool) {"));
    }

    #[test]
    fn rerun_produces_identical_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("data");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested").join("x.css"), "a{}").unwrap();
        fs::write(src.join("y.js"), "var y;").unwrap();
        let dst = dir.path().join("out.go");

        let argv = [
            "resembed",
            "--src",
            src.to_str().unwrap(),
            "--dst",
            dst.to_str().unwrap(),
            "--def",
            "both",
            "--sep",
            "/",
            "--silent",
        ];

        run_with(Cli::try_parse_from(argv).unwrap(), "gen").unwrap();
        let first = fs::read(&dst).unwrap();
        run_with(Cli::try_parse_from(argv).unwrap(), "gen").unwrap();
        let second = fs::read(&dst).unwrap();

        assert_eq!(first, second);
        assert!(String::from_utf8(first).unwrap().contains("\"nested/x.css\": \"a{}\""));
    }

    #[test]
    fn unwritable_destination_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let dst = dir.path().join("missing").join("out.go");

        let args = Cli::try_parse_from([
            "resembed",
            "--src",
            dir.path().to_str().unwrap(),
            "--dst",
            dst.to_str().unwrap(),
            "--silent",
        ])
        .unwrap();

        let err = run_with(args, "gen").unwrap_err();
        assert!(format!("{:#}", err).contains("Error opening destination file"));
    }
}
