//! `mydot <regex>...` — compile each regex, render it as Graphviz `.dot` source, then
//! rasterize it to `out/png/paramN.png` via the external `dot` process (§6.1, §6.3,
//! §4.11). Exit code 0 on success; 1 on any compile error or `dot` failure.

use clap::Parser;
use dandy::parser;
use std::fs;
use std::path::Path;
use std::process::{Command, ExitCode};

#[derive(Parser)]
#[command(name = "mydot", about = "Render regular expressions as Graphviz PNGs")]
struct Args {
    #[arg(required = true)]
    regexes: Vec<String>,
}

fn main() -> ExitCode {
    dandy_cli::logging::init();
    let args = Args::parse();

    let out_dir = Path::new("out/png");
    if let Err(e) = fs::create_dir_all(out_dir) {
        eprintln!("{}: {e}", out_dir.display());
        return ExitCode::FAILURE;
    }

    for (i, source) in args.regexes.iter().enumerate() {
        let regex = match parser::regex(source) {
            Ok(regex) => regex,
            Err(err) => {
                eprintln!("{}", err.render(source));
                return ExitCode::FAILURE;
            }
        };

        let dot_source = regex.to_nfa().to_dot();
        let dot_path = out_dir.join(format!("param{i}.dot"));
        let png_path = out_dir.join(format!("param{i}.png"));

        if let Err(e) = render_png(&dot_source, &dot_path, &png_path) {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        tracing::info!(path = %png_path.display(), "rendered regex to png");
    }

    ExitCode::SUCCESS
}

/// Writes `dot_source` to `dot_path`, then shells out to the `dot` binary to rasterize
/// it into `png_path`.
fn render_png(dot_source: &str, dot_path: &Path, png_path: &Path) -> Result<(), String> {
    fs::write(dot_path, dot_source).map_err(|e| format!("{}: {e}", dot_path.display()))?;

    let status = Command::new("dot")
        .args(["-Tpng", dot_path.to_str().unwrap(), "-o", png_path.to_str().unwrap()])
        .status()
        .map_err(|e| format!("failed to invoke `dot`: {e}"))?;

    if !status.success() {
        return Err(format!("`dot` exited with {status}"));
    }
    Ok(())
}
