// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use pico_args::Arguments;

const HELP: &str = "\
svgcss prints computed CSS properties of SVG elements.

USAGE:
  svgcss [OPTIONS] <in-svg>  # from file
  svgcss [OPTIONS] -         # from stdin

OPTIONS:
  -h, --help                        Prints help information
  -V, --version                     Prints version information

  --property NAME                   Prints only the selected property.
                                    This option can be set multiple times
  --all                             Prints properties without declarations too.
                                    By default, only declared and inherited
                                    properties are printed
  --dpi DPI                         Sets the resolution
                                    [default: 96] [possible values: 10..4000 (inclusive)]
  --font-family FAMILY              Sets the default font family that will be
                                    used when no 'font-family' is present
                                    [default: Arial, Helvetica, sans-serif]
  --font-size SIZE                  Sets the 'medium' font size
                                    [default: 12] [possible values: 1..192 (inclusive)]
  --default-width LENGTH            Sets the viewport width used to resolve percentages
                                    [values: 1..4294967295 (inclusive)] [default: 100]
  --default-height LENGTH           Sets the viewport height used to resolve percentages
                                    [values: 1..4294967295 (inclusive)] [default: 100]
  --user-css PATH                   Loads a user style sheet
  --quiet                           Disables warnings

ARGS:
  <in-svg>                          Input file
";

#[derive(Debug)]
struct Args {
    properties: Vec<String>,
    all: bool,
    dpi: u32,
    font_family: Option<String>,
    font_size: u32,
    default_width: u32,
    default_height: u32,
    user_css: Option<PathBuf>,
    quiet: bool,
    input: String,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    Ok(Args {
        properties: input.values_from_str("--property")?,
        all: input.contains("--all"),
        dpi: input.opt_value_from_fn("--dpi", parse_dpi)?.unwrap_or(96),
        font_family: input.opt_value_from_str("--font-family")?,
        font_size: input
            .opt_value_from_fn("--font-size", parse_font_size)?
            .unwrap_or(12),
        default_width: input
            .opt_value_from_fn("--default-width", parse_length)?
            .unwrap_or(100),
        default_height: input
            .opt_value_from_fn("--default-height", parse_length)?
            .unwrap_or(100),
        user_css: input.opt_value_from_str("--user-css")?,
        quiet: input.contains("--quiet"),
        input: input.free_from_str()?,
    })
}

fn parse_dpi(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if (10..=4000).contains(&n) {
        Ok(n)
    } else {
        Err("DPI out of bounds".to_string())
    }
}

fn parse_font_size(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if n > 0 && n <= 192 {
        Ok(n)
    } else {
        Err("font size out of bounds".to_string())
    }
}

fn parse_length(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid length")?;

    if n > 0 {
        Ok(n)
    } else {
        Err("LENGTH cannot be zero".to_string())
    }
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}

fn process(args: Args) -> Result<(), String> {
    let (text, resources_dir) = if args.input == "-" {
        (load_stdin()?, None)
    } else {
        let text = std::fs::read_to_string(&args.input).map_err(|e| e.to_string())?;
        // Get input file absolute directory.
        let dir = std::fs::canonicalize(&args.input)
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));
        (text, dir)
    };

    let user_style_sheet = match args.user_css {
        Some(ref path) => Some(
            std::fs::read_to_string(path)
                .map_err(|_| format!("failed to read '{}'", path.display()))?,
        ),
        None => None,
    };

    let resolver: svgcss::StyleSheetResolverFn =
        Box::new(move |href: &str| load_style_sheet(resources_dir.as_deref(), href));

    let defaults = svgcss::Options::default();
    let opt = svgcss::Options {
        dpi: args.dpi as f32,
        font_family: args.font_family.unwrap_or(defaults.font_family),
        font_size: args.font_size as f32,
        viewport_size: (args.default_width as f32, args.default_height as f32),
        user_style_sheet,
        style_sheet_resolver: Some(resolver),
    };

    let doc = svgcss::StyledDocument::parse(&text, opt).map_err(|e| e.to_string())?;
    let registry = doc.engine().registry();

    let mut indices = Vec::new();
    for name in &args.properties {
        match registry.index_of(name) {
            Some(idx) => indices.push(idx),
            None => return Err(format!("unknown property '{}'", name)),
        }
    }

    if indices.is_empty() {
        indices.extend(0..registry.len());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for node in doc.xml().descendants().filter(|n| n.is_element()) {
        let style = match doc.computed_style(node) {
            Some(v) => v,
            None => continue,
        };

        let mut name = node.tag_name().name().to_string();
        if let Some(id) = node.attribute("id") {
            name.push('#');
            name.push_str(id);
        }

        let pos = doc.xml().text_pos_at(node.range().start);
        writeln!(out, "{} ({}:{})", name, pos.row, pos.col).map_err(|e| e.to_string())?;

        for idx in indices.iter().copied() {
            if !args.all && args.properties.is_empty() && style.is_null_cascaded(idx) {
                continue;
            }

            if let (Some(name), Some(value)) = (registry.property_name(idx), style.value(idx)) {
                writeln!(out, "  {}: {}", name, value).map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

fn load_style_sheet(resources_dir: Option<&Path>, href: &str) -> Option<String> {
    let path = match resources_dir {
        Some(dir) => dir.join(href),
        None => PathBuf::from(href),
    };

    match std::fs::read_to_string(&path) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Failed to load '{}' cause {}.", path.display(), e);
            None
        }
    }
}

fn load_stdin() -> Result<String, String> {
    let mut buf = String::new();
    let stdin = io::stdin();
    let mut handle = stdin.lock();

    handle
        .read_to_string(&mut buf)
        .map_err(|_| "failed to read from stdin".to_string())?;

    Ok(buf)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
