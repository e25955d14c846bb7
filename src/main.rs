// STD Dependencies -----------------------------------------------------------
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;


// External Dependencies ------------------------------------------------------
use clap::ArgMatches;
use file_io::{DiskFiles, FileReader, Logger, Verbosity};
use tilemap::encoder::sanitize_name;
use tilemap::{parse_palette, ColorMode, ConversionOptions, Converter, OutputFormat, TileSize};


// Modules --------------------------------------------------------------------
mod cli;
mod config;
mod loader;


// CLI Interface --------------------------------------------------------------
fn main() {
    let mut logger = Logger::new();
    let matches = cli::app().get_matches();

    // Verbosity Flags
    if matches.is_present("quiet") {
        logger.set_verbosity(Verbosity::Quiet);

    } else if matches.is_present("errors-only") {
        logger.set_verbosity(Verbosity::ErrorsOnly);

    } else if matches.is_present("verbose") {
        logger.set_verbosity(Verbosity::Verbose);
    }

    let input = PathBuf::from(matches.value_of("INPUT_FILE").unwrap_or_default());
    let format = match OutputFormat::from_str(matches.value_of("MODE").unwrap_or_default()) {
        Ok(format) => format,
        Err(err) => {
            logger.error(Logger::format_error(err));
            process::exit(2);
        }
    };

    // Defaults < Configuration File < Arguments
    let mut options = ConversionOptions::new(format);
    match config::ConfigFile::try_load(&DiskFiles, &search_dir(&input)) {
        Ok(Some(config)) => {
            logger.info(format!("Loaded configuration from {}", config.path.display()));
            config.apply(&mut options);
        },
        Ok(None) => {},
        Err(err) => {
            logger.error(Logger::format_error(err.to_string()));
            process::exit(1);
        }
    }
    if let Err(err) = apply_arguments(&matches, &mut options) {
        logger.error(Logger::format_error(err));
        process::exit(2);
    }

    let output = matches.value_of("OUTPUT_FILE").map(PathBuf::from).unwrap_or_else(|| {
        output_path(&input, format)
    });
    options.var_name = match matches.value_of("var") {
        Some(name) => sanitize_name(name),
        None => variable_name(&output)
    };

    if let Err(err) = convert(&mut logger, &options, &input, &output) {
        logger.error(Logger::format_error(err));
        process::exit(1);
    }
    logger.flush();
}

fn convert(
    logger: &mut Logger,
    options: &ConversionOptions,
    input: &Path,
    output: &Path

) -> Result<(), String> {

    let remap = match &options.palette_file {
        Some(path) => {
            let text = DiskFiles.read_file(path).map_err(|err| {
                format!("Failed to read remap palette: {}", err)
            })?;
            let colors = parse_palette(&text).map_err(|err| err.to_string())?;
            logger.info(format!("Loaded {} color(s) from remap palette {}", colors.len(), path.display()));
            Some(colors)
        },
        None => None
    };

    let image = loader::load_image(input).map_err(|err| err.to_string())?;
    let converter = Converter::new(options);
    let conversion = converter.convert(logger, &image, remap.as_deref()).map_err(|err| err.to_string())?;

    // Substitutions are reported once all stages are done
    for message in conversion.diagnostics.messages() {
        logger.warning(message);
    }

    let len = converter.save(&mut DiskFiles, output, &conversion).map_err(|err| err.to_string())?;
    logger.status("Converted", format!(
        "\"{}\" into {} unique tile(s) with {} palette(s)",
        input.display(),
        conversion.unique.tiles.len(),
        conversion.palettes.len()
    ));
    logger.status("Written", format!("{} byte(s) to \"{}\"", len, output.display()));
    Ok(())
}

fn apply_arguments(matches: &ArgMatches, options: &mut ConversionOptions) -> Result<(), String> {
    if matches.is_present("dmg") {
        options.mode = Some(ColorMode::Dmg);

    } else if matches.is_present("cgb") {
        options.mode = Some(ColorMode::Cgb);
    }

    if matches.is_present("no-dedupe") {
        options.dedupe.pattern = false;
    }
    if matches.is_present("no-flip-dedupe") {
        options.dedupe.flips = false;
    }
    if matches.is_present("no-palette-dedupe") {
        options.dedupe.palettes = false;
    }
    if matches.is_present("ignore-palette-errors") {
        options.ignore_palette_errors = true;
    }

    if let Some(palette) = matches.value_of("pal") {
        options.palette_file = Some(PathBuf::from(palette));
    }
    if let Some(bank) = matches.value_of("bank") {
        options.bank = number_argument("bank", bank)? as u8;
    }
    if let Some(origin) = matches.value_of("tileorg") {
        options.tile_origin = number_argument("tileorg", origin)? as u16;
    }
    if let Some(size) = matches.value_of("tilesz") {
        options.tile_size = TileSize::from_str(size)?;
    }
    Ok(())
}

fn number_argument(name: &str, value: &str) -> Result<u32, String> {
    cli::parse_number(value).ok_or_else(|| {
        format!("Argument `{}` (\"{}\") is not a valid number", name, value)
    })
}


// Filenames ------------------------------------------------------------------
fn search_dir(input: &Path) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    match env::current_dir() {
        Ok(cwd) => cwd.join(dir),
        Err(_) => dir.to_path_buf()
    }
}

fn output_path(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

fn variable_name(output: &Path) -> String {
    match output.file_stem().and_then(|s| s.to_str()) {
        Some(stem) if !stem.is_empty() => sanitize_name(stem),
        _ => "tiles".to_string()
    }
}
