// External Dependencies ------------------------------------------------------
use clap::{Arg, Command};


// CLI Interface --------------------------------------------------------------
pub fn app() -> Command<'static> {
    Command::new("png2gbtiles")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts images into GameBoy tile, palette and map data")
        .arg(Arg::new("INPUT_FILE")
            .help("Input image file")
            .required(true)
            .index(1)
        )
        .arg(Arg::new("MODE")
            .help("Output mode: tileset (gbr), tileset and map (gbm) or C source (csource)")
            .required(true)
            .possible_values(&["gbr", "gbm", "csource"])
            .index(2)
        )
        .arg(Arg::new("OUTPUT_FILE")
            .help("Output file, defaults to the input name with the extension of the output mode")
            .index(3)
        )
        .arg(Arg::new("dmg")
            .long("dmg")
            .short('g')
            .conflicts_with("cgb")
            .help("Force DMG mode, a single palette of 4 colors")
        )
        .arg(Arg::new("cgb")
            .long("cgb")
            .short('c')
            .help("Force CGB mode, up to 8 palettes of 4 colors")
        )
        .arg(Arg::new("no-dedupe")
            .long("no-dedupe")
            .short('d')
            .help("Keep every tile, even exact duplicates")
        )
        .arg(Arg::new("no-flip-dedupe")
            .long("no-flip-dedupe")
            .short('f')
            .help("Do not merge tiles that only differ by flipping")
        )
        .arg(Arg::new("no-palette-dedupe")
            .long("no-palette-dedupe")
            .short('p')
            .help("Do not merge tiles that only differ in their palette")
        )
        .arg(Arg::new("ignore-palette-errors")
            .long("ignore-palette-errors")
            .short('i')
            .help("Substitute the nearest available color instead of failing on palette errors")
        )
        .arg(Arg::new("pal")
            .long("pal")
            .takes_value(true)
            .value_name("FILE")
            .help("Remap colors to the palette in FILE, one RRGGBB color per line")
        )
        .arg(Arg::new("var")
            .long("var")
            .takes_value(true)
            .value_name("NAME")
            .help("Variable name prefix for C source output")
        )
        .arg(Arg::new("bank")
            .long("bank")
            .takes_value(true)
            .value_name("NUM")
            .validator(|v| parse_number(v).filter(|n| *n <= 0xFF).ok_or("expected a number in 0..=255"))
            .help("Bank number stored in the output")
        )
        .arg(Arg::new("tileorg")
            .long("tileorg")
            .takes_value(true)
            .value_name("NUM")
            .validator(|v| parse_number(v).filter(|n| *n <= 0xFF).ok_or("expected a number in 0..=255"))
            .help("Offset added to every tile id in the map")
        )
        .arg(Arg::new("tilesz")
            .long("tilesz")
            .takes_value(true)
            .value_name("SIZE")
            .possible_values(&["8x8", "8x16", "16x16", "32x32"])
            .help("Tile size, defaults to 8x8")
        )
        .arg(Arg::new("quiet")
            .short('q')
            .conflicts_with_all(&["errors-only", "verbose"])
            .help("Print nothing at all")
        )
        .arg(Arg::new("errors-only")
            .short('e')
            .conflicts_with("verbose")
            .help("Only print errors")
        )
        .arg(Arg::new("verbose")
            .short('v')
            .help("Print details about every conversion stage")
        )
}

/// Parses a decimal or `0x` prefixed hexadecimal number.
pub fn parse_number(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()

    } else {
        value.parse().ok()
    }
}


#[cfg(test)]
mod test {

    use super::{app, parse_number};

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("0"), Some(0));
        assert_eq!(parse_number("128"), Some(128));
        assert_eq!(parse_number("0x80"), Some(128));
        assert_eq!(parse_number("0XfF"), Some(255));
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("-1"), None);
        assert_eq!(parse_number("twelve"), None);
    }

    #[test]
    fn test_arguments() {
        let matches = app().try_get_matches_from(vec![
            "png2gbtiles", "level.png", "gbm", "-c", "-f", "--bank", "0x02", "--tilesz", "16x16"

        ]).unwrap();
        assert_eq!(matches.value_of("INPUT_FILE"), Some("level.png"));
        assert_eq!(matches.value_of("MODE"), Some("gbm"));
        assert_eq!(matches.value_of("OUTPUT_FILE"), None);
        assert!(matches.is_present("cgb"));
        assert!(matches.is_present("no-flip-dedupe"));
        assert!(!matches.is_present("no-dedupe"));
        assert_eq!(matches.value_of("bank"), Some("0x02"));
        assert_eq!(matches.value_of("tilesz"), Some("16x16"));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(app().try_get_matches_from(vec!["png2gbtiles", "level.png"]).is_err());
        assert!(app().try_get_matches_from(vec!["png2gbtiles", "level.png", "gbx"]).is_err());
        assert!(app().try_get_matches_from(vec!["png2gbtiles", "level.png", "gbr", "--bank", "256"]).is_err());
        assert!(app().try_get_matches_from(vec!["png2gbtiles", "level.png", "gbr", "-g", "-c"]).is_err());
        assert!(app().try_get_matches_from(vec!["png2gbtiles", "level.png", "gbr", "--tilesz", "8x4"]).is_err());
    }
}
