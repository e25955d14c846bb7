// STD Dependencies -----------------------------------------------------------
use std::collections::HashMap;
use std::io::{Error as IOError, ErrorKind};
use std::path::{Path, PathBuf};


// External Dependencies ------------------------------------------------------
use file_io::{FileError, FileWriter};


// Internal Dependencies ------------------------------------------------------
use crate::color::Color;
use crate::image::SourceImage;


// Mock Images ----------------------------------------------------------------
pub const GREYS: [Color; 4] = [
    Color { r: 255, g: 255, b: 255 },
    Color { r: 170, g: 170, b: 170 },
    Color { r: 85, g: 85, b: 85 },
    Color { r: 0, g: 0, b: 0 }
];

/// RGBA image where every digit selects an entry of `colors`.
pub fn image_from_rows(rows: &[&str], colors: &[Color]) -> SourceImage {
    let width = rows[0].len();
    let mut pixels = Vec::with_capacity(width * rows.len() * 4);
    for row in rows {
        assert_eq!(row.len(), width, "Mock image rows must have equal length");
        for digit in row.bytes() {
            let color = colors[(digit - b'0') as usize];
            pixels.extend_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }
    SourceImage::rgba(width, rows.len(), pixels)
}

/// 16x16 image made up from four 8x8 quadrants.
pub fn quadrants(
    top_left: [&str; 8],
    top_right: [&str; 8],
    bottom_left: [&str; 8],
    bottom_right: [&str; 8],
    colors: &[Color]

) -> SourceImage {
    let mut rows = Vec::with_capacity(16);
    for (left, right) in [(top_left, top_right), (bottom_left, bottom_right)].iter() {
        for y in 0..8 {
            rows.push(format!("{}{}", left[y], right[y]));
        }
    }
    let rows: Vec<&str> = rows.iter().map(|r| r.as_str()).collect();
    image_from_rows(&rows, colors)
}


// Mock Files -----------------------------------------------------------------
#[derive(Default)]
pub struct MockFiles {
    files: HashMap<PathBuf, Vec<u8>>,
    fail: bool
}

impl MockFiles {
    pub fn failing() -> Self {
        Self {
            files: HashMap::new(),
            fail: true
        }
    }

    pub fn written(&self, path: &Path) -> Option<&Vec<u8>> {
        self.files.get(path)
    }
}

impl FileWriter for MockFiles {
    fn write_binary_file(&mut self, path: &Path, data: Vec<u8>) -> Result<(), FileError> {
        if self.fail {
            Err(FileError::new(path, IOError::new(ErrorKind::PermissionDenied, "Mock write failure")))

        } else {
            self.files.insert(path.to_path_buf(), data);
            Ok(())
        }
    }
}
