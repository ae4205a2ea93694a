//! Fixed-cell fonts: five column bytes per code point, bit 0 on top

use pixfont_core::{DrawSurface, FontFace, FontKind, Metrics, Rect, TextStyle};

use crate::blit::{choose_strategy, BlitStrategy, Pen, RunStream};

/// Data columns per cell; the rest of the cell width is spacing
pub const CELL_COLUMNS: usize = 5;

/// A font of identical cells addressed directly by code point 0..=255
#[derive(Debug, Clone, Copy)]
pub struct FixedCellFont {
    /// `CELL_COLUMNS` bytes per code point
    pub cells: &'static [u8],
    /// Cell width including spacing columns
    pub width: u8,
    /// Rows used from each column byte (at most 8)
    pub height: u8,
    pub baseline: u8,
}

impl FixedCellFont {
    pub const fn new(cells: &'static [u8], width: u8, height: u8, baseline: u8) -> Self {
        Self {
            cells,
            width,
            height,
            baseline,
        }
    }

    fn rows(&self) -> i32 {
        self.height.min(8) as i32
    }

    /// Columns drawn from the cell data; the last column of the cell is
    /// always spacing
    fn data_columns(&self) -> usize {
        (self.width as usize).saturating_sub(1).min(CELL_COLUMNS)
    }

    /// Column bytes for a code point after the charset remap
    ///
    /// The classic layout skips one cell from 0xB0 on, so 0xFF has no cell.
    pub fn columns(&self, code: u16, cp437: bool) -> Option<&'static [u8]> {
        if code > 0xFF {
            return None;
        }
        let mut cell = code as usize;
        if !cp437 && cell >= 0xB0 {
            cell += 1;
        }
        let start = cell * CELL_COLUMNS;
        self.cells.get(start..start + CELL_COLUMNS)
    }

    /// Draw one cell at `x`, `y`; returns the scaled advance, or 0 for code
    /// points above 0xFF
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, x: i32, y: i32, code: u16, style: &TextStyle) -> i32 {
        if code > 0xFF {
            return 0;
        }
        let pen = Pen::new(surface, style);
        let advance = self.width as i32 * pen.sx;
        let Some(columns) = self.columns(code, style.cp437) else {
            return advance;
        };
        let rows = self.rows();
        let data_cols = self.data_columns();
        let bounds = Rect::new(x, y, advance, rows * pen.sy);

        match choose_strategy(&pen.clip, style, bounds) {
            BlitStrategy::Skip => {},
            BlitStrategy::RectRuns => {
                surface.begin_write();
                let mut xpos = x;
                for &column in columns.iter().take(data_cols) {
                    let mut row = 0;
                    while row < rows {
                        let on = (column >> row) & 1 != 0;
                        // lowest set bit of the flipped column marks the next change
                        let flips = (column ^ if on { 0xFF } else { 0x00 }) >> row;
                        let len = if flips == 0 {
                            rows - row
                        } else {
                            (flips.trailing_zeros() as i32).min(rows - row)
                        };
                        pen.run(surface, on, xpos, y + row * pen.sy, pen.sx, len * pen.sy);
                        row += len;
                    }
                    xpos += pen.sx;
                }
                if pen.fill_bg {
                    pen.run(surface, false, xpos, y, x + advance - xpos, rows * pen.sy);
                }
                surface.end_write();
            },
            BlitStrategy::Stream => {
                surface.begin_write();
                surface.set_window(x, y, advance, rows);
                let mut stream = RunStream::default();
                for row in 0..rows {
                    for col in 0..self.width as usize {
                        let on = col < data_cols && columns.get(col).is_some_and(|c| (c >> row) & 1 != 0);
                        stream.push(surface, pen.color(on), pen.sx as u32);
                    }
                }
                stream.finish(surface);
                surface.end_write();
            },
        }
        advance
    }
}

impl FontFace for FixedCellFont {
    fn kind(&self) -> FontKind {
        FontKind::FixedCell
    }

    fn default_metrics(&self) -> Metrics {
        Metrics {
            width: self.width as i32,
            x_advance: self.width as i32,
            x_offset: 0,
            y_offset: 0,
            baseline: self.baseline as i32,
            y_advance: self.height as i32,
            height: self.height as i32,
        }
    }

    fn metrics_for(&self, code: u16) -> Option<Metrics> {
        (code <= 0xFF).then(|| self.default_metrics())
    }
}
