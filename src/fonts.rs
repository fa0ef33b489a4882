/*
 *  fonts.rs
 *
 *  LyClock - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Matrix bitmap fonts: TINY (3x5) and SINCLAIR (5x7)
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use serde::{Deserialize, Serialize};

/// Font selector. `1`/`tiny` and `2`/`sinclair` in the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    #[default]
    Tiny,
    Sinclair,
}

/// One character bitmap. Each row holds `width` bits, MSB is the leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub width: u32,
    rows: &'static [u8],
}

impl Glyph {
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    #[inline]
    pub fn is_set(&self, col: u32, row: u32) -> bool {
        if col >= self.width {
            return false;
        }
        self.rows
            .get(row as usize)
            .is_some_and(|bits| (bits >> (self.width - 1 - col)) & 1 == 1)
    }
}

#[inline]
const fn g(width: u32, rows: &'static [u8]) -> Option<Glyph> {
    Some(Glyph { width, rows })
}

impl Font {
    /// Width of a regular cell; missing characters advance by this much.
    pub fn cell_width(self) -> u32 {
        match self {
            Font::Tiny => 3,
            Font::Sinclair => 5,
        }
    }

    pub fn height(self) -> u32 {
        match self {
            Font::Tiny => 5,
            Font::Sinclair => 7,
        }
    }

    /// Blank columns between glyphs.
    pub fn spacing(self) -> u32 {
        1
    }

    pub fn glyph(self, c: char) -> Option<Glyph> {
        match self {
            Font::Tiny => tiny(c),
            Font::Sinclair => sinclair(c),
        }
    }

    /// Parse the selector used by `LED_FONT` / `LED_TICKER_FONT`.
    pub fn from_selector(s: &str) -> Option<Font> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "tiny" => Some(Font::Tiny),
            "2" | "sinclair" => Some(Font::Sinclair),
            _ => None,
        }
    }
}

// 3x5, upper case only; lower case folds onto it
fn tiny(c: char) -> Option<Glyph> {
    match c.to_ascii_uppercase() {
        '0' => g(3, &[0b111, 0b101, 0b101, 0b101, 0b111]),
        '1' => g(3, &[0b010, 0b110, 0b010, 0b010, 0b111]),
        '2' => g(3, &[0b111, 0b001, 0b111, 0b100, 0b111]),
        '3' => g(3, &[0b111, 0b001, 0b111, 0b001, 0b111]),
        '4' => g(3, &[0b101, 0b101, 0b111, 0b001, 0b001]),
        '5' => g(3, &[0b111, 0b100, 0b111, 0b001, 0b111]),
        '6' => g(3, &[0b111, 0b100, 0b111, 0b101, 0b111]),
        '7' => g(3, &[0b111, 0b001, 0b010, 0b100, 0b100]),
        '8' => g(3, &[0b111, 0b101, 0b111, 0b101, 0b111]),
        '9' => g(3, &[0b111, 0b101, 0b111, 0b001, 0b111]),
        'A' => g(3, &[0b010, 0b101, 0b111, 0b101, 0b101]),
        'B' => g(3, &[0b110, 0b101, 0b110, 0b101, 0b110]),
        'C' => g(3, &[0b111, 0b100, 0b100, 0b100, 0b111]),
        'D' => g(3, &[0b110, 0b101, 0b101, 0b101, 0b110]),
        'E' => g(3, &[0b111, 0b100, 0b110, 0b100, 0b111]),
        'F' => g(3, &[0b111, 0b100, 0b110, 0b100, 0b100]),
        'G' => g(3, &[0b011, 0b100, 0b101, 0b101, 0b011]),
        'H' => g(3, &[0b101, 0b101, 0b111, 0b101, 0b101]),
        'I' => g(3, &[0b111, 0b010, 0b010, 0b010, 0b111]),
        'J' => g(3, &[0b001, 0b001, 0b001, 0b101, 0b010]),
        'K' => g(3, &[0b101, 0b101, 0b110, 0b101, 0b101]),
        'L' => g(3, &[0b100, 0b100, 0b100, 0b100, 0b111]),
        'M' => g(3, &[0b101, 0b111, 0b111, 0b101, 0b101]),
        'N' => g(3, &[0b110, 0b101, 0b101, 0b101, 0b101]),
        'O' => g(3, &[0b010, 0b101, 0b101, 0b101, 0b010]),
        'P' => g(3, &[0b110, 0b101, 0b110, 0b100, 0b100]),
        'Q' => g(3, &[0b010, 0b101, 0b101, 0b110, 0b011]),
        'R' => g(3, &[0b110, 0b101, 0b110, 0b101, 0b101]),
        'S' => g(3, &[0b011, 0b100, 0b010, 0b001, 0b110]),
        'T' => g(3, &[0b111, 0b010, 0b010, 0b010, 0b010]),
        'U' => g(3, &[0b101, 0b101, 0b101, 0b101, 0b111]),
        'V' => g(3, &[0b101, 0b101, 0b101, 0b101, 0b010]),
        'W' => g(3, &[0b101, 0b101, 0b111, 0b111, 0b101]),
        'X' => g(3, &[0b101, 0b101, 0b010, 0b101, 0b101]),
        'Y' => g(3, &[0b101, 0b101, 0b010, 0b010, 0b010]),
        'Z' => g(3, &[0b111, 0b001, 0b010, 0b100, 0b111]),
        ':' => g(1, &[0b0, 0b1, 0b0, 0b1, 0b0]),
        '.' => g(1, &[0b0, 0b0, 0b0, 0b0, 0b1]),
        '-' => g(3, &[0b000, 0b000, 0b111, 0b000, 0b000]),
        '+' => g(3, &[0b000, 0b010, 0b111, 0b010, 0b000]),
        '/' => g(3, &[0b001, 0b001, 0b010, 0b100, 0b100]),
        '%' => g(3, &[0b101, 0b001, 0b010, 0b100, 0b101]),
        '°' => g(2, &[0b11, 0b11, 0b00, 0b00, 0b00]),
        _ => None,
    }
}

// 5x7, HD44780 style
fn sinclair(c: char) -> Option<Glyph> {
    match c {
        '0' => g(5, &[0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
        '1' => g(5, &[0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        '2' => g(5, &[0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
        '3' => g(5, &[0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110]),
        '4' => g(5, &[0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
        '5' => g(5, &[0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
        '6' => g(5, &[0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
        '7' => g(5, &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
        '8' => g(5, &[0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
        '9' => g(5, &[0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
        'A' => g(5, &[0b01110, 0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001]),
        'B' => g(5, &[0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110]),
        'C' => g(5, &[0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110]),
        'D' => g(5, &[0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100]),
        'E' => g(5, &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
        'F' => g(5, &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
        'G' => g(5, &[0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111]),
        'H' => g(5, &[0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        'I' => g(5, &[0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        'J' => g(5, &[0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100]),
        'K' => g(5, &[0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001]),
        'L' => g(5, &[0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
        'M' => g(5, &[0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001]),
        'N' => g(5, &[0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001]),
        'O' => g(5, &[0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'P' => g(5, &[0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000]),
        'Q' => g(5, &[0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101]),
        'R' => g(5, &[0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
        'S' => g(5, &[0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
        'T' => g(5, &[0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
        'U' => g(5, &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'V' => g(5, &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
        'W' => g(5, &[0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010]),
        'X' => g(5, &[0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001]),
        'Y' => g(5, &[0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100]),
        'Z' => g(5, &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111]),
        'a' => g(5, &[0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111]),
        'b' => g(5, &[0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110]),
        'c' => g(5, &[0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110]),
        'd' => g(5, &[0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111]),
        'e' => g(5, &[0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110]),
        'f' => g(5, &[0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000]),
        'g' => g(5, &[0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110]),
        'h' => g(5, &[0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001]),
        'i' => g(5, &[0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110]),
        'j' => g(5, &[0b00010, 0b00000, 0b00110, 0b00010, 0b00010, 0b10010, 0b01100]),
        'k' => g(5, &[0b10000, 0b10000, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010]),
        'l' => g(5, &[0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        'm' => g(5, &[0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10001, 0b10001]),
        'n' => g(5, &[0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001]),
        'o' => g(5, &[0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110]),
        'p' => g(5, &[0b00000, 0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000]),
        'q' => g(5, &[0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001]),
        'r' => g(5, &[0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000]),
        's' => g(5, &[0b00000, 0b00000, 0b01110, 0b10000, 0b01110, 0b00001, 0b11110]),
        't' => g(5, &[0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110]),
        'u' => g(5, &[0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b10011, 0b01101]),
        'v' => g(5, &[0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
        'w' => g(5, &[0b00000, 0b00000, 0b10001, 0b10001, 0b10101, 0b10101, 0b01010]),
        'x' => g(5, &[0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001]),
        'y' => g(5, &[0b00000, 0b10001, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110]),
        'z' => g(5, &[0b00000, 0b00000, 0b11111, 0b00010, 0b00100, 0b01000, 0b11111]),
        ':' => g(2, &[0b00, 0b11, 0b11, 0b00, 0b11, 0b11, 0b00]),
        '.' => g(2, &[0b00, 0b00, 0b00, 0b00, 0b00, 0b11, 0b11]),
        '-' => g(5, &[0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000]),
        '+' => g(5, &[0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000]),
        '/' => g(5, &[0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000]),
        '%' => g(5, &[0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011]),
        '°' => g(3, &[0b010, 0b101, 0b010, 0b000, 0b000, 0b000, 0b000]),
        _ => None,
    }
}
