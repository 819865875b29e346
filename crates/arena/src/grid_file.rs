//! Grid files.
//!
//! Text files hold one grid row per line. A row is either separated tokens
//! (`0 1 0` or `0,1,0`) or a compact run of characters where `0`/`.` is free
//! and `1`/`#` is an obstacle. Blank lines are ignored.
//!
//! Files with a `.npy` extension are NumPy arrays: 2-D, of an integer or
//! boolean dtype, holding only 0 and 1.

use npyz::{DType, NpyFile, Order, TypeChar};
use pursuit_core::{Grid, PursuitError, Result, FREE, OBSTACLE};
use std::fs;
use std::path::Path;

/// Load a grid from a text or `.npy` file, chosen by extension.
///
/// # Errors
/// Returns an error if the file cannot be read or does not describe a
/// rectangular 0/1 grid.
pub fn load_grid(path: impl AsRef<Path>) -> Result<Grid> {
    let path = path.as_ref();
    let is_npy = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("npy"));
    if is_npy {
        parse_npy(&fs::read(path)?)
    } else {
        parse_grid(&fs::read_to_string(path)?)
    }
}

/// Parse a grid from the bytes of a `.npy` file.
pub fn parse_npy(bytes: &[u8]) -> Result<Grid> {
    let npy = NpyFile::new(bytes).map_err(|e| invalid(format!("bad npy header: {}", e)))?;

    let (rows, cols) = match *npy.shape() {
        [rows, cols] => (rows as usize, cols as usize),
        ref shape => return Err(invalid(format!("expected a 2-D array, found shape {:?}", shape))),
    };
    let order = npy.order();

    let DType::Plain(type_str) = npy.dtype() else {
        return Err(invalid("expected a plain integer dtype".to_string()));
    };
    let values = match (type_str.type_char(), type_str.num_bytes()) {
        (TypeChar::Bool, _) => read_values::<bool>(npy)?,
        (TypeChar::Int, Some(1)) => read_values::<i8>(npy)?,
        (TypeChar::Int, Some(2)) => read_values::<i16>(npy)?,
        (TypeChar::Int, Some(4)) => read_values::<i32>(npy)?,
        (TypeChar::Int, Some(8)) => read_values::<i64>(npy)?,
        (TypeChar::Uint, Some(1)) => read_values::<u8>(npy)?,
        (TypeChar::Uint, Some(2)) => read_values::<u16>(npy)?,
        (TypeChar::Uint, Some(4)) => read_values::<u32>(npy)?,
        (TypeChar::Uint, Some(8)) => read_values::<u64>(npy)?,
        _ => return Err(invalid(format!("expected an integer array, found dtype {}", type_str))),
    };

    let cell = |r: usize, c: usize| -> Result<u8> {
        let index = match order {
            Order::C => r * cols + c,
            Order::Fortran => c * rows + r,
        };
        match values.get(index) {
            Some(0) => Ok(FREE),
            Some(1) => Ok(OBSTACLE),
            Some(v) => Err(invalid(format!("cell ({}, {}) is {}, expected 0 or 1", r, c, v))),
            None => Err(invalid(format!("array ends before cell ({}, {})", r, c))),
        }
    };
    let grid_rows = (0..rows)
        .map(|r| (0..cols).map(|c| cell(r, c)).collect::<Result<Vec<_>>>())
        .collect::<Result<Vec<_>>>()?;

    Grid::from_rows(grid_rows)
}

fn read_values<T: npyz::Deserialize + Into<i128>>(npy: NpyFile<&[u8]>) -> Result<Vec<i128>> {
    let values: Vec<T> = npy
        .into_vec()
        .map_err(|e| invalid(format!("bad npy data: {}", e)))?;
    Ok(values.into_iter().map(Into::into).collect())
}

fn invalid(message: String) -> PursuitError {
    PursuitError::InvalidGrid(message)
}

/// Parse a grid from its text form.
pub fn parse_grid(text: &str) -> Result<Grid> {
    let rows = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| parse_row(line_no, line))
        .collect::<Result<Vec<_>>>()?;

    Grid::from_rows(rows)
}

fn parse_row(line_no: usize, line: &str) -> Result<Vec<u8>> {
    let separated = line.contains(|c: char| c.is_whitespace() || c == ',');
    if separated {
        line.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                tok.parse::<u8>().map_err(|_| {
                    PursuitError::InvalidGrid(format!("line {}: invalid cell {:?}", line_no, tok))
                })
            })
            .collect()
    } else {
        line.chars()
            .map(|c| match c {
                '0' | '.' => Ok(FREE),
                '1' | '#' => Ok(OBSTACLE),
                other => Err(PursuitError::InvalidGrid(format!(
                    "line {}: unexpected character {:?}",
                    line_no, other
                ))),
            })
            .collect()
    }
}
