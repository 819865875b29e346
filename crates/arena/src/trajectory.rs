//! CSV trajectory logs.

use crate::episode::Positions;
use pursuit_core::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Column header of a trajectory CSV.
pub const CSV_HEADER: &str = "a_row,a_col,b_row,b_col,c_row,c_col";

/// Write the header and one line per frame to `writer`.
pub fn write_trajectory<W: Write>(mut writer: W, trajectory: &[Positions]) -> io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for [a, b, c] in trajectory {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            a.row, a.col, b.row, b.col, c.row, c.col
        )?;
    }
    writer.flush()
}

/// Write a trajectory CSV to `path`, replacing any existing file.
pub fn write_trajectory_csv(path: impl AsRef<Path>, trajectory: &[Positions]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_trajectory(BufWriter::new(file), trajectory)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pursuit_core::Position;

    #[test]
    fn test_write_trajectory() {
        let frames = [
            [Position::new(0, 0), Position::new(1, 2), Position::new(3, 4)],
            [Position::new(0, 1), Position::new(1, 2), Position::new(3, 3)],
        ];
        let mut out = Vec::new();
        write_trajectory(&mut out, &frames).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "a_row,a_col,b_row,b_col,c_row,c_col\n0,0,1,2,3,4\n0,1,1,2,3,3\n");
    }

    #[test]
    fn test_empty_trajectory_has_header() {
        let mut out = Vec::new();
        write_trajectory(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", CSV_HEADER));
    }
}
