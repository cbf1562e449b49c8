//! Bitstream text output
use std::io::Write;

use itertools::Itertools;

use crate::{
    encoder::{Frame, NavMessage},
    Error,
};

impl Frame {
    /// Formats this [Frame]: a `F-{frame} SF-{subframe} ` header
    /// per subframe, then one 30 character line per word,
    /// then an empty line.
    pub fn format<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        for (index, subframe) in self.subframes.iter().enumerate() {
            writeln!(writer, "F-{} SF-{} ", self.number, index + 1)?;
            writeln!(writer, "{}", subframe.words().iter().join("\n"))?;
            writeln!(writer)?;
        }
        Ok(())
    }
}

impl NavMessage {
    /// Formats this [NavMessage], frame by frame
    pub fn format<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        for frame in self.frames() {
            frame.format(writer)?;
        }
        Ok(())
    }

    /// Dumps this [NavMessage] into a new file
    pub fn to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Error> {
        let fd = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(fd);
        self.format(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::encoder::Encoder;
    use crate::tests::toolkit::{g05_almanac, g05_ephemeris};

    #[test]
    fn frame_format() {
        let eph = g05_ephemeris();
        let almanac = g05_almanac();
        let frame = Encoder::new(&eph, &almanac).build_frame(2).unwrap();

        let mut buf = Vec::new();
        frame.format(&mut buf).unwrap();
        let content = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5 * 12);
        assert_eq!(lines[0], "F-2 SF-1 ");
        assert_eq!(lines[1], "100010110000000000000000010010");
        assert_eq!(lines[11], "");
        assert_eq!(lines[12], "F-2 SF-2 ");
        for (i, line) in lines.iter().enumerate() {
            match i % 12 {
                0 | 11 => {},
                _ => {
                    assert_eq!(line.len(), 30);
                    assert!(line.chars().all(|c| c == '0' || c == '1'));
                },
            }
        }
    }
}
