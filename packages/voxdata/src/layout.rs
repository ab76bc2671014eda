//! Header parsing and region bounds for voxdata files.
//!
//! ```text
//! 0    "CMUFLITE" NUL
//! 9    voice short name, space padded, NUL terminated   (ends by 63)
//! 64   five u32 LE region sizes
//! 84   region 0  residual offsets      u32
//!      region 1  signal frame indices  u16
//!      region 2  mcep frame indices    u16
//!      region 3  residual samples      u8
//!      region 4  residual sizes        u8
//! ```
//!
//! All bounds are computed and checked here, before any view is built.

use std::fmt;
use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{VoxDataError, VoxDataResult};

/// Magic literal at offset 0.
pub const MAGIC: &[u8; 8] = b"CMUFLITE";
/// First byte of the voice name field.
pub const NAME_OFFSET: usize = 9;
/// End (exclusive) of the voice name field.
pub const NAME_END: usize = 64;
/// Offset of the five region sizes.
pub const SIZES_OFFSET: usize = 64;
/// Header length; region 0 starts here.
pub const HEADER_LEN: usize = 84;

/// The five data regions, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    ResidualOffsets,
    Frames,
    McepFrames,
    Residuals,
    ResidualSizes,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::ResidualOffsets,
        Region::Frames,
        Region::McepFrames,
        Region::Residuals,
        Region::ResidualSizes,
    ];

    /// Size in bytes of one element of the region's typed view.
    pub fn element_size(self) -> usize {
        match self {
            Region::ResidualOffsets => 4,
            Region::Frames | Region::McepFrames => 2,
            Region::Residuals | Region::ResidualSizes => 1,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::ResidualOffsets => "residual offsets",
            Region::Frames => "frames",
            Region::McepFrames => "mcep frames",
            Region::Residuals => "residuals",
            Region::ResidualSizes => "residual sizes",
        };
        f.write_str(name)
    }
}

/// Validated header: the voice name and the byte range of every region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLayout {
    voice_name: String,
    ranges: [Range<usize>; 5],
}

impl RegionLayout {
    /// Validate a whole voxdata image for `expected_name`.
    pub fn parse(bytes: &[u8], expected_name: &str) -> VoxDataResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(VoxDataError::Format(format!(
                "{} bytes is shorter than the {HEADER_LEN}-byte header",
                bytes.len()
            )));
        }
        if &bytes[..MAGIC.len()] != MAGIC || bytes[MAGIC.len()] != 0 {
            return Err(VoxDataError::Format("not a flite voxdata file".into()));
        }

        let found = name_field(bytes);
        if found.as_bytes() != expected_name.as_bytes() {
            return Err(VoxDataError::VoiceMismatch {
                expected: expected_name.to_string(),
                found,
            });
        }

        let mut ranges: [Range<usize>; 5] = Default::default();
        let mut start = HEADER_LEN;
        for region in Region::ALL {
            let at = SIZES_OFFSET + region.index() * 4;
            let size = LittleEndian::read_u32(&bytes[at..at + 4]) as usize;
            if size % region.element_size() != 0 {
                return Err(VoxDataError::Format(format!(
                    "{region} size {size} is not a multiple of {}",
                    region.element_size()
                )));
            }
            let end = start
                .checked_add(size)
                .filter(|&end| end <= bytes.len())
                .ok_or_else(|| {
                    VoxDataError::Format(format!(
                        "{region} region of {size} bytes at {start} runs past end of {} bytes",
                        bytes.len()
                    ))
                })?;
            ranges[region.index()] = start..end;
            start = end;
        }

        Ok(Self {
            voice_name: found,
            ranges,
        })
    }

    pub fn voice_name(&self) -> &str {
        &self.voice_name
    }

    /// Byte range of a region within the file.
    pub fn range(&self, region: Region) -> Range<usize> {
        self.ranges[region.index()].clone()
    }

    /// End of the last region; bytes beyond it are ignored.
    pub fn data_end(&self) -> usize {
        self.ranges[4].end
    }
}

/// Voice name stored in the header: up to the first NUL, padding trimmed.
fn name_field(bytes: &[u8]) -> String {
    let field = &bytes[NAME_OFFSET..NAME_END];
    let field = field
        .iter()
        .position(|&b| b == 0)
        .map_or(field, |nul| &field[..nul]);
    String::from_utf8_lossy(field).trim_matches(' ').to_string()
}
