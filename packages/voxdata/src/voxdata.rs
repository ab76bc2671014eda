//! Memory-mapped voxdata file and the typed views over it.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::{VoxDataError, VoxDataResult};
use crate::layout::{Region, RegionLayout};

/// File extension of voxdata files.
pub const VOXDATA_EXTENSION: &str = "voxdata";

/// Read-only mapping of one voice's acoustic data.
///
/// The mapping is immutable for its whole life, so a `VoxData` can be shared
/// between any number of synthesis threads.
#[derive(Debug)]
pub struct VoxData {
    map: Mmap,
    layout: RegionLayout,
    path: PathBuf,
}

/// The five regions as typed slices borrowed from the mapping.
#[derive(Debug, Clone, Copy)]
pub struct UnitViews<'a> {
    /// Per-unit offsets into `residuals`
    pub residual_offsets: &'a [u32],
    /// Signal frame indices
    pub frames: &'a [u16],
    /// Spectral (mcep) frame indices
    pub mcep_frames: &'a [u16],
    /// Residual sample bytes
    pub residuals: &'a [u8],
    /// Residual size bytes
    pub residual_sizes: &'a [u8],
}

impl VoxData {
    /// Map `path` and validate it as voxdata for `voice_name`.
    pub fn open<P: AsRef<Path>>(path: P, voice_name: &str) -> VoxDataResult<Self> {
        let path = path.as_ref();
        let io_err = |source| VoxDataError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        // SAFETY: the mapping is read-only and never handed out mutably. Voice
        // data files are not modified while a voice is loaded.
        let map = unsafe { Mmap::map(&file) }.map_err(io_err)?;

        // on any error below `map` is dropped, releasing the mapping
        let layout = RegionLayout::parse(&map, voice_name)?;
        check_views(&map, &layout)?;

        tracing::debug!(
            path = %path.display(),
            voice = voice_name,
            mapped = map.len(),
            data_end = layout.data_end(),
            "mapped voxdata"
        );

        Ok(Self {
            map,
            layout,
            path: path.to_path_buf(),
        })
    }

    /// Open `<dir>/<voice_name>.voxdata`.
    pub fn open_in_dir<P: AsRef<Path>>(dir: P, voice_name: &str) -> VoxDataResult<Self> {
        let path = dir
            .as_ref()
            .join(format!("{voice_name}.{VOXDATA_EXTENSION}"));
        Self::open(path, voice_name)
    }

    pub fn voice_name(&self) -> &str {
        self.layout.voice_name()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    /// Length of the mapping in bytes.
    pub fn mapped_len(&self) -> usize {
        self.map.len()
    }

    /// Raw bytes of one region.
    pub fn region(&self, region: Region) -> &[u8] {
        &self.map[self.layout.range(region)]
    }

    /// Typed views of all five regions. No data is copied.
    pub fn views(&self) -> UnitViews<'_> {
        // alignment and length were checked in `open`
        UnitViews {
            residual_offsets: bytemuck::cast_slice(self.region(Region::ResidualOffsets)),
            frames: bytemuck::cast_slice(self.region(Region::Frames)),
            mcep_frames: bytemuck::cast_slice(self.region(Region::McepFrames)),
            residuals: self.region(Region::Residuals),
            residual_sizes: self.region(Region::ResidualSizes),
        }
    }
}

/// The multi-byte regions must cast to native integers in place.
fn check_views(bytes: &[u8], layout: &RegionLayout) -> VoxDataResult<()> {
    if cfg!(target_endian = "big") {
        return Err(VoxDataError::Format(
            "voxdata views need a little-endian host".into(),
        ));
    }
    let misaligned = |region: Region| {
        VoxDataError::Format(format!("{region} region is not aligned for in-place access"))
    };
    bytemuck::try_cast_slice::<u8, u32>(&bytes[layout.range(Region::ResidualOffsets)])
        .map_err(|_| misaligned(Region::ResidualOffsets))?;
    for region in [Region::Frames, Region::McepFrames] {
        bytemuck::try_cast_slice::<u8, u16>(&bytes[layout.range(region)])
            .map_err(|_| misaligned(region))?;
    }
    Ok(())
}
