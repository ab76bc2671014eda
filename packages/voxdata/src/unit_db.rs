//! Per-voice binding slot for voxdata.

use std::path::Path;
use std::sync::Arc;

use crate::error::VoxDataResult;
use crate::voxdata::{UnitViews, VoxData};

/// The unit database a voice synthesizes from.
///
/// Holds at most one mapped [`VoxData`]. Readers take an `Arc` with
/// [`current`](Self::current); unloading clears the slot first and the mapping
/// itself goes away once the last reader lets go. Load and unload take
/// `&mut self`, so callers sharing a database across threads wrap it in a lock.
#[derive(Debug, Default)]
pub struct UnitDatabase {
    voxdata: Option<Arc<VoxData>>,
}

impl UnitDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map and bind a voxdata file, replacing whatever was bound. On error the
    /// previous binding is left untouched.
    pub fn load<P: AsRef<Path>>(&mut self, path: P, voice_name: &str) -> VoxDataResult<()> {
        let voxdata = VoxData::open(path, voice_name)?;
        self.bind(voxdata);
        Ok(())
    }

    /// Bind an already opened voxdata.
    pub fn bind(&mut self, voxdata: VoxData) {
        self.unload();
        self.voxdata = Some(Arc::new(voxdata));
    }

    pub fn is_loaded(&self) -> bool {
        self.voxdata.is_some()
    }

    /// Shared handle on the bound data, if any.
    pub fn current(&self) -> Option<Arc<VoxData>> {
        self.voxdata.clone()
    }

    /// Run `f` over the bound views.
    pub fn with_views<R>(&self, f: impl FnOnce(UnitViews<'_>) -> R) -> Option<R> {
        self.voxdata.as_deref().map(|vd| f(vd.views()))
    }

    /// Unbind the data. Returns whether anything was bound; calling it again
    /// is a no-op.
    pub fn unload(&mut self) -> bool {
        let Some(voxdata) = self.voxdata.take() else {
            return false;
        };
        let readers = Arc::strong_count(&voxdata) - 1;
        if readers > 0 {
            tracing::debug!(
                voice = voxdata.voice_name(),
                readers,
                "voxdata unbound, mapping kept until readers finish"
            );
        } else {
            tracing::debug!(voice = voxdata.voice_name(), "voxdata unmapped");
        }
        drop(voxdata);
        true
    }
}
