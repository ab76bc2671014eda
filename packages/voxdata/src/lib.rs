//! # Fluent Flite Voxdata
//!
//! Zero-copy access to the acoustic unit data of a clunit voice. A voxdata
//! file is mapped read-only, its header is validated in full, and the five
//! data regions are exposed as typed slices of the one mapping.
//!
//! ```no_run
//! use fluent_flite_voxdata::UnitDatabase;
//!
//! # fn main() -> Result<(), fluent_flite_voxdata::VoxDataError> {
//! let mut db = UnitDatabase::new();
//! db.load("voices/kal.voxdata", "kal")?;
//! let units = db.with_views(|v| v.residual_offsets.len());
//! db.unload();
//! # let _ = units;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod layout;
pub mod unit_db;
pub mod voxdata;

pub use error::{VoxDataError, VoxDataResult};
pub use layout::{HEADER_LEN, MAGIC, Region, RegionLayout};
pub use unit_db::UnitDatabase;
pub use voxdata::{UnitViews, VOXDATA_EXTENSION, VoxData};
