//! Loading voxdata files from disk.
//
//   cargo test -p fluent_flite_voxdata --test load
//

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use fluent_flite_voxdata::{HEADER_LEN, MAGIC, Region, RegionLayout, UnitDatabase, VoxData, VoxDataError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/* ───────────────────────────────────────── helpers ─── */

/// Header with the name right-justified in its field, as flite writes it.
fn header(name: &str, sizes: [u32; 5]) -> Vec<u8> {
    let mut h = vec![b' '; HEADER_LEN];
    h[..8].copy_from_slice(MAGIC);
    h[8] = 0;
    let end = 63;
    h[end - name.len()..end].copy_from_slice(name.as_bytes());
    h[end] = 0;
    for (i, s) in sizes.iter().enumerate() {
        h[64 + i * 4..68 + i * 4].copy_from_slice(&s.to_le_bytes());
    }
    h
}

struct Regions {
    residual_offsets: Vec<u32>,
    frames: Vec<u16>,
    mcep_frames: Vec<u16>,
    residuals: Vec<u8>,
    residual_sizes: Vec<u8>,
}

fn sample_regions() -> Regions {
    Regions {
        residual_offsets: vec![0, 3, 7],
        frames: vec![10, 11, 12, 13],
        mcep_frames: vec![500, 501],
        residuals: vec![1, 2, 3, 4, 5, 6, 7, 8, 9],
        residual_sizes: vec![3, 4, 2],
    }
}

fn image(name: &str, r: &Regions) -> Vec<u8> {
    let sizes = [
        (r.residual_offsets.len() * 4) as u32,
        (r.frames.len() * 2) as u32,
        (r.mcep_frames.len() * 2) as u32,
        r.residuals.len() as u32,
        r.residual_sizes.len() as u32,
    ];
    let mut img = header(name, sizes);
    img.extend(r.residual_offsets.iter().flat_map(|v| v.to_le_bytes()));
    img.extend(r.frames.iter().flat_map(|v| v.to_le_bytes()));
    img.extend(r.mcep_frames.iter().flat_map(|v| v.to_le_bytes()));
    img.extend(&r.residuals);
    img.extend(&r.residual_sizes);
    img
}

fn write(dir: &Path, file: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(file);
    let mut f = std::fs::File::create(&path)?;
    f.write_all(bytes)?;
    Ok(path)
}

/* ───────────────────────────────────────── loading ─── */

#[test]
fn views_alias_the_file_contents() -> Result<()> {
    let dir = TempDir::new()?;
    let regions = sample_regions();
    let path = write(dir.path(), "kal.voxdata", &image("kal", &regions))?;

    let vd = VoxData::open(&path, "kal")?;
    assert_eq!(vd.voice_name(), "kal");
    let v = vd.views();
    assert_eq!(v.residual_offsets, regions.residual_offsets.as_slice());
    assert_eq!(v.frames, regions.frames.as_slice());
    assert_eq!(v.mcep_frames, regions.mcep_frames.as_slice());
    assert_eq!(v.residuals, regions.residuals.as_slice());
    assert_eq!(v.residual_sizes, regions.residual_sizes.as_slice());
    assert_eq!(vd.region(Region::Residuals).len(), 9);
    Ok(())
}

#[test]
fn open_in_dir_resolves_voice_file() -> Result<()> {
    let dir = TempDir::new()?;
    write(dir.path(), "awb.voxdata", &image("awb", &sample_regions()))?;
    let vd = VoxData::open_in_dir(dir.path(), "awb")?;
    assert_eq!(vd.path(), dir.path().join("awb.voxdata"));
    Ok(())
}

#[test]
fn trailing_bytes_are_ignored() -> Result<()> {
    let dir = TempDir::new()?;
    let mut img = image("kal", &sample_regions());
    let data_end = img.len();
    img.extend([0xAA; 13]);
    let path = write(dir.path(), "kal.voxdata", &img)?;
    let vd = VoxData::open(&path, "kal")?;
    assert_eq!(vd.layout().data_end(), data_end);
    assert_eq!(vd.mapped_len(), data_end + 13);
    Ok(())
}

/* ───────────────────────────────────────── rejection ─── */

#[test]
fn corrupted_magic_is_a_format_error_and_holds_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let mut img = image("kal", &sample_regions());
    img[3] ^= 0x20;
    let path = write(dir.path(), "kal.voxdata", &img)?;

    let mut db = UnitDatabase::new();
    let err = db.load(&path, "kal").expect_err("bad magic");
    assert!(matches!(err, VoxDataError::Format(_)), "{err}");
    assert!(!db.is_loaded());
    assert!(db.current().is_none());
    assert!(!db.unload());
    assert!(!db.unload());
    Ok(())
}

#[test]
fn other_voice_is_a_mismatch_even_with_valid_magic() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write(dir.path(), "kal.voxdata", &image("kal", &sample_regions()))?;
    match VoxData::open(&path, "awb") {
        Err(VoxDataError::VoiceMismatch { expected, found }) => {
            assert_eq!(expected, "awb");
            assert_eq!(found, "kal");
        }
        other => panic!("expected voice mismatch, got {other:?}"),
    }
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let err = VoxData::open("/nonexistent/dir/kal.voxdata", "kal").expect_err("no file");
    assert!(matches!(err, VoxDataError::Io { .. }));
}

#[test]
fn short_file_is_format_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write(dir.path(), "kal.voxdata", &MAGIC[..])?;
    assert!(matches!(
        VoxData::open(&path, "kal"),
        Err(VoxDataError::Format(_))
    ));
    Ok(())
}

/// For random size headers, a file is accepted exactly when
/// `84 + sum(sizes) <= length`.
#[test]
fn region_bounds_property() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(84);
    let dir = TempDir::new()?;
    for round in 0..400 {
        let sizes = [
            rng.random_range(0..16u32) * 4,
            rng.random_range(0..16u32) * 2,
            rng.random_range(0..16u32) * 2,
            rng.random_range(0..48u32),
            rng.random_range(0..48u32),
        ];
        let needed = HEADER_LEN + sizes.iter().map(|&s| s as usize).sum::<usize>();
        let len = rng.random_range(HEADER_LEN..=needed + 8);

        let mut img = header("rnd", sizes);
        img.resize(len, 0x5A);

        let parsed = RegionLayout::parse(&img, "rnd");
        assert_eq!(
            parsed.is_ok(),
            needed <= len,
            "sizes {sizes:?} len {len}: {parsed:?}"
        );
        if let Err(e) = &parsed {
            assert!(matches!(e, VoxDataError::Format(_)));
        }

        // run a slice of the cases through the mapping path too
        if round % 20 == 0 {
            let path = write(dir.path(), &format!("rnd{round}.voxdata"), &img)?;
            assert_eq!(VoxData::open(&path, "rnd").is_ok(), needed <= len);
        }
    }
    Ok(())
}

/* ───────────────────────────────────────── lifecycle ─── */

#[test]
fn unload_is_idempotent_and_readers_keep_the_mapping() -> Result<()> {
    let dir = TempDir::new()?;
    let regions = sample_regions();
    let path = write(dir.path(), "kal.voxdata", &image("kal", &regions))?;

    let mut db = UnitDatabase::new();
    db.load(&path, "kal")?;
    assert_eq!(db.with_views(|v| v.frames.len()), Some(4));

    let reader = db.current().expect("bound");
    assert!(db.unload());
    assert!(!db.is_loaded());
    assert_eq!(db.with_views(|v| v.frames.len()), None);
    assert!(!db.unload());

    // the in-flight reader still sees valid data
    assert_eq!(reader.views().mcep_frames, regions.mcep_frames.as_slice());
    assert_eq!(Arc::strong_count(&reader), 1);
    Ok(())
}

#[test]
fn failed_reload_keeps_previous_binding() -> Result<()> {
    let dir = TempDir::new()?;
    let good = write(dir.path(), "kal.voxdata", &image("kal", &sample_regions()))?;
    let bad = write(dir.path(), "awb.voxdata", &image("awb", &sample_regions()))?;

    let mut db = UnitDatabase::new();
    db.load(&good, "kal")?;
    assert!(db.load(&bad, "kal").is_err());
    assert_eq!(db.current().map(|vd| vd.voice_name().to_string()), Some("kal".into()));
    Ok(())
}
