//! Pixel statistics regression test
//!
//! Checks mean, median, mode, variance and standard deviation on images
//! whose statistics are known in closed form, and the agreement between
//! the slice, grid and image entry points.

use pixstat_core::{Error, Pix, PixelDepth, PixelStats};
use pixstat_test::{RegParams, synthetic};

// ============================================================================
// Known distributions
// ============================================================================

#[test]
fn pixel_stats_reg() {
    let mut rp = RegParams::new("pixel_stats");

    // Uniform 128
    let pix = synthetic::uniform(31, 17, 128).unwrap();
    let s = pix.pixel_stats().unwrap();
    rp.compare_values(128.0, s.mean, 0.0);
    rp.compare_values(128.0, s.median, 0.0);
    rp.compare_values(128.0, f64::from(s.mode), 0.0);
    rp.compare_values(0.0, s.variance, 0.0);
    rp.compare_values(0.0, s.std_dev, 0.0);
    rp.compare_values(527.0, s.count as f64, 0.0);

    // Two levels: 0,0,0,255,255
    let pix = synthetic::from_samples(5, 1, &[0, 0, 0, 255, 255]).unwrap();
    let s = pix.pixel_stats().unwrap();
    rp.compare_values(102.0, s.mean, 0.0);
    rp.compare_values(0.0, s.median, 0.0);
    rp.compare_values(0.0, f64::from(s.mode), 0.0);
    rp.compare_values(3.0, s.mode_count as f64, 0.0);
    rp.compare_values(15606.0, s.variance, 1e-9);
    rp.compare_values(124.92, s.std_dev, 0.005);

    // Full ramp 0..=255, each value once: mean 127.5, var (256^2 - 1) / 12
    let pix = synthetic::gradient(256, 1, 1).unwrap();
    let s = pix.pixel_stats().unwrap();
    rp.compare_values(127.5, s.mean, 1e-12);
    rp.compare_values(127.5, s.median, 0.0);
    rp.compare_values(0.0, f64::from(s.mode), 0.0);
    rp.compare_values(5461.25, s.variance, 1e-9);

    // Same ramp over many rows leaves every statistic unchanged
    let tall = synthetic::gradient(256, 40, 1).unwrap();
    let t = tall.pixel_stats().unwrap();
    rp.compare_values(s.mean, t.mean, 1e-12);
    rp.compare_values(s.variance, t.variance, 1e-9);
    rp.compare_values(40.0, t.mode_count as f64, 0.0);

    assert!(rp.cleanup());
}

// ============================================================================
// Entry point agreement
// ============================================================================

#[test]
fn pixel_stats_entry_points() {
    let rows: Vec<Vec<u8>> = (0..7u8)
        .map(|y| (0..13u8).map(|x| x.wrapping_mul(19).wrapping_add(y * 3)).collect())
        .collect();
    let flat: Vec<u8> = rows.concat();

    let from_grid = PixelStats::from_grid(&rows).unwrap();
    let from_flat = PixelStats::from_samples(&flat).unwrap();
    let from_pix = Pix::from_samples(13, 7, &flat)
        .unwrap()
        .pixel_stats()
        .unwrap();
    assert_eq!(from_grid, from_flat);
    assert_eq!(from_flat, from_pix);

    let hist = Pix::from_samples(13, 7, &flat)
        .unwrap()
        .gray_histogram(1)
        .unwrap();
    assert_eq!(PixelStats::from_histogram(&hist).unwrap(), from_pix);
}

#[test]
fn pixel_stats_properties() {
    // A handful of irregular buffers
    let buffers: Vec<Vec<u8>> = vec![
        vec![1],
        vec![255, 0],
        vec![3, 3, 3, 200, 17, 17, 90],
        (0..1000u32).map(|i| (i * i % 251) as u8).collect(),
    ];
    for buf in &buffers {
        let s = PixelStats::from_samples(buf).unwrap();
        let lo = f64::from(*buf.iter().min().unwrap());
        let hi = f64::from(*buf.iter().max().unwrap());
        assert!(lo <= s.mean && s.mean <= hi, "mean {} outside [{lo}, {hi}]", s.mean);
        assert!(lo <= s.median && s.median <= hi);
        assert!(s.variance >= 0.0);
        assert!((s.std_dev * s.std_dev - s.variance).abs() < 1e-6);
        assert!(buf.contains(&s.mode));
        let mode_count = buf.iter().filter(|&&v| v == s.mode).count() as u64;
        assert_eq!(mode_count, s.mode_count);
        for v in buf {
            let c = buf.iter().filter(|&w| w == v).count() as u64;
            assert!(c < s.mode_count || (c == s.mode_count && *v >= s.mode));
        }
    }
}

#[test]
fn pixel_stats_rejects_rgb_and_empty() {
    let rgb = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
    assert!(matches!(rgb.pixel_stats(), Err(Error::UnsupportedDepth(32))));

    // Luminance conversion makes color input acceptable
    let gray = rgb.convert_to_8().unwrap();
    assert_eq!(gray.pixel_stats().unwrap().mean, 0.0);

    assert!(matches!(
        PixelStats::from_samples(&[]),
        Err(Error::InvalidInput(_))
    ));
}
