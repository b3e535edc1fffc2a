//! Result decoder
//!
//! Turns the flat, fixed-point integer arrays returned by the vision engine
//! into typed records. Out-of-domain values are reported, never clamped: they
//! mean this layer and the engine disagree about the wire format.

use palette::white_point::D65;
use palette::{FromColor, Lab, Srgb};
use tracing::warn;

use crate::rubik_detector::codec::{
    CUBE_STATE_ARRAY_LEN, FACELET_ARRAY_LEN, FACELET_RECORD_LEN, FixedPoint, LAB_TRIPLE_LEN,
    STICKER_COUNT,
};
use crate::rubik_detector::common::error::{DetectorError, Result};
use crate::rubik_detector::model::{
    CubeState, Face, FaceletColor, FaceletGrid, Point2d, RubikFacelet,
};

const LAB_A_B_OFFSET: f64 = 128.0;

fn malformed(message: String) -> DetectorError {
    warn!("{}", message);
    DetectorError::MalformedResult(message)
}

fn decode_record(index: usize, record: &[i32]) -> Result<RubikFacelet> {
    let color = FaceletColor::from_wire(record[0])
        .ok_or_else(|| malformed(format!("facelet {index}: color index {} out of range", record[0])))?;

    let geometry = FixedPoint::GEOMETRY;
    let width = geometry.decode(record[3]);
    let height = geometry.decode(record[4]);
    if width < 0.0 || height < 0.0 {
        return Err(malformed(format!(
            "facelet {index}: negative size {width}x{height}"
        )));
    }

    Ok(RubikFacelet {
        color,
        center: Point2d::new(geometry.decode(record[1]) as f32, geometry.decode(record[2]) as f32),
        width: width as f32,
        height: height as f32,
        angle: geometry.decode(record[5]) as f32,
    })
}

/// Decodes the facelet array of a scan. `None` means nothing was detected.
pub fn decode_facelets(raw: Option<&[i32]>) -> Result<Option<FaceletGrid>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.len() != FACELET_ARRAY_LEN {
        return Err(malformed(format!(
            "facelet array has {} ints, expected {}",
            raw.len(),
            FACELET_ARRAY_LEN
        )));
    }

    let facelets = raw
        .chunks_exact(FACELET_RECORD_LEN)
        .enumerate()
        .map(|(index, record)| decode_record(index, record))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(FaceletGrid::new(std::array::from_fn(|row| {
        std::array::from_fn(|col| facelets[row * 3 + col])
    }))))
}

/// Encodes a grid into the facelet wire array, row-major.
pub fn encode_facelet_grid(grid: &FaceletGrid) -> Result<Vec<i32>> {
    let geometry = FixedPoint::GEOMETRY;
    let mut raw = Vec::with_capacity(FACELET_ARRAY_LEN);
    for facelet in grid.iter() {
        raw.push(facelet.color.as_wire());
        raw.push(geometry.encode(facelet.center.x as f64)?);
        raw.push(geometry.encode(facelet.center.y as f64)?);
        raw.push(geometry.encode(facelet.width as f64)?);
        raw.push(geometry.encode(facelet.height as f64)?);
        raw.push(geometry.encode(facelet.angle as f64)?);
    }
    Ok(raw)
}

/// Converts a CIE-LAB color (D65) to an opaque ARGB int.
pub fn lab_to_argb(l: f32, a: f32, b: f32) -> u32 {
    let srgb = Srgb::<f32>::from_color(Lab::<D65, f32>::new(l, a, b));
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
    0xFF00_0000 | channel(srgb.red) << 16 | channel(srgb.green) << 8 | channel(srgb.blue)
}

fn decode_lab(face: usize, triple: &[i32]) -> Result<u32> {
    let color = FixedPoint::COLOR;
    let l = color.decode(triple[0]) / 255.0 * 100.0;
    let a = color.decode(triple[1]) - LAB_A_B_OFFSET;
    let b = color.decode(triple[2]) - LAB_A_B_OFFSET;

    if !(0.0..=100.0).contains(&l) {
        return Err(malformed(format!("face {face}: L* {l} outside [0, 100]")));
    }
    for (name, value) in [("a*", a), ("b*", b)] {
        if !(-128.0..=127.0).contains(&value) {
            return Err(malformed(format!("face {face}: {name} {value} outside [-128, 127]")));
        }
    }

    Ok(lab_to_argb(l as f32, a as f32, b as f32))
}

/// Decodes the color-analysis array: 54 face labels, then one LAB triple per face.
pub fn decode_cube_state(raw: &[i32]) -> Result<CubeState> {
    if raw.len() != CUBE_STATE_ARRAY_LEN {
        return Err(malformed(format!(
            "cube state array has {} ints, expected {}",
            raw.len(),
            CUBE_STATE_ARRAY_LEN
        )));
    }
    let (labels, triples) = raw.split_at(STICKER_COUNT);

    let faces = labels
        .iter()
        .enumerate()
        .map(|(position, &label)| {
            Face::from_wire(label)
                .ok_or_else(|| malformed(format!("sticker {position}: face index {label} out of range")))
        })
        .collect::<Result<Vec<_>>>()?;

    let colors = triples
        .chunks_exact(LAB_TRIPLE_LEN)
        .enumerate()
        .map(|(face, triple)| decode_lab(face, triple))
        .collect::<Result<Vec<_>>>()?;

    Ok(CubeState::new(
        std::array::from_fn(|i| faces[i]),
        std::array::from_fn(|i| colors[i]),
    ))
}
