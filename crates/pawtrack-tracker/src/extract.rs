//! Per-frame contour extraction.
//!
//! Binarizes one pressure frame, optionally grows/shrinks the mask, then
//! walks the outer border of every 8-connected region. Regions are
//! discovered in row-major order, so contour lists are deterministic.

use std::collections::VecDeque;

use log::warn;
use nalgebra::Point2;
use pawtrack_core::{Contour, FrameContourMap, PressureFrameView, PressureVolume};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::params::TrackerParams;

/// Clockwise Moore neighborhood starting north, y pointing down.
const MOORE: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const CROSS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

struct Mask {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Mask {
    fn from_frame(frame: &PressureFrameView<'_>, threshold: f32) -> Self {
        Self {
            rows: frame.rows,
            cols: frame.cols,
            cells: frame.data.iter().map(|&v| v > threshold).collect(),
        }
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.cols
            && (y as usize) < self.rows
            && self.cells[y as usize * self.cols + x as usize]
    }

    /// Grow foreground by one 4-connected step per iteration.
    fn dilate(&mut self, iterations: usize) {
        for _ in 0..iterations {
            let prev = self.cells.clone();
            for y in 0..self.rows as i32 {
                for x in 0..self.cols as i32 {
                    let idx = y as usize * self.cols + x as usize;
                    if prev[idx] {
                        continue;
                    }
                    let touches = CROSS.iter().any(|&(dx, dy)| {
                        let (nx, ny) = (x + dx, y + dy);
                        nx >= 0
                            && ny >= 0
                            && (nx as usize) < self.cols
                            && (ny as usize) < self.rows
                            && prev[ny as usize * self.cols + nx as usize]
                    });
                    if touches {
                        self.cells[idx] = true;
                    }
                }
            }
        }
    }

    /// Shrink foreground by one 4-connected step per iteration; out of
    /// bounds counts as background.
    fn erode(&mut self, iterations: usize) {
        for _ in 0..iterations {
            let prev = self.cells.clone();
            for y in 0..self.rows as i32 {
                for x in 0..self.cols as i32 {
                    let idx = y as usize * self.cols + x as usize;
                    if !prev[idx] {
                        continue;
                    }
                    let exposed = CROSS.iter().any(|&(dx, dy)| {
                        let (nx, ny) = (x + dx, y + dy);
                        nx < 0
                            || ny < 0
                            || nx as usize >= self.cols
                            || ny as usize >= self.rows
                            || !prev[ny as usize * self.cols + nx as usize]
                    });
                    if exposed {
                        self.cells[idx] = false;
                    }
                }
            }
        }
    }
}

struct Labels {
    rows: usize,
    cols: usize,
    ids: Vec<u32>, // 0 = background
}

impl Labels {
    #[inline]
    fn get(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return 0;
        }
        self.ids[y as usize * self.cols + x as usize]
    }
}

/// Flood-fill 8-connected regions. Returns the label plane and each
/// region's first pixel in row-major order (its topmost-leftmost pixel).
fn label_regions(mask: &Mask) -> (Labels, Vec<(i32, i32)>) {
    let mut labels = Labels {
        rows: mask.rows,
        cols: mask.cols,
        ids: vec![0; mask.rows * mask.cols],
    };
    let mut starts = Vec::new();

    for y in 0..mask.rows as i32 {
        for x in 0..mask.cols as i32 {
            if !mask.get(x, y) || labels.get(x, y) != 0 {
                continue;
            }
            let id = starts.len() as u32 + 1;
            starts.push((x, y));

            let mut queue = VecDeque::from([(x, y)]);
            labels.ids[y as usize * mask.cols + x as usize] = id;
            while let Some((cx, cy)) = queue.pop_front() {
                for &(dx, dy) in &MOORE {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if mask.get(nx, ny) && labels.get(nx, ny) == 0 {
                        labels.ids[ny as usize * mask.cols + nx as usize] = id;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
    }

    (labels, starts)
}

/// Moore-neighbor border following with Jacob's stopping criterion.
///
/// `start` must be the region's topmost-leftmost pixel so the cell due west
/// of it is guaranteed background and can seed the first sweep.
fn trace_border(labels: &Labels, id: u32, start: (i32, i32)) -> Vec<Point2<i32>> {
    let inside = |x: i32, y: i32| labels.get(x, y) == id;
    let mut points = vec![Point2::new(start.0, start.1)];

    let mut current = start;
    let mut sweep_from = 7usize; // first cell past the west backtrack
    let mut first_move: Option<usize> = None;

    loop {
        let mut found = None;
        for step in 0..8 {
            let dir = (sweep_from + step) % 8;
            let (dx, dy) = MOORE[dir];
            if inside(current.0 + dx, current.1 + dy) {
                found = Some(dir);
                break;
            }
        }
        let Some(dir) = found else {
            break; // isolated pixel: the contour is the start pixel alone
        };

        if current == start {
            match first_move {
                None => first_move = Some(dir),
                Some(first) if first == dir => break,
                Some(_) => {}
            }
        }

        current = (current.0 + MOORE[dir].0, current.1 + MOORE[dir].1);
        points.push(Point2::new(current.0, current.1));
        sweep_from = (dir + 6) % 8;
    }

    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Extract the outer contour of every above-threshold region in one frame.
pub fn extract_frame_contours(
    frame: &PressureFrameView<'_>,
    params: &TrackerParams,
) -> Vec<Contour> {
    let mut mask = Mask::from_frame(frame, params.pressure_threshold);
    mask.dilate(params.dilation_iterations);
    mask.erode(params.erosion_iterations);

    let (labels, starts) = label_regions(&mask);
    let mut contours = Vec::with_capacity(starts.len());
    for (index, &start) in starts.iter().enumerate() {
        let points = trace_border(&labels, index as u32 + 1, start);
        if points.is_empty() {
            warn!("skipping degenerate contour near ({}, {})", start.0, start.1);
            continue;
        }
        contours.push(Contour::new(points));
    }
    contours
}

/// Extract contours for every frame of the recording. Sparse: frames with
/// no active region are absent from the map.
pub fn extract_volume_contours(volume: &PressureVolume, params: &TrackerParams) -> FrameContourMap {
    #[cfg(feature = "parallel")]
    {
        (0..volume.frame_count())
            .into_par_iter()
            .filter_map(|t| {
                let frame = volume.frame(t)?;
                let contours = extract_frame_contours(&frame, params);
                (!contours.is_empty()).then_some((t, contours))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        volume
            .frame_views()
            .enumerate()
            .filter_map(|(t, frame)| {
                let contours = extract_frame_contours(&frame, params);
                (!contours.is_empty()).then_some((t, contours))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_data(pattern: &[&str]) -> (usize, usize, Vec<f32>) {
        let rows = pattern.len();
        let cols = pattern[0].len();
        let mut data = Vec::with_capacity(rows * cols);
        for row in pattern {
            for c in row.chars() {
                data.push(if c == '#' { 1.0 } else { 0.0 });
            }
        }
        (rows, cols, data)
    }

    fn extract(pattern: &[&str], params: &TrackerParams) -> Vec<Contour> {
        let (rows, cols, data) = frame_data(pattern);
        let frame = PressureFrameView {
            rows,
            cols,
            data: &data,
        };
        extract_frame_contours(&frame, params)
    }

    #[test]
    fn blank_frame_yields_no_contours() {
        let contours = extract(&["....", "....", "...."], &TrackerParams::default());
        assert!(contours.is_empty());
    }

    #[test]
    fn single_pixel_region_yields_length_one_contour() {
        let contours = extract(&["....", ".#..", "...."], &TrackerParams::default());
        assert_eq!(1, contours.len());
        assert_eq!(1, contours[0].len());
        assert_eq!(Point2::new(1, 1), contours[0].points[0]);
    }

    #[test]
    fn square_region_traces_its_border_only() {
        let contours = extract(
            &[".....", ".###.", ".###.", ".###.", "....."],
            &TrackerParams::default(),
        );
        assert_eq!(1, contours.len());

        let points = &contours[0].points;
        assert_eq!(8, points.len());
        for corner in [(1, 1), (3, 1), (3, 3), (1, 3)] {
            assert!(
                points.contains(&Point2::new(corner.0, corner.1)),
                "missing corner {corner:?}"
            );
        }
        assert!(!points.contains(&Point2::new(2, 2)), "interior leaked");
    }

    #[test]
    fn separated_regions_get_separate_contours() {
        let contours = extract(&["#...#", ".....", "#...#"], &TrackerParams::default());
        assert_eq!(4, contours.len());
    }

    #[test]
    fn diagonal_pixels_form_one_region() {
        let contours = extract(&["#....", ".#...", "..#.."], &TrackerParams::default());
        assert_eq!(1, contours.len());

        // The walk returns along the line, so the middle pixel appears twice.
        let points = &contours[0].points;
        assert_eq!(4, points.len());
        for pixel in [(0, 0), (1, 1), (2, 2)] {
            assert!(points.contains(&Point2::new(pixel.0, pixel.1)));
        }
    }

    #[test]
    fn threshold_is_strict() {
        let data = vec![0.5f32; 4];
        let frame = PressureFrameView {
            rows: 2,
            cols: 2,
            data: &data,
        };
        let params = TrackerParams {
            pressure_threshold: 0.5,
            ..TrackerParams::default()
        };
        assert!(extract_frame_contours(&frame, &params).is_empty());
    }

    #[test]
    fn dilation_bridges_a_dropout() {
        let split = &["##.##"];
        assert_eq!(2, extract(split, &TrackerParams::default()).len());

        let params = TrackerParams {
            dilation_iterations: 1,
            ..TrackerParams::default()
        };
        assert_eq!(1, extract(split, &params).len());
    }

    #[test]
    fn erosion_removes_speckle() {
        let params = TrackerParams {
            erosion_iterations: 1,
            ..TrackerParams::default()
        };
        assert!(extract(&["...", ".#.", "..."], &params).is_empty());
    }

    #[test]
    fn volume_map_is_sparse() {
        let (rows, cols, plane_active) = frame_data(&["....", ".##.", "...."]);
        let (_, _, plane_blank) = frame_data(&["....", "....", "...."]);

        let mut data = plane_blank.clone();
        data.extend(plane_active);
        data.extend(plane_blank);
        let volume = PressureVolume::new(rows, cols, 3, data).expect("volume");

        let map = extract_volume_contours(&volume, &TrackerParams::default());
        assert_eq!(1, map.len());
        assert!(map.contains_key(&1));
    }
}
